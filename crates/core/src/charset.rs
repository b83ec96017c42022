//! Character-set policy for AI values.

use serde::{Deserialize, Serialize};

/// Punctuation accepted by the GS1 alphanumeric set (GS1 "character set 82"
/// subset as transmitted by the scanners we support).
const GS1_PUNCTUATION: &str = " !\"%&'()*+,-./:;<=>?_";

/// Character set an AI value is allowed to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterSet {
    /// ASCII digits only.
    Numeric,
    /// Digits, uppercase letters, a fixed punctuation set, and lowercase
    /// letters when the lowercase policy allows them.
    Gs1Alphanumeric,
}

impl CharacterSet {
    /// Whether `c` is acceptable under this set and the active lowercase policy.
    pub fn is_allowed(self, c: char, allow_lowercase: bool) -> bool {
        match self {
            CharacterSet::Numeric => c.is_ascii_digit(),
            CharacterSet::Gs1Alphanumeric => {
                c.is_ascii_digit()
                    || c.is_ascii_uppercase()
                    || (allow_lowercase && c.is_ascii_lowercase())
                    || GS1_PUNCTUATION.contains(c)
            }
        }
    }
}
