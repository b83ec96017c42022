//! Static Application Identifier dictionary.
//!
//! A process-wide, immutable registry of the AI codes this toolchain
//! understands, keyed by exact code. Built lazily on first use and safe for
//! unsynchronized concurrent reads afterwards. The set is a representative
//! subset of the GS1 General Specifications, matched exactly to what the
//! supported scanners emit in the field; do not "correct" the length ranges
//! against the published standard.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::charset::CharacterSet;

/// Immutable metadata for one registered Application Identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDefinition {
    /// The AI code itself, 2 to 4 digits.
    pub code: String,
    /// Human-readable data title (e.g., "GTIN").
    pub description: String,
    /// Whether the value length is fixed. When true, `min_length == max_length`.
    pub fixed_length: bool,
    /// Minimum value length in characters.
    pub min_length: usize,
    /// Maximum value length in characters.
    pub max_length: usize,
    /// Character set the value must draw from.
    pub character_set: CharacterSet,
}

impl AiDefinition {
    fn fixed(code: &str, description: &str, length: usize, set: CharacterSet) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            fixed_length: true,
            min_length: length,
            max_length: length,
            character_set: set,
        }
    }

    fn variable(code: &str, description: &str, min: usize, max: usize, set: CharacterSet) -> Self {
        debug_assert!(min <= max, "AI {code}: min_length {min} > max_length {max}");
        Self {
            code: code.to_string(),
            description: description.to_string(),
            fixed_length: false,
            min_length: min,
            max_length: max,
            character_set: set,
        }
    }
}

/// A successful greedy dictionary match at some position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiMatch<'a> {
    /// The matched AI code as a slice of the dictionary entry.
    pub code: &'a str,
    /// The matched definition.
    pub definition: &'a AiDefinition,
    /// Length of the matched code in characters (2, 3, or 4).
    pub len: usize,
}

fn registry() -> &'static HashMap<String, AiDefinition> {
    static REGISTRY: OnceLock<HashMap<String, AiDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> HashMap<String, AiDefinition> {
    use CharacterSet::{Gs1Alphanumeric, Numeric};

    let mut map = HashMap::new();
    let mut add = |def: AiDefinition| {
        // Last registration wins; the 242 override below depends on this.
        map.insert(def.code.clone(), def);
    };

    add(AiDefinition::fixed("00", "SSCC", 18, Numeric));
    add(AiDefinition::fixed("01", "GTIN", 14, Numeric));
    add(AiDefinition::fixed("02", "Content GTIN", 14, Numeric));
    add(AiDefinition::variable("10", "Batch/Lot", 1, 20, Gs1Alphanumeric));
    add(AiDefinition::fixed("11", "Production date", 6, Numeric));
    add(AiDefinition::fixed("12", "Due date", 6, Numeric));
    add(AiDefinition::fixed("13", "Packaging date", 6, Numeric));
    add(AiDefinition::fixed("15", "Best before", 6, Numeric));
    add(AiDefinition::fixed("16", "Sell by", 6, Numeric));
    add(AiDefinition::fixed("17", "Expiration date", 6, Numeric));
    add(AiDefinition::fixed("20", "Variant", 2, Numeric));
    add(AiDefinition::variable("21", "Serial", 1, 20, Gs1Alphanumeric));
    add(AiDefinition::variable("30", "Count", 1, 8, Numeric));
    add(AiDefinition::variable("37", "Units contained", 1, 8, Numeric));

    for code in 240..=243 {
        add(AiDefinition::variable(
            &code.to_string(),
            &format!("Additional ID ({code})"),
            1,
            30,
            Gs1Alphanumeric,
        ));
    }
    // 242 is numeric and much shorter than its 24x siblings.
    add(AiDefinition::variable("242", "Made-to-order variation", 1, 6, Numeric));
    for code in 250..=254 {
        add(AiDefinition::variable(
            &code.to_string(),
            &format!("Reference ({code})"),
            1,
            30,
            Gs1Alphanumeric,
        ));
    }

    // Quantity families: the trailing digit is the implied decimal-point
    // position, so each prefix expands into ten fixed 6-digit AIs.
    for (prefix, description) in [
        ("310", "Net weight (kg)"),
        ("320", "Net weight (lb)"),
        ("330", "Length (m)"),
        ("340", "Length (in)"),
    ] {
        for decimals in 0..=9 {
            add(AiDefinition::fixed(
                &format!("{prefix}{decimals}"),
                &format!("{description} (10^-{decimals})"),
                6,
                Numeric,
            ));
        }
    }

    // Price families expand the same way but are variable-length.
    for (prefix, description) in [("392", "Price"), ("393", "Price with ISO currency")] {
        for decimals in 0..=9 {
            add(AiDefinition::variable(
                &format!("{prefix}{decimals}"),
                &format!("{description} (10^-{decimals})"),
                1,
                15,
                Numeric,
            ));
        }
    }

    for code in 400..=426 {
        add(AiDefinition::variable(
            &code.to_string(),
            &format!("Customer data ({code})"),
            1,
            30,
            Gs1Alphanumeric,
        ));
    }

    add(AiDefinition::fixed("8001", "Roll products", 14, Numeric));
    add(AiDefinition::variable("8002", "Serial within batch", 1, 20, Gs1Alphanumeric));
    add(AiDefinition::fixed("8003", "GRAI", 14, Numeric));
    add(AiDefinition::variable("8004", "GIAI", 1, 30, Gs1Alphanumeric));

    map
}

/// Look up a definition by exact AI code.
pub fn lookup(code: &str) -> Option<&'static AiDefinition> {
    registry().get(code)
}

/// Greedy longest-match lookup at byte offset `index` of `text`.
///
/// Tries candidate codes of length 4, then 3, then 2 (never 1); the first
/// length that names a registered code wins. Returns `None` when nothing
/// matches, including when fewer than two characters remain.
pub fn match_at(text: &str, index: usize) -> Option<AiMatch<'static>> {
    let max = 4.min(text.len().saturating_sub(index));
    for len in (2..=max).rev() {
        let Some(candidate) = text.get(index..index + len) else {
            // Slice fell on a multi-byte character boundary; shorter
            // candidates cannot be valid digit codes either.
            continue;
        };
        if let Some(definition) = registry().get(candidate) {
            return Some(AiMatch {
                code: &definition.code,
                definition,
                len,
            });
        }
    }
    None
}
