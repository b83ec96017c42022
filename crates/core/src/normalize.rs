//! Scan input normalization.
//!
//! Raw scanner output arrives with all kinds of transport noise: AIM
//! symbology prefixes, trailing CR/LF/NUL/ETX from serial framing, tab
//! characters from keyboard wedges, and textual stand-ins for the GS
//! separator that the wedge driver substituted because it could not type a
//! control character. [`normalize`] turns that into the clean separator-
//! delimited form the parser expects. It never fails; worst case the
//! normalized text is empty and the parser reports zero elements.

use serde::{Deserialize, Serialize};

use gs1_toolchain_diagnostics::{Diagnostic, codes};

use crate::GS;

/// Placeholder spellings of the GS separator recognized by default.
/// Matching is case-insensitive.
pub const DEFAULT_GS_PLACEHOLDERS: [&str; 9] = [
    "<GS>", "[GS]", "{GS}", "(GS)", "\\u001D", "\\x1D", "\\035", "&#29;", "%1D",
];

/// Configuration for [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationOptions {
    /// Literal strings translated into the GS separator (case-insensitive).
    pub gs_placeholders: Vec<String>,
    /// Remove a leading AIM symbology identifier (`]` plus two characters).
    pub strip_aim_id: bool,
    /// Collapse runs of two or more GS separators into one.
    pub collapse_multiple_gs: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            gs_placeholders: DEFAULT_GS_PLACEHOLDERS.iter().map(|s| s.to_string()).collect(),
            strip_aim_id: true,
            collapse_multiple_gs: false,
        }
    }
}

/// Outcome of normalizing one raw scan line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    /// The input exactly as received.
    pub raw: String,
    /// The cleaned text to feed to the parser.
    pub normalized: String,
    /// AIM symbology identifier found at the start of the input, if any,
    /// including the leading `]`.
    pub symbology_id: Option<String>,
    /// Non-fatal notes about what was changed.
    pub warnings: Vec<Diagnostic>,
}

/// Normalize one raw scan line.
///
/// Steps run in a fixed order: AIM id handling, NBSP translation, trailing
/// control strip, tab removal, placeholder substitution, end trimming,
/// optional GS-run collapse, leading GS strip. The function is idempotent:
/// normalizing its own output changes nothing.
pub fn normalize(raw: &str, options: &NormalizationOptions) -> NormalizationResult {
    let mut warnings = Vec::new();
    let mut working = raw.to_string();
    let mut symbology_id = None;

    if let Some(id) = detect_aim_id(&working) {
        let id = id.to_string();
        if options.strip_aim_id {
            working = working[id.len()..].to_string();
            warnings.push(Diagnostic::warn(
                codes::AIM_ID_REMOVED,
                format!("Removed AIM symbology identifier {id}"),
                None,
            ));
        }
        symbology_id = Some(id);
    }

    working = working.replace('\u{a0}', " ");
    working = strip_control_suffix(&working);
    working = working.replace('\t', "");

    for placeholder in &options.gs_placeholders {
        working = replace_ignore_case(&working, placeholder, GS);
    }
    working = replace_builtin_escapes(&working);

    working = trim_ends(&working);

    if options.collapse_multiple_gs && working.contains(GS) {
        let collapsed = collapse_gs_runs(&working);
        if collapsed != working {
            warnings.push(Diagnostic::warn(
                codes::COLLAPSED_GS,
                "Collapsed repeated GS separators",
                None,
            ));
            working = collapsed;
        }
    }

    // A leading separator carries no meaning and would only make the parser
    // skip it anyway.
    let trimmed = working.trim_start_matches(GS);
    if trimmed.len() != working.len() {
        working = trimmed.to_string();
    }

    NormalizationResult {
        raw: raw.to_string(),
        normalized: working,
        symbology_id,
        warnings,
    }
}

/// AIM symbology identifier: `]` followed by a word character and one more
/// character, at the very start of the input.
fn detect_aim_id(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    let (_, bracket) = chars.next()?;
    if bracket != ']' {
        return None;
    }
    let (_, flag) = chars.next()?;
    if !(flag.is_alphanumeric() || flag == '_') {
        return None;
    }
    let (idx, modifier) = chars.next()?;
    Some(&text[..idx + modifier.len_utf8()])
}

/// Strip a trailing run of CR, LF, NUL, and ETX (serial line framing).
/// Interior occurrences stay untouched.
fn strip_control_suffix(text: &str) -> String {
    text.trim_end_matches(['\r', '\n', '\0', '\u{03}']).to_string()
}

/// Trim spaces, NBSP, CR, and LF from both ends (but no other controls).
fn trim_ends(text: &str) -> String {
    text.trim_matches([' ', '\u{a0}', '\r', '\n']).to_string()
}

fn collapse_gs_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_gs = false;
    for c in text.chars() {
        if c == GS && prev_gs {
            continue;
        }
        prev_gs = c == GS;
        out.push(c);
    }
    out
}

/// Replace every occurrence of `needle` in `haystack` with `replacement`,
/// comparing ASCII case-insensitively.
fn replace_ignore_case(haystack: &str, needle: &str, replacement: char) -> String {
    if needle.is_empty() || needle.trim().is_empty() {
        return haystack.to_string();
    }
    let mut out = String::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        match haystack.get(i..i + needle.len()) {
            Some(window) if window.eq_ignore_ascii_case(needle) => {
                out.push(replacement);
                i += needle.len();
            }
            _ => {
                // Always lands on a char boundary: i only ever advances by
                // len_utf8 or a matched window length.
                let c = haystack[i..].chars().next().unwrap_or('\0');
                out.push(c);
                i += c.len_utf8();
            }
        }
    }
    out
}

/// Replace the fixed built-in escape spellings of GS, plus octal escapes
/// whose decoded value is the GS code point.
fn replace_builtin_escapes(text: &str) -> String {
    let mut working = text.to_string();
    for escape in ["\\u001d", "\\u001D", "\\x1d", "\\x1D", "%1d", "%1D"] {
        working = working.replace(escape, &GS.to_string());
    }
    replace_octal_escapes(&working)
}

/// Scan for `\` followed by octal digits and substitute the GS separator
/// when the decoded value equals 0x1D (e.g. `\035`, `\0035`). Octal escapes
/// decoding to anything else are left alone.
fn replace_octal_escapes(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() && bytes[j] < b'8' {
                j += 1;
            }
            let digits = &text[i + 1..j];
            if (3..=5).contains(&digits.len())
                && u32::from_str_radix(digits, 8) == Ok(u32::from(GS))
            {
                out.push(GS);
                i = j;
                continue;
            }
        }
        let c = text[i..].chars().next().unwrap_or('\0');
        out.push(c);
        i += c.len_utf8();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_aim_id_variants() {
        assert_eq!(detect_aim_id("]d201..."), Some("]d2"));
        assert_eq!(detect_aim_id("]C1x"), Some("]C1"));
        assert_eq!(detect_aim_id("01..."), None);
        assert_eq!(detect_aim_id("]"), None);
        assert_eq!(detect_aim_id("] 1"), None);
    }

    #[test]
    fn replace_ignore_case_hits_all_spellings() {
        assert_eq!(replace_ignore_case("a<gs>b<GS>c", "<GS>", GS), format!("a{GS}b{GS}c"));
        assert_eq!(replace_ignore_case("no match", "<GS>", GS), "no match");
    }

    #[test]
    fn octal_escape_only_for_gs_value() {
        assert_eq!(replace_octal_escapes("a\\035b"), format!("a{GS}b"));
        assert_eq!(replace_octal_escapes("a\\0035b"), format!("a{GS}b"));
        assert_eq!(replace_octal_escapes("a\\047b"), "a\\047b");
        assert_eq!(replace_octal_escapes("a\\b"), "a\\b");
    }
}
