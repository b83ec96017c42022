//! Deterministic composers: the inverse of the parser.

use crate::GS;
use crate::dictionary;
use crate::parse::Gs1Element;

/// Concatenate elements into a GS1 element string suitable for re-encoding.
///
/// A GS separator is appended after every element whose AI is registered as
/// variable-length, except the last one. Fixed-length values need no
/// terminator, so this round-trips through [`crate::parse`] for well-formed
/// input.
pub fn compose_gs1(elements: &[Gs1Element]) -> String {
    let mut out = String::new();
    for (i, element) in elements.iter().enumerate() {
        out.push_str(&element.ai);
        out.push_str(&element.value);
        let variable = dictionary::lookup(&element.ai).is_some_and(|def| !def.fixed_length);
        if variable && i < elements.len() - 1 {
            out.push(GS);
        }
    }
    out
}

/// Human-readable interpretation: `(AI)value` for each element, no
/// separators. Cosmetic only; not parseable.
pub fn compose_hri(elements: &[Gs1Element]) -> String {
    let mut out = String::new();
    for element in elements {
        out.push('(');
        out.push_str(&element.ai);
        out.push(')');
        out.push_str(&element.value);
    }
    out
}

/// Render framing and separator control characters as visible tokens
/// (`<GS>`, `<CR>`, `<LF>`, `<NUL>`, `<ETX>`) for display surfaces.
pub fn display_control_chars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\u{1d}' => out.push_str("<GS>"),
            '\r' => out.push_str("<CR>"),
            '\n' => out.push_str("<LF>"),
            '\0' => out.push_str("<NUL>"),
            '\u{03}' => out.push_str("<ETX>"),
            _ => out.push(c),
        }
    }
    out
}
