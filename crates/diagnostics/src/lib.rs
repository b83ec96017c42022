//! Diagnostics for the GS1 toolchain.
//!
//! Provides [`Diagnostic`], [`Severity`], and [`Span`] types used to report
//! errors, warnings, and informational messages from the normalizer, parser,
//! and semantic validators. Diagnostic codes are defined in the [`codes`]
//! module.

#![warn(missing_docs)]

/// Diagnostic ID constants for every message the toolchain emits.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error — the scan cannot be decoded past this point.
    Error,
    /// Warning — the element decoded but may be wrong.
    Warn,
    /// Informational note (resolved dates, check-digit confirmations, previews).
    Info,
}

/// Byte span in the normalized input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// A diagnostic message produced by the normalizer, parser, or validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"GS1101"`).
    pub code: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the normalized input this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            span,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(code, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(code, Severity::Warn, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(code, Severity::Info, message, span)
    }

    /// Returns the human-readable explanation for this diagnostic's code, if known.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.code)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(code: &str) -> Option<&'static str> {
    Some(match code {
        codes::UNEXPECTED_CHAR => {
            "An Application Identifier must start with a digit. The scan contains a \
             non-digit character where the next AI was expected; decoding stops here."
        }
        codes::UNKNOWN_AI => {
            "No registered Application Identifier of length 2, 3, or 4 matches the \
             digits at this position. The AI dictionary covers a representative \
             subset of the GS1 General Specifications."
        }
        codes::VALUE_TOO_SHORT => {
            "The matched AI declares a fixed value length, but fewer characters \
             remain in the scan. The element is dropped and decoding stops."
        }
        codes::MISSING_SEPARATOR => {
            "A recognized AI appears inside a variable-length value, which usually \
             means the scanner dropped the GS separator. Enable heuristic repair to \
             attempt recovery for the (10)/(21) case."
        }
        codes::EMPTY_VALUE => "A variable-length AI was matched but no value follows it.",
        codes::HEURISTIC_SPLIT => {
            "The input looked like a Batch/Lot (10) value with a Serial (21) element \
             fused onto it and was split at the embedded AI. Verify the resulting \
             batch and serial values against the physical label."
        }
        codes::BELOW_MIN_LENGTH => "The value is shorter than the AI's declared minimum length.",
        codes::ABOVE_MAX_LENGTH => "The value is longer than the AI's declared maximum length.",
        codes::CHAR_NOT_ALLOWED => {
            "The value contains a character outside the AI's declared character set \
             (numeric, or the GS1 alphanumeric subset)."
        }
        codes::LOWERCASE_PRESENT => {
            "Lowercase characters are present but the lowercase policy is off. This \
             often indicates a keyboard-wedge scanner with a wrong layout mapping."
        }
        codes::NOT_NUMERIC => "This AI requires an all-digit value.",
        codes::GTIN_CHECK_MISMATCH => {
            "The GTIN's final digit does not match the mod-10 check digit computed \
             from the preceding digits."
        }
        codes::GTIN_CHECK_OK => "The GTIN check digit was verified successfully.",
        codes::LENGTH_OUT_OF_BAND => {
            "Batch/Lot (10) and Serial (21) values must be 1 to 20 characters long."
        }
        codes::INVALID_DATE => {
            "The YYMMDD value does not name a real calendar date. A day of 00 is \
             allowed and means the last day of the month."
        }
        codes::DATE_RESOLVED => "The resolved calendar date for a YYMMDD value.",
        codes::QUANTITY_PREVIEW => {
            "The quantity value rescaled by the implied decimal point taken from the \
             AI's fourth digit."
        }
        codes::PRICE_PREVIEW => {
            "The price value rescaled by the implied decimal point taken from the \
             AI's fourth digit."
        }
        codes::AIM_ID_REMOVED => {
            "The scanner prepended an AIM symbology identifier (']' plus two \
             characters) which was stripped before decoding."
        }
        codes::COLLAPSED_GS => "A run of consecutive GS separators was collapsed to a single one.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_new_valid() {
        let s = Span::new(5, 10);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 10);
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    #[test]
    fn span_at_is_zero_width() {
        let s = Span::at(7);
        assert_eq!(s.start, 7);
        assert_eq!(s.end, 7);
    }

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warn), "warn");
        assert_eq!(format!("{}", Severity::Info), "info");
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(codes::UNKNOWN_AI, "Unknown AI at position 0", None);
        assert_eq!(format!("{d}"), "error[GS1102]: Unknown AI at position 0");
    }

    #[test]
    fn diagnostic_constructors_set_severity() {
        assert_eq!(
            Diagnostic::warn(codes::BELOW_MIN_LENGTH, "short", None).severity,
            Severity::Warn
        );
        assert_eq!(
            Diagnostic::info(codes::GTIN_CHECK_OK, "ok", None).severity,
            Severity::Info
        );
    }

    #[test]
    fn diagnostic_serde_roundtrip() {
        let d = Diagnostic::error(codes::VALUE_TOO_SHORT, "test message", Some(Span::new(2, 16)));
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }

    #[test]
    fn diagnostic_serde_omits_none_span() {
        let d = Diagnostic::warn(codes::LOWERCASE_PRESENT, "test", None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("span"), "None span should be omitted: {json}");
    }

    #[test]
    fn all_codes_have_explanations() {
        let all = [
            codes::UNEXPECTED_CHAR,
            codes::UNKNOWN_AI,
            codes::VALUE_TOO_SHORT,
            codes::MISSING_SEPARATOR,
            codes::EMPTY_VALUE,
            codes::HEURISTIC_SPLIT,
            codes::BELOW_MIN_LENGTH,
            codes::ABOVE_MAX_LENGTH,
            codes::CHAR_NOT_ALLOWED,
            codes::LOWERCASE_PRESENT,
            codes::NOT_NUMERIC,
            codes::GTIN_CHECK_MISMATCH,
            codes::GTIN_CHECK_OK,
            codes::LENGTH_OUT_OF_BAND,
            codes::INVALID_DATE,
            codes::DATE_RESOLVED,
            codes::QUANTITY_PREVIEW,
            codes::PRICE_PREVIEW,
            codes::AIM_ID_REMOVED,
            codes::COLLAPSED_GS,
        ];
        for code in &all {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
    }

    #[test]
    fn explain_unknown_code() {
        assert!(explain("GS9999").is_none());
    }
}
