//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

// ── Parser (fatal, result-level) ────────────────────────────────────────

/// Non-digit character where an AI was expected.
pub const UNEXPECTED_CHAR: &str = "GS1101";
/// No registered AI matches the digits at the cursor.
pub const UNKNOWN_AI: &str = "GS1102";
/// Fixed-length value runs past the end of the input.
pub const VALUE_TOO_SHORT: &str = "GS1103";
/// A recognized AI starts inside a variable-length value (missing GS).
pub const MISSING_SEPARATOR: &str = "GS1104";
/// A variable-length AI carries no value at all.
pub const EMPTY_VALUE: &str = "GS1105";

// ── Parser (non-fatal, result-level) ────────────────────────────────────

/// The (10)/(21) missing-separator repair was applied.
pub const HEURISTIC_SPLIT: &str = "GS1201";

// ── Element validation ──────────────────────────────────────────────────

/// Value shorter than the AI's minimum length.
pub const BELOW_MIN_LENGTH: &str = "GS2101";
/// Value longer than the AI's maximum length.
pub const ABOVE_MAX_LENGTH: &str = "GS2102";
/// Character outside the AI's declared character set.
pub const CHAR_NOT_ALLOWED: &str = "GS2103";
/// Lowercase characters present while the lowercase policy is off.
pub const LOWERCASE_PRESENT: &str = "GS2104";
/// Value expected to be all digits is not.
pub const NOT_NUMERIC: &str = "GS2105";
/// GTIN check digit does not match the computed one.
pub const GTIN_CHECK_MISMATCH: &str = "GS2106";
/// GTIN check digit verified.
pub const GTIN_CHECK_OK: &str = "GS2107";
/// Batch/Lot or Serial value outside the 1-20 length band.
pub const LENGTH_OUT_OF_BAND: &str = "GS2108";
/// YYMMDD month or day component out of range, or no such calendar date.
pub const INVALID_DATE: &str = "GS2109";
/// Resolved calendar date for a YYMMDD value.
pub const DATE_RESOLVED: &str = "GS2110";
/// Decimal-rescaled preview of a quantity value.
pub const QUANTITY_PREVIEW: &str = "GS2111";
/// Decimal-rescaled preview of a price value.
pub const PRICE_PREVIEW: &str = "GS2112";

// ── Normalizer ──────────────────────────────────────────────────────────

/// An AIM symbology identifier prefix was removed.
pub const AIM_ID_REMOVED: &str = "GS3101";
/// A run of repeated GS separators was collapsed to one.
pub const COLLAPSED_GS: &str = "GS3102";
