//! GS1 toolchain core library.
//!
//! Decodes raw text captured from barcode scanners (GS1 DataMatrix/GS1-128
//! payloads) into validated Application-Identifier/value pairs, and composes
//! element lists back into separator-delimited strings. The main entry
//! points are [`normalize`] for scan cleanup, [`parse`] for decoding, and
//! [`compose_gs1`]/[`compose_hri`] for the inverse transform.
//!
//! All operations are pure, synchronous functions over in-memory strings.
//! The AI dictionary is built once on first use and is safe for concurrent
//! reads.

#![warn(missing_docs)]

/// Character-set policy for AI values.
pub mod charset;
/// Composers: element list back to wire or human-readable text.
pub mod compose;
/// Static Application Identifier dictionary.
pub mod dictionary;
/// Raw scan input normalization.
pub mod normalize;
/// Tokenizing parser and semantic validation.
pub mod parse;

/// The ASCII Group Separator control character (decimal 29) terminating
/// variable-length values.
pub const GS: char = '\u{1d}';

// ── Convenience re-exports ──────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Normalizer
pub use normalize::{DEFAULT_GS_PLACEHOLDERS, NormalizationOptions, NormalizationResult, normalize};

// Parser
pub use parse::{Gs1Element, ParseOptions, ParseResult, ParsedElement, parse};

// Dictionary
pub use charset::CharacterSet;
pub use dictionary::{AiDefinition, AiMatch, lookup, match_at};

// Composer
pub use compose::{compose_gs1, compose_hri, display_control_chars};

// Diagnostics (re-exported from the diagnostics crate)
pub use gs1_toolchain_diagnostics::{Diagnostic, Severity, Span, codes};
