//! Shared helpers for `gs1_toolchain_core` integration tests.

#![allow(unreachable_pub)]

use gs1_toolchain_core::{ParseOptions, ParseResult, parse};
use gs1_toolchain_diagnostics::Diagnostic;

/// Parse with default options.
pub fn decode(input: &str) -> ParseResult {
    parse(input, &ParseOptions::default())
}

/// Parse with the missing-separator repair enabled.
#[allow(dead_code)]
pub fn decode_with_repair(input: &str) -> ParseResult {
    parse(
        input,
        &ParseOptions {
            heuristic_repair: true,
            ..ParseOptions::default()
        },
    )
}

/// The diagnostic codes of a slice, in order.
#[allow(dead_code)]
pub fn codes_of(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.code.as_ref()).collect()
}

/// The (ai, value) pairs of a parse result, in order.
pub fn pairs(result: &ParseResult) -> Vec<(&str, &str)> {
    result
        .elements
        .iter()
        .map(|e| (e.element.ai.as_str(), e.element.value.as_str()))
        .collect()
}
