//! Terminal rendering for decode results.
//!
//! Pretty mode writes a human-oriented element listing with caret-annotated
//! diagnostics for the single-line scan source. JSON mode is the
//! machine-readable fallback and the default when stdout is piped.

use std::io::{self, IsTerminal};

use gs1_toolchain_core::{NormalizationResult, ParseResult, display_control_chars};
use gs1_toolchain_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for result rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human-oriented terminal output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve an explicit `--output` choice, defaulting to pretty for
    /// interactive terminals and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Print the normalization summary: the cleaned text (controls made
/// visible), the symbology id if any, and normalization notes.
pub(crate) fn print_normalization(result: &NormalizationResult) {
    println!("normalized: {}", display_control_chars(&result.normalized));
    if let Some(id) = &result.symbology_id {
        println!("symbology:  {id}");
    }
    for warning in &result.warnings {
        println!("{warning}");
    }
}

/// Print the decoded element listing and all diagnostics.
///
/// `source` is the normalized text the parse ran over; spans in the
/// diagnostics refer to it.
pub(crate) fn print_parse(source: &str, result: &ParseResult) {
    for element in &result.elements {
        let title = element
            .definition
            .as_ref()
            .map_or("unknown AI", |def| def.description.as_str());
        let validity = if element.valid { "ok" } else { "INVALID" };
        println!(
            "({}) {:<24} {title} [{validity}]",
            element.element.ai,
            display_control_chars(&element.element.value),
        );
        for warning in &element.warnings {
            println!("     {warning}");
        }
    }
    if result.heuristics_applied {
        println!("note: heuristic repair was applied");
    }
    render_diagnostics(source, &result.warnings);
    render_diagnostics(source, &result.errors);
    let summary = if result.success() { "ok" } else { "failed" };
    println!(
        "decode {summary}: {} element(s), {} error(s), {} warning(s)",
        result.elements.len(),
        result.errors.len(),
        result.warnings.len()
    );
}

/// Render result-level diagnostics, with a caret line under the scan text
/// for any diagnostic that carries a span.
pub(crate) fn render_diagnostics(source: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
        if let Some(span) = diagnostic.span {
            let visible = display_control_chars(source);
            // Control tokens widen the line; recompute the caret column on
            // the visible form.
            let caret = display_control_chars(&source[..span.start.min(source.len())])
                .chars()
                .count();
            eprintln!("  | {visible}");
            eprintln!("  | {}^", " ".repeat(caret));
        }
        if diagnostic.severity == Severity::Error
            && let Some(explanation) = diagnostic.explain()
        {
            eprintln!("  = {explanation}");
        }
    }
}
