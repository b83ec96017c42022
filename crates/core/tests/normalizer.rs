//! Integration tests for scan input normalization.

mod common;

use common::{decode, pairs};
use gs1_toolchain_core::{GS, NormalizationOptions, normalize};
use gs1_toolchain_diagnostics::codes;

fn normalize_default(raw: &str) -> String {
    normalize(raw, &NormalizationOptions::default()).normalized
}

// ── AIM symbology identifier ────────────────────────────────────────────

#[test]
fn aim_id_detected_and_stripped() {
    let result = normalize("]d20112345678901231", &NormalizationOptions::default());
    assert_eq!(result.symbology_id.as_deref(), Some("]d2"));
    assert_eq!(result.normalized, "0112345678901231");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, codes::AIM_ID_REMOVED);
    assert!(result.warnings[0].message.contains("]d2"));
}

#[test]
fn aim_id_kept_when_strip_disabled() {
    let options = NormalizationOptions {
        strip_aim_id: false,
        ..NormalizationOptions::default()
    };
    let result = normalize("]C10112", &options);
    assert_eq!(result.symbology_id.as_deref(), Some("]C1"));
    assert!(result.normalized.starts_with("]C1"));
    assert!(result.warnings.is_empty());
}

#[test]
fn bare_bracket_is_not_an_aim_id() {
    let result = normalize("] 10ABC", &NormalizationOptions::default());
    assert_eq!(result.symbology_id, None);
}

// ── Separator placeholders ──────────────────────────────────────────────

#[test]
fn configured_placeholder_becomes_gs() {
    assert_eq!(
        normalize_default("10ABC123<GS>21XYZ1"),
        format!("10ABC123{GS}21XYZ1")
    );
}

#[test]
fn placeholder_matching_is_case_insensitive() {
    assert_eq!(normalize_default("10A<gs>21B"), format!("10A{GS}21B"));
    assert_eq!(normalize_default("10A[Gs]21B"), format!("10A{GS}21B"));
}

#[test]
fn all_default_placeholder_spellings() {
    for placeholder in [
        "<GS>", "[GS]", "{GS}", "(GS)", "\\u001D", "\\x1D", "\\035", "&#29;", "%1D",
    ] {
        let raw = format!("10A{placeholder}21B");
        assert_eq!(
            normalize_default(&raw),
            format!("10A{GS}21B"),
            "placeholder {placeholder:?} not translated"
        );
    }
}

#[test]
fn builtin_escapes_lowercase() {
    assert_eq!(normalize_default("10A\\x1d21B"), format!("10A{GS}21B"));
    assert_eq!(normalize_default("10A%1d21B"), format!("10A{GS}21B"));
}

#[test]
fn octal_escape_with_extra_zeros() {
    assert_eq!(normalize_default("10A\\0035Z"), format!("10A{GS}Z"));
}

#[test]
fn octal_escape_for_other_values_untouched() {
    assert_eq!(normalize_default("10A\\04721B"), "10A\\04721B");
}

#[test]
fn literal_separator_passes_through() {
    let raw = format!("10A{GS}21B");
    assert_eq!(normalize_default(&raw), raw);
}

// ── Framing noise ───────────────────────────────────────────────────────

#[test]
fn trailing_control_run_is_stripped() {
    assert_eq!(normalize_default("10ABC\r\n\0\u{03}"), "10ABC");
}

#[test]
fn interior_controls_survive_suffix_strip() {
    // An interior CR is not framing; it stays (and will fail in the parser).
    let result = normalize_default("10A\rB\r\n");
    assert_eq!(result, "10A\rB");
}

#[test]
fn tabs_removed_everywhere() {
    assert_eq!(normalize_default("10\tAB\tC"), "10ABC");
}

#[test]
fn nbsp_translated_then_trimmed_at_ends() {
    assert_eq!(normalize_default("\u{a0}10ABC\u{a0}"), "10ABC");
    // Interior NBSP becomes a plain space.
    assert_eq!(normalize_default("10A\u{a0}B"), "10A B");
}

#[test]
fn surrounding_whitespace_trimmed() {
    assert_eq!(normalize_default("  10ABC \r\n"), "10ABC");
}

// ── Separator cleanup ───────────────────────────────────────────────────

#[test]
fn leading_separators_are_stripped() {
    let raw = format!("{GS}{GS}10ABC");
    assert_eq!(normalize_default(&raw), "10ABC");
}

#[test]
fn gs_runs_collapse_only_when_enabled() {
    let raw = format!("10A{GS}{GS}21B");
    assert_eq!(normalize_default(&raw), raw);

    let options = NormalizationOptions {
        collapse_multiple_gs: true,
        ..NormalizationOptions::default()
    };
    let result = normalize(&raw, &options);
    assert_eq!(result.normalized, format!("10A{GS}21B"));
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, codes::COLLAPSED_GS);
}

#[test]
fn collapse_without_runs_emits_no_warning() {
    let options = NormalizationOptions {
        collapse_multiple_gs: true,
        ..NormalizationOptions::default()
    };
    let result = normalize(&format!("10A{GS}21B"), &options);
    assert!(result.warnings.is_empty());
}

// ── General behaviour ───────────────────────────────────────────────────

#[test]
fn raw_input_is_preserved_verbatim() {
    let raw = "]d210ABC<GS>21X\r\n";
    let result = normalize(raw, &NormalizationOptions::default());
    assert_eq!(result.raw, raw);
}

#[test]
fn normalization_is_idempotent() {
    for raw in [
        "]d210ABC<GS>21XYZ1\r\n",
        "  0112345678901231 ",
        "10A\\x1D21B",
        "",
    ] {
        let once = normalize_default(raw);
        assert_eq!(normalize_default(&once), once, "not idempotent for {raw:?}");
    }
}

#[test]
fn empty_and_noise_only_input_degrade_to_empty() {
    assert_eq!(normalize_default(""), "");
    assert_eq!(normalize_default(" \r\n"), "");
    let parsed = decode(&normalize_default(" \r\n"));
    assert!(parsed.success());
    assert!(parsed.elements.is_empty());
}

// ── Pipeline: normalize then parse ──────────────────────────────────────

#[test]
fn placeholder_input_parses_without_heuristics() {
    let normalized = normalize_default("10ABC123<GS>21XYZ1");
    let result = decode(&normalized);
    assert!(result.success(), "errors: {:?}", result.errors);
    assert_eq!(pairs(&result), vec![("10", "ABC123"), ("21", "XYZ1")]);
    assert!(!result.heuristics_applied);
}

#[test]
fn scanner_frame_decodes_end_to_end() {
    let normalized = normalize_default("]d201012345678901281727120010BATCH7\r\n");
    let result = decode(&normalized);
    assert!(result.success(), "errors: {:?}", result.errors);
    assert_eq!(
        pairs(&result),
        vec![("01", "01234567890128"), ("17", "271200"), ("10", "BATCH7")]
    );
}
