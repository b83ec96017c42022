//! CLI tests for the `gs1 compose`, `gs1 hri`, and `gs1 explain` subcommands.

use std::process::Command;

use assert_cmd::cargo;

fn gs1_cmd() -> Command {
    Command::new(cargo::cargo_bin!("gs1"))
}

#[test]
fn compose_renders_visible_gs_by_default() {
    let output = gs1_cmd()
        .args(["compose", "10=ABC123", "21=XYZ1"])
        .output()
        .expect("run compose");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "10ABC123<GS>21XYZ1");
}

#[test]
fn compose_raw_emits_control_character() {
    let output = gs1_cmd()
        .args(["compose", "--raw", "10=ABC123", "21=XYZ1"])
        .output()
        .expect("run compose");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "10ABC123\u{1d}21XYZ1");
}

#[test]
fn compose_rejects_malformed_element() {
    let output = gs1_cmd()
        .args(["compose", "10ABC"])
        .output()
        .expect("run compose");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AI=VALUE"), "stderr: {stderr}");
}

#[test]
fn hri_renders_parenthesized_form() {
    let output = gs1_cmd()
        .args(["hri", "01=01234567890128", "10=BATCH7"])
        .output()
        .expect("run hri");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "(01)01234567890128(10)BATCH7");
}

#[test]
fn explain_known_code() {
    let output = gs1_cmd()
        .args(["explain", "gs1104"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("GS1104:"), "stdout: {stdout}");
    assert!(stdout.contains("separator"), "stdout: {stdout}");
}

#[test]
fn explain_unknown_code_fails() {
    let output = gs1_cmd()
        .args(["explain", "GS9999"])
        .output()
        .expect("run explain");
    assert_eq!(output.status.code(), Some(2));
}
