//! CLI tests for the `gs1 decode` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn gs1_cmd() -> Command {
    Command::new(cargo::cargo_bin!("gs1"))
}

#[test]
fn decode_valid_payload_exits_zero() {
    let output = gs1_cmd()
        .args(["decode", "--output", "json", "0112345678901231"])
        .output()
        .expect("run decode");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn decode_json_envelope_shape() {
    let output = gs1_cmd()
        .args(["decode", "--output", "json", "0112345678901231"])
        .output()
        .expect("run decode");
    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(envelope["parse"]["errors"].as_array().map(Vec::len), Some(0));
    let elements = envelope["parse"]["elements"].as_array().expect("elements");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0]["element"]["ai"], "01");
    assert_eq!(elements[0]["element"]["value"], "12345678901231");
    assert_eq!(envelope["normalization"]["normalized"], "0112345678901231");
}

#[test]
fn decode_failure_exits_one() {
    let output = gs1_cmd()
        .args(["decode", "--output", "json", "garbage"])
        .output()
        .expect("run decode");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn decode_strips_aim_id_and_placeholder() {
    let output = gs1_cmd()
        .args(["decode", "--output", "json", "]d210ABC<GS>21XYZ1"])
        .output()
        .expect("run decode");
    assert!(output.status.success());
    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(envelope["normalization"]["symbology_id"], "]d2");
    let elements = envelope["parse"]["elements"].as_array().expect("elements");
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[1]["element"]["ai"], "21");
}

#[test]
fn decode_heuristic_repair_flag() {
    let output = gs1_cmd()
        .args([
            "decode",
            "--output",
            "json",
            "--heuristic-repair",
            "10ABC21XYZ1",
        ])
        .output()
        .expect("run decode");
    assert!(output.status.success());
    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(envelope["parse"]["heuristics_applied"], true);
    let elements = envelope["parse"]["elements"].as_array().expect("elements");
    assert_eq!(elements[0]["element"]["value"], "ABC");
    assert_eq!(elements[1]["element"]["value"], "XYZ1");
}

#[test]
fn decode_dash_reads_stdin() {
    // Closed stdin yields an empty payload, which decodes to zero elements.
    let output = gs1_cmd()
        .args(["decode", "--output", "json", "-"])
        .output()
        .expect("run decode");
    assert!(output.status.success());
    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(envelope["parse"]["elements"].as_array().map(Vec::len), Some(0));
}
