//! `gs1` — decode, normalize, and compose GS1 scanner payloads.

mod render;

use std::io::{self, BufRead};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gs1_toolchain_core::{
    Gs1Element, NormalizationOptions, ParseOptions, compose_gs1, compose_hri,
    display_control_chars, normalize, parse,
};
use gs1_toolchain_diagnostics as diag;

use crate::render::{Format, print_normalization, print_parse};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "gs1",
    version,
    about = "GS1 toolchain — normalize, decode, and compose GS1 barcode scanner payloads"
)]
struct Cli {
    /// Output mode: "pretty" for terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Args, Debug)]
struct NormalizeFlags {
    /// Keep a leading AIM symbology identifier instead of stripping it.
    #[arg(long)]
    no_strip_aim_id: bool,
    /// Collapse runs of repeated GS separators into one.
    #[arg(long)]
    collapse_gs: bool,
    /// Extra placeholder string translated to the GS separator
    /// (repeatable; adds to the built-in set).
    #[arg(long = "gs-placeholder", value_name = "TEXT")]
    gs_placeholders: Vec<String>,
}

impl NormalizeFlags {
    fn to_options(&self) -> NormalizationOptions {
        let mut options = NormalizationOptions {
            strip_aim_id: !self.no_strip_aim_id,
            collapse_multiple_gs: self.collapse_gs,
            ..NormalizationOptions::default()
        };
        options.gs_placeholders.extend(self.gs_placeholders.iter().cloned());
        options
    }
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Normalize and decode a scan payload into validated elements.
    Decode {
        /// The raw payload. Use "-" (or omit) to read one line from stdin.
        input: Option<String>,
        /// Accept lowercase letters in alphanumeric values.
        #[arg(long)]
        allow_lowercase: bool,
        /// Attempt the (10)/(21) missing-separator repair.
        #[arg(long)]
        heuristic_repair: bool,
        #[command(flatten)]
        normalize: NormalizeFlags,
    },

    /// Normalize a scan payload and show the result without decoding.
    Normalize {
        /// The raw payload. Use "-" (or omit) to read one line from stdin.
        input: Option<String>,
        #[command(flatten)]
        normalize: NormalizeFlags,
    },

    /// Compose elements (AI=VALUE pairs) into a GS1 element string.
    Compose {
        /// Elements as AI=VALUE, in output order.
        #[arg(required = true, value_name = "AI=VALUE")]
        elements: Vec<String>,
        /// Emit the literal GS control character instead of the visible
        /// `<GS>` token.
        #[arg(long)]
        raw: bool,
    },

    /// Compose elements into the human-readable (AI)value form.
    Hri {
        /// Elements as AI=VALUE, in output order.
        #[arg(required = true, value_name = "AI=VALUE")]
        elements: Vec<String>,
    },

    /// Explain a diagnostic code (e.g., GS1104).
    Explain {
        /// The diagnostic code to explain.
        code: String,
    },
}

// ── Entry point ─────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(error) => {
            eprintln!("error: {error:#}");
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let format = Format::resolve_or_detect(cli.output.as_deref());
    match cli.cmd {
        Cmd::Decode {
            input,
            allow_lowercase,
            heuristic_repair,
            normalize: flags,
        } => {
            let raw = read_payload(input.as_deref())?;
            let normalization = normalize(&raw, &flags.to_options());
            let options = ParseOptions {
                allow_lowercase,
                heuristic_repair,
            };
            let result = parse(&normalization.normalized, &options);
            match format {
                Format::Json => {
                    let envelope = serde_json::json!({
                        "normalization": normalization,
                        "parse": result,
                    });
                    println!("{}", serde_json::to_string_pretty(&envelope)?);
                }
                Format::Pretty => {
                    print_normalization(&normalization);
                    print_parse(&normalization.normalized, &result);
                }
            }
            Ok(if result.success() { 0 } else { 1 })
        }

        Cmd::Normalize {
            input,
            normalize: flags,
        } => {
            let raw = read_payload(input.as_deref())?;
            let result = normalize(&raw, &flags.to_options());
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                Format::Pretty => print_normalization(&result),
            }
            Ok(0)
        }

        Cmd::Compose { elements, raw } => {
            let elements = parse_element_args(&elements)?;
            let composed = compose_gs1(&elements);
            if raw {
                println!("{composed}");
            } else {
                println!("{}", display_control_chars(&composed));
            }
            Ok(0)
        }

        Cmd::Hri { elements } => {
            let elements = parse_element_args(&elements)?;
            println!("{}", compose_hri(&elements));
            Ok(0)
        }

        Cmd::Explain { code } => {
            let code = code.to_ascii_uppercase();
            match diag::explain(&code) {
                Some(explanation) => {
                    println!("{code}: {explanation}");
                    Ok(0)
                }
                None => bail!("unknown diagnostic code '{code}'"),
            }
        }
    }
}

/// Read the payload from the positional argument, or one line from stdin
/// when it is `-` or absent.
fn read_payload(input: Option<&str>) -> Result<String> {
    match input {
        Some(text) if text != "-" => Ok(text.to_string()),
        _ => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("reading payload from stdin")?;
            Ok(line)
        }
    }
}

/// Parse `AI=VALUE` arguments into elements, preserving order.
fn parse_element_args(args: &[String]) -> Result<Vec<Gs1Element>> {
    args.iter()
        .map(|arg| {
            let Some((ai, value)) = arg.split_once('=') else {
                bail!("element '{arg}' is not in AI=VALUE form");
            };
            if ai.is_empty() || !ai.chars().all(|c| c.is_ascii_digit()) {
                bail!("element '{arg}' has a non-numeric AI");
            }
            Ok(Gs1Element::new(ai, value))
        })
        .collect()
}
