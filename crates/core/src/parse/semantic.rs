//! Per-AI semantic validation, dispatched after character-set checks.
//!
//! Validators only ever append warnings or info notes to the element; they
//! never stop the scan, and they never panic on non-digit content even when
//! the character-set pass already flagged it.

use chrono::NaiveDate;

use gs1_toolchain_diagnostics::{Diagnostic, codes};

use super::ParsedElement;

/// Run the semantic rule for the element's AI, if one exists.
pub(super) fn apply(element: &mut ParsedElement) {
    let ai = element.element.ai.clone();
    match ai.as_str() {
        "01" => validate_gtin(element),
        "10" => validate_length_band(element, 1, 20, "Batch/Lot"),
        "21" => validate_length_band(element, 1, 20, "Serial"),
        "11" | "12" | "13" | "15" | "16" | "17" => validate_date(element),
        _ => {
            if ["31", "32", "33", "34"].iter().any(|p| ai.starts_with(p)) {
                preview_quantity(element, &ai);
            } else if ai.starts_with("392") || ai.starts_with("393") {
                validate_price(element, &ai);
            }
        }
    }
}

/// Mod-10 check digit over an all-digit body, alternating weights 3 and 1
/// starting from the rightmost digit.
fn mod10_check_digit(body: &str) -> u32 {
    let mut sum = 0;
    for (i, c) in body.chars().rev().enumerate() {
        let digit = c.to_digit(10).unwrap_or(0);
        sum += if i % 2 == 0 { digit * 3 } else { digit };
    }
    (10 - sum % 10) % 10
}

fn validate_gtin(element: &mut ParsedElement) {
    let value = element.element.value.clone();
    if !value.chars().all(|c| c.is_ascii_digit()) || value.is_empty() {
        element.add_warning(Diagnostic::warn(codes::NOT_NUMERIC, "GTIN must be numeric", None));
        element.mark_invalid();
        return;
    }
    let supplied = value.chars().last().and_then(|c| c.to_digit(10)).unwrap_or(0);
    let calculated = mod10_check_digit(&value[..value.len() - 1]);
    if supplied == calculated {
        element.add_warning(Diagnostic::info(
            codes::GTIN_CHECK_OK,
            "GTIN check digit OK",
            None,
        ));
    } else {
        element.add_warning(Diagnostic::warn(
            codes::GTIN_CHECK_MISMATCH,
            format!("GTIN check digit mismatch: expected {supplied} calculated {calculated}"),
            None,
        ));
        element.mark_invalid();
    }
}

/// Batch/Lot and Serial carry a 1-20 length band independent of the
/// dictionary bounds.
fn validate_length_band(element: &mut ParsedElement, min: usize, max: usize, label: &str) {
    let length = element.element.value.chars().count();
    if length < min || length > max {
        element.add_warning(Diagnostic::warn(
            codes::LENGTH_OUT_OF_BAND,
            format!("{label} length must be between {min} and {max}"),
            None,
        ));
        element.mark_invalid();
    }
}

/// YYMMDD with day 00 meaning "last day of the month".
fn validate_date(element: &mut ParsedElement) {
    let value = element.element.value.clone();
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
        element.add_warning(Diagnostic::warn(
            codes::NOT_NUMERIC,
            "Date contains non-numeric characters",
            None,
        ));
        element.mark_invalid();
        return;
    }
    let year = 2000 + value[0..2].parse::<i32>().unwrap_or(0);
    let month = value[2..4].parse::<u32>().unwrap_or(0);
    let day = value[4..6].parse::<u32>().unwrap_or(0);
    if !(1..=12).contains(&month) {
        element.add_warning(Diagnostic::warn(
            codes::INVALID_DATE,
            format!("Month out of range: {month}"),
            None,
        ));
        element.mark_invalid();
        return;
    }
    if day > 31 {
        element.add_warning(Diagnostic::warn(
            codes::INVALID_DATE,
            format!("Day out of range: {day}"),
            None,
        ));
        element.mark_invalid();
        return;
    }
    let resolved = if day == 0 {
        last_day_of_month(year, month)
    } else {
        NaiveDate::from_ymd_opt(year, month, day)
    };
    match resolved {
        Some(date) => element.add_warning(Diagnostic::info(
            codes::DATE_RESOLVED,
            format!("Date: {date}"),
            None,
        )),
        None => {
            element.add_warning(Diagnostic::warn(
                codes::INVALID_DATE,
                format!("Invalid date: {value}"),
                None,
            ));
            element.mark_invalid();
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Quantity AIs carry an implied decimal point; the trailing AI digit says
/// how many places. Informational only, no validity rule.
fn preview_quantity(element: &mut ParsedElement, ai: &str) {
    let Some(decimals) = ai.chars().nth(3).and_then(|c| c.to_digit(10)) else {
        return;
    };
    let scaled = scaled_value(&element.element.value, decimals as usize);
    element.add_warning(Diagnostic::info(
        codes::QUANTITY_PREVIEW,
        format!("Quantity: {scaled}"),
        None,
    ));
}

fn validate_price(element: &mut ParsedElement, ai: &str) {
    let value = element.element.value.clone();
    if !value.chars().all(|c| c.is_ascii_digit()) {
        element.add_warning(Diagnostic::warn(
            codes::NOT_NUMERIC,
            "Price contains non-numeric characters",
            None,
        ));
        element.mark_invalid();
        return;
    }
    let Some(decimals) = ai.chars().nth(3).and_then(|c| c.to_digit(10)) else {
        return;
    };
    let decimals = decimals as usize;
    if value.len() > decimals {
        let integral = &value[..value.len() - decimals];
        let preview = if decimals > 0 {
            format!("{integral}.{}", &value[value.len() - decimals..])
        } else {
            integral.to_string()
        };
        element.add_warning(Diagnostic::info(
            codes::PRICE_PREVIEW,
            format!("Price preview: {preview}"),
            None,
        ));
    }
}

/// Rescale an all-digit value by `decimals` implied decimal places. Non-digit
/// values come back unchanged.
fn scaled_value(raw: &str, decimals: usize) -> String {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) || decimals == 0 {
        return raw.to_string();
    }
    if raw.len() <= decimals {
        format!("0.{}{raw}", "0".repeat(decimals - raw.len()))
    } else {
        format!("{}.{}", &raw[..raw.len() - decimals], &raw[raw.len() - decimals..])
    }
}
