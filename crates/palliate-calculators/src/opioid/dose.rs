use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Shown in place of a value that is not a finite number.
pub const PLACEHOLDER: &str = "-";

/// A dose as entered: a JSON number, free text from an input box, or
/// anything else a client sends (`null`, a boolean), which has no reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum DoseInput {
    Amount(f64),
    Text(String),
    Other(serde_json::Value),
}

impl DoseInput {
    /// The raw numeric reading of this input, if any.
    pub fn parse(&self) -> Option<f64> {
        match self {
            DoseInput::Amount(value) => Some(*value),
            DoseInput::Text(text) => parse_float_prefix(text),
            DoseInput::Other(_) => None,
        }
    }

    /// The daily dose this input stands for; unreadable input reads as 0.
    pub fn daily_dose(&self) -> f64 {
        sanitize_dose(self.parse().unwrap_or(0.0))
    }
}

impl Default for DoseInput {
    fn default() -> Self {
        DoseInput::Amount(0.0)
    }
}

/// Read the longest leading decimal number in `input`, the way a browser's
/// `parseFloat` does: leading whitespace is skipped, trailing junk ignored.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    if s[pos..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = "";
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &s[pos..end];
        }
    }

    let normalized = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent,
    );
    normalized.parse().ok()
}

/// Parse a daily dose from text. Unreadable, negative, and non-finite input
/// all read as 0.
pub fn parse_daily_dose(input: &str) -> f64 {
    sanitize_dose(parse_float_prefix(input).unwrap_or(0.0))
}

/// Clamp a dose to the finite, non-negative domain of the converters.
pub fn sanitize_dose(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Fixed-point rendering for display, or [`PLACEHOLDER`] for NaN/infinity.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // Avoid printing "-0.0".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.decimals$}")
}
