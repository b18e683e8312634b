// In crates/artifacts/src/numeric.rs

//! Lenient number reading: the leading numeric prefix of a cell is taken and
//! everything after it is ignored, so `"2 (20.00%)"` reads as `2`.

use std::sync::OnceLock;

use regex::Regex;

fn float_prefix() -> &'static Regex {
    static FLOAT_PREFIX: OnceLock<Regex> = OnceLock::new();
    FLOAT_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("float prefix regex is valid")
    })
}

fn int_prefix() -> &'static Regex {
    static INT_PREFIX: OnceLock<Regex> = OnceLock::new();
    INT_PREFIX.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("int prefix regex is valid"))
}

/// Reads the leading floating-point number of `text`.
pub fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let m = float_prefix().find(text)?;
    let literal = m.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse().ok(),
    }
}

/// Reads the leading integer of `text`; a fractional part is ignored.
pub fn leading_int(text: &str) -> Option<i64> {
    int_prefix().find(text.trim_start())?.as_str().parse().ok()
}

/// Converts a parsed number into a trade count. Negative or non-finite values are not counts.
pub fn to_count(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Leading float or `0`, the zero-fill used by the tabular artifacts.
pub fn float_or_zero(text: &str) -> f64 {
    leading_float(text).unwrap_or(0.0)
}

/// Leading count or `0`.
pub fn count_or_zero(text: &str) -> u32 {
    leading_float(text).and_then(to_count).unwrap_or(0)
}
