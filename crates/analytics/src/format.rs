//! Display formatting for dashboard and terminal output.

/// Format a percentage with two decimals. NaN renders as `0.00%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        return "0.00%".to_string();
    }
    format!("{value:.2}%")
}

/// Format a dollar amount rounded to whole dollars with thousands separators.
#[must_use]
pub fn format_dollars(value: f64) -> String {
    if value.is_nan() {
        return "$0".to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Format a number with `decimals` places.
#[must_use]
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Format an optional number, `N/A` when absent.
#[must_use]
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format_number(v, decimals))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
