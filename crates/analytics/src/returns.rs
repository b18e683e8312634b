// In crates/analytics/src/returns.rs

use crate::types::ReturnProjection;
use core_types::PerformancePoint;

/// Largest principal accepted by [`parse_principal`].
pub const MAX_PRINCIPAL: f64 = 1_000_000.0;

/// Sum of the periodic returns, in percent.
pub fn project_simple(series: &[PerformancePoint]) -> f64 {
    series.iter().map(|p| p.performance).sum()
}

/// Chained growth of the periodic returns in series order, in percent.
pub fn project_compound(series: &[PerformancePoint]) -> f64 {
    let growth: f64 = series.iter().map(|p| 1.0 + p.performance / 100.0).product();
    (growth - 1.0) * 100.0
}

/// Dollar return of `amount` at `rate` percent. Losses are floored at zero.
pub fn project_return(amount: f64, rate: f64) -> f64 {
    (amount * rate / 100.0).max(0.0)
}

impl ReturnProjection {
    pub fn compute(series: &[PerformancePoint], amount: f64) -> Self {
        let simple_rate = project_simple(series);
        let compound_rate = project_compound(series);
        Self {
            amount,
            simple_rate,
            compound_rate,
            simple_return: project_return(amount, simple_rate),
            compound_return: project_return(amount, compound_rate),
        }
    }
}

/// Reads a principal typed as free text such as `$1,500`.
///
/// Every non-digit character is dropped first. Empty input is a zero principal;
/// anything above [`MAX_PRINCIPAL`] is rejected.
pub fn parse_principal(input: &str) -> Option<f64> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Some(0.0);
    }
    let amount: f64 = digits.parse().ok()?;
    (amount <= MAX_PRINCIPAL).then_some(amount)
}
