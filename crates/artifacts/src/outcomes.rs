// In crates/artifacts/src/outcomes.rs

use crate::numeric::count_or_zero;
use crate::table::label_values;
use core_types::OutcomeCounts;

/// Parses the two-column trade-outcome table. Only the exact labels `Won` and
/// `Lost` are read; a missing label counts as zero.
pub fn parse_outcome_counts(csv_text: &str) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    for (label, count) in label_values(csv_text) {
        match label.as_str() {
            "Won" => counts.won = count_or_zero(&count),
            "Lost" => counts.lost = count_or_zero(&count),
            _ => {}
        }
    }
    counts
}
