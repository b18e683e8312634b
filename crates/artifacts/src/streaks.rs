// In crates/artifacts/src/streaks.rs

use crate::numeric::count_or_zero;
use crate::table::label_values;
use core_types::Streaks;

/// Parses the streak table. All four streak fields are always populated; labels
/// that do not appear leave their field at zero.
pub fn parse_streaks(csv_text: &str) -> Streaks {
    let mut current_win = 0;
    let mut longest_win = 0;
    let mut current_loss = 0;
    let mut longest_loss = 0;

    for (label, value) in label_values(csv_text) {
        match label.as_str() {
            "Won (Current)" => current_win = count_or_zero(&value),
            "Won (Longest)" => longest_win = count_or_zero(&value),
            "Lost (Current)" => current_loss = count_or_zero(&value),
            "Lost (Longest)" => longest_loss = count_or_zero(&value),
            _ => {}
        }
    }

    Streaks {
        current_win: Some(current_win),
        longest_win: Some(longest_win),
        current_loss: Some(current_loss),
        longest_loss: Some(longest_loss),
    }
}
