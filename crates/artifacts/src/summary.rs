// In crates/artifacts/src/summary.rs

use crate::numeric::{leading_float, to_count};
use core_types::{Field, Streaks, TickerPerformance};
use regex::Regex;
use std::sync::OnceLock;

/// Metrics read from a `summary.txt` block.
///
/// `None` means the label never appeared; `Some(Field::ZeroFilled)` means it
/// appeared with a value that was not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryFields {
    pub sharpe: Option<Field<f64>>,
    pub total_trades: Option<Field<u32>>,
    pub won_trades: Option<Field<u32>>,
    pub lost_trades: Option<Field<u32>>,
    pub win_rate: Option<Field<f64>>,
    pub net_pnl: Option<Field<f64>>,
    pub gross_pnl: Option<Field<f64>>,
    pub current_win_streak: Option<Field<u32>>,
    pub longest_win_streak: Option<Field<u32>>,
    pub current_loss_streak: Option<Field<u32>>,
    pub longest_loss_streak: Option<Field<u32>>,
}

impl SummaryFields {
    pub fn streaks(&self) -> Streaks {
        Streaks {
            current_win: self.current_win_streak.map(Field::into_value),
            longest_win: self.longest_win_streak.map(Field::into_value),
            current_loss: self.current_loss_streak.map(Field::into_value),
            longest_loss: self.longest_loss_streak.map(Field::into_value),
        }
    }

    /// Writes every present field into `record`, zero-filling unparsable ones.
    /// Fields absent from the summary leave the record untouched.
    pub fn apply_to(&self, record: &mut TickerPerformance) {
        fn set<T: Default + Copy>(slot: &mut Option<T>, field: Option<Field<T>>) {
            if let Some(field) = field {
                *slot = Some(field.into_value());
            }
        }

        set(&mut record.sharpe, self.sharpe);
        set(&mut record.total_trades, self.total_trades);
        set(&mut record.won_trades, self.won_trades);
        set(&mut record.lost_trades, self.lost_trades);
        set(&mut record.win_rate, self.win_rate);
        set(&mut record.net_pnl, self.net_pnl);
        set(&mut record.gross_pnl, self.gross_pnl);
        set(&mut record.streaks.current_win, self.current_win_streak);
        set(&mut record.streaks.longest_win, self.longest_win_streak);
        set(&mut record.streaks.current_loss, self.current_loss_streak);
        set(&mut record.streaks.longest_loss, self.longest_loss_streak);
    }
}

fn count_with_percent() -> &'static Regex {
    static WON_PATTERN: OnceLock<Regex> = OnceLock::new();
    WON_PATTERN.get_or_init(|| {
        Regex::new(r"(\d+\.?\d*)\s*\((\d+\.?\d*)%\)").expect("won trades regex is valid")
    })
}

fn float_field(value: &str) -> Field<f64> {
    Field::from_option(leading_float(value))
}

fn count_field(value: &str) -> Field<u32> {
    Field::from_option(leading_float(value).and_then(to_count))
}

/// Parses a free-form summary block with one `<Label>: <value>` metric per line.
///
/// Lines are independent of each other, so their order does not matter; when a
/// label repeats, the last occurrence wins.
pub fn parse_summary(text: &str) -> SummaryFields {
    let mut fields = SummaryFields::default();

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };

        match label.trim() {
            "Sharpe Ratio" => fields.sharpe = Some(float_field(value)),
            "Total Trades" => fields.total_trades = Some(count_field(value)),
            "Won Trades" => match count_with_percent().captures(value) {
                Some(caps) => {
                    fields.won_trades = Some(count_field(&caps[1]));
                    fields.win_rate = Some(float_field(&caps[2]));
                }
                None => fields.won_trades = Some(count_field(value)),
            },
            "Lost Trades" => fields.lost_trades = Some(count_field(value)),
            "Net PnL" => fields.net_pnl = Some(float_field(value)),
            "Gross PnL" => fields.gross_pnl = Some(float_field(value)),
            "Current Win Streak" => fields.current_win_streak = Some(count_field(value)),
            "Longest Win Streak" => fields.longest_win_streak = Some(count_field(value)),
            "Current Loss Streak" => fields.current_loss_streak = Some(count_field(value)),
            "Longest Loss Streak" => fields.longest_loss_streak = Some(count_field(value)),
            _ => {}
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Symbol;

    const DRIVER_SUMMARY: &str = "Backtest Results Summary
======================

Generated on: 2024-11-20 10:15:02

Sharpe Ratio: 1.2345

Total Trades: 10
Won Trades: 8 (80.00%)
Lost Trades: 2 (20.00%)

Gross PnL: 1520.5
Net PnL: 1432.25

Current Win Streak: 3
Longest Win Streak: 5
Current Loss Streak: 0
Longest Loss Streak: 1
";

    #[test]
    fn reads_sharpe_and_won_trades_with_percent() {
        let fields = parse_summary("Sharpe Ratio: 1.5\nWon Trades: 8 (80%)\n");
        assert_eq!(fields.sharpe, Some(Field::Parsed(1.5)));
        assert_eq!(fields.won_trades, Some(Field::Parsed(8)));
        assert_eq!(fields.win_rate, Some(Field::Parsed(80.0)));
        assert_eq!(fields.total_trades, None);
        assert_eq!(fields.net_pnl, None);
    }

    #[test]
    fn reads_a_full_driver_summary() {
        let fields = parse_summary(DRIVER_SUMMARY);
        assert_eq!(fields.sharpe, Some(Field::Parsed(1.2345)));
        assert_eq!(fields.total_trades, Some(Field::Parsed(10)));
        assert_eq!(fields.lost_trades, Some(Field::Parsed(2)));
        assert_eq!(fields.gross_pnl, Some(Field::Parsed(1520.5)));
        assert_eq!(fields.net_pnl, Some(Field::Parsed(1432.25)));
        assert_eq!(
            fields.streaks(),
            Streaks {
                current_win: Some(3),
                longest_win: Some(5),
                current_loss: Some(0),
                longest_loss: Some(1),
            }
        );
    }

    #[test]
    fn line_order_does_not_matter() {
        let mut lines: Vec<&str> = DRIVER_SUMMARY.lines().collect();
        let forward = parse_summary(&lines.join("\n"));
        lines.reverse();
        let backward = parse_summary(&lines.join("\n"));
        lines.rotate_left(5);
        let rotated = parse_summary(&lines.join("\n"));

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn unparsable_values_are_zero_filled() {
        let fields = parse_summary("Sharpe Ratio: None\nNet PnL: n/a\nTotal Trades: -4\n");
        assert_eq!(fields.sharpe, Some(Field::ZeroFilled));
        assert_eq!(fields.net_pnl, Some(Field::ZeroFilled));
        assert_eq!(fields.total_trades, Some(Field::ZeroFilled));

        let mut record = TickerPerformance::new(Symbol::new("GME"));
        fields.apply_to(&mut record);
        assert_eq!(record.sharpe, Some(0.0));
        assert_eq!(record.net_pnl, Some(0.0));
        assert_eq!(record.won_trades, None);
    }

    #[test]
    fn won_trades_without_percent_keeps_win_rate_absent() {
        let fields = parse_summary("Won Trades: 7\n");
        assert_eq!(fields.won_trades, Some(Field::Parsed(7)));
        assert_eq!(fields.win_rate, None);
    }

    #[test]
    fn last_occurrence_wins_and_noise_is_ignored() {
        let fields = parse_summary("Sharpe Ratio: 0.5\nrandom text\nFoo: 3\nSharpe Ratio: 0.9\n");
        assert_eq!(fields.sharpe, Some(Field::Parsed(0.9)));
        assert_eq!(
            SummaryFields {
                sharpe: None,
                ..fields
            },
            SummaryFields::default()
        );
    }

    #[test]
    fn empty_text_has_no_fields() {
        assert_eq!(parse_summary(""), SummaryFields::default());
    }
}
