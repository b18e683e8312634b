// In crates/core-types/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticker symbol, normalised to uppercase (e.g., "NVDA").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Symbol(pub String);

impl Symbol {
    /// Builds a symbol from free text, trimming whitespace and uppercasing it.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Symbol {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The trading signal recorded against a trade entry or a live quote.
///
/// Labels are matched case-insensitively; anything unrecognised is kept verbatim
/// in `Other` so the rendering layer can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    Other(String),
}

impl Signal {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("buy") {
            Signal::Buy
        } else if label.eq_ignore_ascii_case("sell") {
            Signal::Sell
        } else if label.eq_ignore_ascii_case("hold") {
            Signal::Hold
        } else {
            Signal::Other(label.to_string())
        }
    }

    /// Decodes the integer signal code used by the quote feed (1 = buy, 2 = sell, anything else = hold).
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Signal::Buy,
            2 => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => 2,
            Signal::Hold | Signal::Other(_) => 0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
            Signal::Other(label) => label,
        }
    }
}

impl From<String> for Signal {
    fn from(label: String) -> Self {
        Signal::from_label(&label)
    }
}

impl From<Signal> for String {
    fn from(signal: Signal) -> Self {
        signal.label().to_string()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One kind of result artifact produced per ticker by the backtest driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Summary,
    TradeEntries,
    TradeOutcomes,
    StreaksData,
    EquityCurve,
    PnlData,
    TradeLengthData,
}

impl ArtifactKind {
    /// The artifacts every ticker record is assembled from.
    pub const REQUIRED: [ArtifactKind; 4] = [
        ArtifactKind::Summary,
        ArtifactKind::TradeEntries,
        ArtifactKind::TradeOutcomes,
        ArtifactKind::StreaksData,
    ];

    /// Artifacts the driver only writes when the underlying metrics exist.
    pub const OPTIONAL: [ArtifactKind; 2] = [ArtifactKind::PnlData, ArtifactKind::TradeLengthData];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::TradeEntries => "trade_entries",
            ArtifactKind::TradeOutcomes => "trade_outcomes",
            ArtifactKind::StreaksData => "streaks_data",
            ArtifactKind::EquityCurve => "equity_curve",
            ArtifactKind::PnlData => "pnl_data",
            ArtifactKind::TradeLengthData => "trade_length_data",
        }
    }

    /// The file name of this artifact inside a ticker's results directory.
    pub fn file_name(&self) -> String {
        match self {
            ArtifactKind::Summary => "summary.txt".to_string(),
            other => format!("{}.csv", other.as_str()),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of parsing one metric whose label was present in an artifact.
///
/// A label that is missing altogether is modelled as `Option::None` around this type,
/// so "parsed as zero" and "never seen" stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<T> {
    Parsed(T),
    /// The label was present but its value could not be read as a number.
    ZeroFilled,
}

impl<T> Field<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Parsed(v),
            None => Field::ZeroFilled,
        }
    }

    pub fn is_zero_filled(&self) -> bool {
        matches!(self, Field::ZeroFilled)
    }
}

impl<T: Default> Field<T> {
    /// Resolves the field to its value, using the type's zero for unparsable input.
    pub fn into_value(self) -> T {
        match self {
            Field::Parsed(v) => v,
            Field::ZeroFilled => T::default(),
        }
    }
}
