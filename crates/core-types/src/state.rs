// In crates/core-types/src/state.rs

use crate::performance::TickerPerformance;
use crate::types::Symbol;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// The caller-owned mapping of ticker → performance record.
///
/// Iteration follows insertion order, which is also the tie-break order used
/// when ranking tickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioState {
    records: Vec<TickerPerformance>,
    index: HashMap<Symbol, usize>,
}

impl PortfolioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record. An existing record for the same ticker is replaced in place
    /// and returned; a new ticker is appended.
    pub fn insert(&mut self, record: TickerPerformance) -> Option<TickerPerformance> {
        match self.index.get(&record.ticker) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(record.ticker.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, ticker: &Symbol) -> Option<&TickerPerformance> {
        self.index.get(ticker).map(|&pos| &self.records[pos])
    }

    pub fn get_mut(&mut self, ticker: &Symbol) -> Option<&mut TickerPerformance> {
        match self.index.get(ticker) {
            Some(&pos) => Some(&mut self.records[pos]),
            None => None,
        }
    }

    /// Returns the record for `ticker`, appending an empty one first if it is absent.
    pub fn entry(&mut self, ticker: Symbol) -> &mut TickerPerformance {
        let pos = match self.index.get(&ticker) {
            Some(&pos) => pos,
            None => {
                let pos = self.records.len();
                self.index.insert(ticker.clone(), pos);
                self.records.push(TickerPerformance::new(ticker));
                pos
            }
        };
        &mut self.records[pos]
    }

    /// Resolves a free-text search (any case, surrounding whitespace) to a record.
    pub fn lookup(&self, query: &str) -> Option<&TickerPerformance> {
        self.get(&Symbol::new(query))
    }

    pub fn contains(&self, ticker: &Symbol) -> bool {
        self.index.contains_key(ticker)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerPerformance> {
        self.records.iter()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Symbol> {
        self.records.iter().map(|r| &r.ticker)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swaps in a freshly rebuilt state, returning the previous one.
    pub fn replace_all(&mut self, fresh: PortfolioState) -> PortfolioState {
        std::mem::replace(self, fresh)
    }
}

impl FromIterator<TickerPerformance> for PortfolioState {
    fn from_iter<I: IntoIterator<Item = TickerPerformance>>(iter: I) -> Self {
        let mut state = PortfolioState::new();
        for record in iter {
            state.insert(record);
        }
        state
    }
}

// Serialized as a JSON object keyed by ticker, preserving insertion order.
impl Serialize for PortfolioState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(record.ticker.as_str(), record)?;
        }
        map.end()
    }
}
