// In crates/analytics/src/export.rs

use crate::error::{Error, Result};
use core_types::PortfolioState;

/// Renders the `Stock,Sharpe Ratio` comparison table, best ratio first.
///
/// Tickers without a finite Sharpe ratio are left out.
pub fn sharpe_comparison_csv(state: &PortfolioState) -> Result<String> {
    let mut rows: Vec<(&str, f64)> = state
        .iter()
        .filter_map(|r| r.sharpe.filter(|s| s.is_finite()).map(|s| (r.ticker.as_str(), s)))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Stock", "Sharpe Ratio"])?;
    for (ticker, sharpe) in rows {
        writer.write_record([ticker, sharpe.to_string().as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Export(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| Error::ExportEncoding)
}
