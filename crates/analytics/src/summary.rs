// In crates/analytics/src/summary.rs

use crate::error::{Error, Result};
use crate::types::{
    ComparisonMetric, ComparisonRow, EquityTrend, MetricPoint, PortfolioSummary, SharpeBand,
    SharpeStanding, WinLoss,
};
use core_types::{EquityPoint, PortfolioState, TickerPerformance};

/// Ranks the portfolio by Sharpe ratio.
///
/// Records are visited in insertion order and only finite Sharpe ratios take
/// part, so on ties the earlier ticker wins. When no record has a usable
/// ratio, the first ticker stands in as both best and worst.
pub fn summarize(state: &PortfolioState) -> Result<PortfolioSummary> {
    let first = state.iter().next().ok_or(Error::EmptyPortfolio)?;

    let mut best: Option<(&TickerPerformance, f64)> = None;
    let mut worst: Option<(&TickerPerformance, f64)> = None;
    let mut total = 0.0;
    let mut rated = 0;

    for record in state.iter() {
        let Some(sharpe) = record.sharpe.filter(|s| s.is_finite()) else {
            continue;
        };
        total += sharpe;
        rated += 1;

        if best.is_none_or(|(_, b)| sharpe > b) {
            best = Some((record, sharpe));
        }
        if worst.is_none_or(|(_, w)| sharpe < w) {
            worst = Some((record, sharpe));
        }
    }

    let standing = |ranked: Option<(&TickerPerformance, f64)>| match ranked {
        Some((record, sharpe)) => SharpeStanding {
            ticker: record.ticker.clone(),
            sharpe: Some(sharpe),
        },
        None => SharpeStanding {
            ticker: first.ticker.clone(),
            sharpe: None,
        },
    };

    Ok(PortfolioSummary {
        best: standing(best),
        worst: standing(worst),
        average_sharpe: if rated > 0 { total / rated as f64 } else { 0.0 },
        rated,
    })
}

pub fn build_comparison_rows(state: &PortfolioState) -> Vec<ComparisonRow> {
    state
        .iter()
        .map(|record| ComparisonRow {
            name: record.ticker.clone(),
            sharpe: record.sharpe,
            total_trades: record.total_trades,
            win_rate: record.win_rate,
            net_pnl: record.net_pnl,
            band: record.sharpe.map(SharpeBand::classify),
        })
        .collect()
}

/// One value per ticker for the comparison chart. Absent values plot as `0`.
pub fn metric_series(state: &PortfolioState, metric: ComparisonMetric) -> Vec<MetricPoint> {
    state
        .iter()
        .map(|record| {
            let value = match metric {
                ComparisonMetric::Sharpe => record.sharpe,
                ComparisonMetric::WinRate => record.win_rate,
                ComparisonMetric::NetPnl => record.net_pnl,
                ComparisonMetric::TotalTrades => record.total_trades.map(f64::from),
            };
            MetricPoint {
                ticker: record.ticker.clone(),
                value: value.unwrap_or(0.0),
            }
        })
        .collect()
}

/// Win/loss split per ticker. A ticker without an outcome table counts as all losses.
pub fn win_loss_breakdown(state: &PortfolioState) -> Vec<WinLoss> {
    state
        .iter()
        .map(|record| {
            let (win_rate, loss_rate) = record
                .outcomes
                .map_or((0.0, 100.0), |o| (o.win_rate(), o.loss_rate()));
            WinLoss {
                ticker: record.ticker.clone(),
                win_rate,
                loss_rate,
            }
        })
        .collect()
}

/// Direction of an equity curve, from its first to its last point.
pub fn equity_trend(points: &[EquityPoint]) -> Option<EquityTrend> {
    let (first, last) = (points.first()?, points.last()?);
    if last.y >= first.y {
        Some(EquityTrend::Up)
    } else if last.y < first.y {
        Some(EquityTrend::Down)
    } else {
        // NaN at either end.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{OutcomeCounts, Symbol};

    fn record(ticker: &str, sharpe: Option<f64>) -> TickerPerformance {
        let mut r = TickerPerformance::new(Symbol::new(ticker));
        r.sharpe = sharpe;
        r
    }

    fn state(records: Vec<TickerPerformance>) -> PortfolioState {
        records.into_iter().collect()
    }

    #[test]
    fn ranks_best_worst_and_average() {
        let s = state(vec![
            record("NVDA", Some(1.5)),
            record("GS", Some(-0.5)),
            record("MSFT", Some(0.5)),
        ]);
        let summary = summarize(&s).unwrap();

        assert_eq!(summary.best.ticker.as_str(), "NVDA");
        assert_eq!(summary.worst.ticker.as_str(), "GS");
        assert_eq!(summary.worst.sharpe, Some(-0.5));
        assert_eq!(summary.average_sharpe, 0.5);
        assert_eq!(summary.rated, 3);
    }

    #[test]
    fn single_record_is_best_worst_and_average() {
        let summary = summarize(&state(vec![record("TSLA", Some(0.8))])).unwrap();
        assert_eq!(summary.best, summary.worst);
        assert_eq!(summary.average_sharpe, 0.8);
    }

    #[test]
    fn ties_keep_the_first_ticker() {
        let s = state(vec![
            record("AAPL", Some(1.0)),
            record("GOOGL", Some(1.0)),
        ]);
        let summary = summarize(&s).unwrap();
        assert_eq!(summary.best.ticker.as_str(), "AAPL");
        assert_eq!(summary.worst.ticker.as_str(), "AAPL");
    }

    #[test]
    fn records_without_a_usable_sharpe_are_skipped() {
        let s = state(vec![
            record("GME", None),
            record("AMC", Some(f64::NAN)),
            record("NVDA", Some(2.0)),
        ]);
        let summary = summarize(&s).unwrap();
        assert_eq!(summary.best.ticker.as_str(), "NVDA");
        assert_eq!(summary.average_sharpe, 2.0);
        assert_eq!(summary.rated, 1);

        let unrated = summarize(&state(vec![record("GME", None), record("AMC", None)])).unwrap();
        assert_eq!(unrated.best.ticker.as_str(), "GME");
        assert_eq!(unrated.best.sharpe, None);
        assert_eq!(unrated.average_sharpe, 0.0);
    }

    #[test]
    fn empty_portfolio_is_an_error() {
        assert!(matches!(summarize(&PortfolioState::new()), Err(Error::EmptyPortfolio)));
    }

    #[test]
    fn comparison_rows_follow_insertion_order() {
        let mut gs = record("GS", Some(1.2));
        gs.total_trades = Some(12);
        let rows = build_comparison_rows(&state(vec![gs, record("MSFT", None)]));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_str(), "GS");
        assert_eq!(rows[0].band, Some(SharpeBand::Strong));
        assert_eq!(rows[0].total_trades, Some(12));
        assert_eq!(rows[1].band, None);
    }

    #[test]
    fn metric_series_projects_absent_values_to_zero() {
        let mut nvda = record("NVDA", Some(1.1));
        nvda.total_trades = Some(7);
        let s = state(vec![nvda, record("GS", None)]);

        let trades = metric_series(&s, ComparisonMetric::TotalTrades);
        assert_eq!(trades[0].value, 7.0);
        assert_eq!(trades[1].value, 0.0);
        assert_eq!(metric_series(&s, ComparisonMetric::NetPnl)[0].value, 0.0);
    }

    #[test]
    fn missing_outcomes_count_as_all_losses() {
        let mut nvda = record("NVDA", None);
        nvda.outcomes = Some(OutcomeCounts { won: 3, lost: 1 });
        let breakdown = win_loss_breakdown(&state(vec![nvda, record("GS", None)]));

        assert_eq!((breakdown[0].win_rate, breakdown[0].loss_rate), (75.0, 25.0));
        assert_eq!((breakdown[1].win_rate, breakdown[1].loss_rate), (0.0, 100.0));
    }

    #[test]
    fn equity_trend_compares_the_endpoints() {
        let point = |y| EquityPoint { x: Some(0), y };
        assert_eq!(equity_trend(&[point(100.0), point(90.0), point(100.0)]), Some(EquityTrend::Up));
        assert_eq!(equity_trend(&[point(100.0), point(120.0), point(99.0)]), Some(EquityTrend::Down));
        assert_eq!(equity_trend(&[]), None);
        assert_eq!(equity_trend(&[point(f64::NAN), point(1.0)]), None);
    }
}
