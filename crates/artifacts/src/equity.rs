// In crates/artifacts/src/equity.rs

use crate::numeric::{leading_float, leading_int};
use crate::table::data_rows;
use core_types::EquityPoint;

/// Parses an equity curve (`<timestamp>, <value>`), one point per data row.
///
/// Malformed rows are propagated as `{x: None, y: NaN}` rather than dropped, so
/// a consumer can tell that the artifact is broken.
pub fn parse_equity_curve(csv_text: &str) -> Vec<EquityPoint> {
    data_rows(csv_text)
        .iter()
        .map(|row| EquityPoint {
            x: row.get(0).and_then(leading_int),
            y: row.get(1).and_then(leading_float).unwrap_or(f64::NAN),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_point_per_data_row() {
        let csv = "Timestamp,Value\n0,10000.0\n1,10012.5\n2,9987.25\n";
        let points = parse_equity_curve(csv);

        assert_eq!(points.len(), csv.lines().count() - 1);
        assert_eq!(points[1], EquityPoint { x: Some(1), y: 10012.5 });
        assert!(points.iter().all(EquityPoint::is_valid));
    }

    #[test]
    fn malformed_rows_surface_as_invalid_points() {
        let points = parse_equity_curve("Timestamp,Value\nx,y\n5\n");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, None);
        assert!(points[0].y.is_nan());
        assert_eq!(points[1].x, Some(5));
        assert!(!points[1].is_valid());
    }

    #[test]
    fn quotes_and_blank_lines_keep_the_row_count() {
        let quoted = "Timestamp,Value\n1,\"10\n2,20\n3,30\n4,40\n";
        let points = parse_equity_curve(quoted);
        assert_eq!(points.len(), quoted.lines().count() - 1);
        assert!(points[0].y.is_nan());
        assert_eq!(points[3], EquityPoint { x: Some(4), y: 40.0 });

        let gapped = "Timestamp,Value\n1,10\n\n3,30\n";
        let points = parse_equity_curve(gapped);
        assert_eq!(points.len(), gapped.lines().count() - 1);
        assert!(!points[1].is_valid());
        assert_eq!(points[2], EquityPoint { x: Some(3), y: 30.0 });
    }
}
