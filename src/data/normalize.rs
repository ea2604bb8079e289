//! Normalization of provider payloads into the canonical [`Series`] shape.
//!
//! Three provider shapes funnel through here: the delimited price table
//! returned for a single stock, the `(date, value)` string pairs of a macro
//! series, and points that arrive already typed. Downstream code only ever
//! consumes `Series`, so no call site parses a provider format on its own.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::errors::AppError;
use crate::models::series::{Series, TimePoint};

/// Date column of the provider price table.
const DATE_FIELD: &str = "_DATE_END";
/// Closing price column of the provider price table.
const PRICE_FIELD: &str = "CLOSE_PRC";

/// Parse a provider date string into epoch milliseconds (UTC).
///
/// Accepts `%Y-%m-%dT%H:%M:%S` (stock history timestamps), `%Y-%m-%d`
/// (FRED observation dates) and RFC 3339.
pub fn parse_date_ms(raw: &str) -> Result<i64, AppError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp_millis());
    }
    Err(AppError::parse("date", raw))
}

fn parse_value(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::parse("value", raw))
}

/// Normalize the delimited price table carried by a stock response.
///
/// The table has a header row; only the `_DATE_END` and `CLOSE_PRC` columns
/// are read, any others are ignored. A missing column or an unparseable cell
/// fails the whole table; no partial series is produced.
pub fn series_from_price_table(name: &str, table: &str) -> Result<Series, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(table.as_bytes());

    let headers = reader.headers()?.clone();
    let date_col = headers
        .iter()
        .position(|h| h == DATE_FIELD)
        .ok_or_else(|| AppError::parse("date", format!("missing column {}", DATE_FIELD)))?;
    let price_col = headers
        .iter()
        .position(|h| h == PRICE_FIELD)
        .ok_or_else(|| AppError::parse("value", format!("missing column {}", PRICE_FIELD)))?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let date = record
            .get(date_col)
            .ok_or_else(|| AppError::parse("date", ""))?;
        let value = record
            .get(price_col)
            .ok_or_else(|| AppError::parse("value", ""))?;
        points.push(TimePoint {
            timestamp: parse_date_ms(date)?,
            value: parse_value(value)?,
        });
    }

    Ok(finish(name, points))
}

/// Normalize `(date-string, value-string)` pairs, the macro series shape.
pub fn series_from_string_pairs(
    name: &str,
    pairs: &[(String, String)],
) -> Result<Series, AppError> {
    let mut points = Vec::with_capacity(pairs.len());
    for (date, value) in pairs {
        points.push(TimePoint {
            timestamp: parse_date_ms(date)?,
            value: parse_value(value)?,
        });
    }
    Ok(finish(name, points))
}

/// Normalize already-typed `(datetime, value)` points.
pub fn series_from_typed_points(name: &str, points: &[(NaiveDateTime, f64)]) -> Series {
    let points = points
        .iter()
        .map(|(dt, value)| TimePoint {
            timestamp: dt.and_utc().timestamp_millis(),
            value: *value,
        })
        .collect();
    finish(name, points)
}

/// Ordering is preserved exactly as parsed. Out-of-order provider data is
/// logged and surfaced as-is rather than silently re-sorted.
fn finish(name: &str, points: Vec<TimePoint>) -> Series {
    if points.windows(2).any(|w| w[0].timestamp > w[1].timestamp) {
        warn!(series = name, "provider returned out-of-order timestamps");
    }
    Series::new(name, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(date: &str) -> i64 {
        parse_date_ms(date).unwrap()
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(d, v)| (d.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_price_table_well_formed() {
        let table = "\
_DATE_END,OPEN_PRC,CLOSE_PRC
2024-01-01T00:00:00,99.0,100.5
2024-01-02T00:00:00,100.5,101.25
";
        let series = series_from_price_table("VOD", table).unwrap();
        assert_eq!(series.name, "VOD");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].timestamp, ms("2024-01-01"));
        assert_eq!(series.points[0].value, 100.5);
        assert_eq!(series.points[1].value, 101.25);
    }

    #[test]
    fn test_price_table_missing_price_column() {
        let table = "_DATE_END,OPEN_PRC\n2024-01-01T00:00:00,99.0\n";
        let err = series_from_price_table("VOD", table).unwrap_err();
        assert!(matches!(err, AppError::Parse { field: "value", .. }));
    }

    #[test]
    fn test_price_table_bad_date() {
        let table = "_DATE_END,CLOSE_PRC\nnot-a-date,100.5\n";
        let err = series_from_price_table("VOD", table).unwrap_err();
        match err {
            AppError::Parse { field, value } => {
                assert_eq!(field, "date");
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_string_pairs_well_formed_totality() {
        let input = pairs(&[("2024-01-01", "100.5"), ("2024-01-02", "101.0")]);
        let series = series_from_string_pairs("DCOILBRENTEU", &input).unwrap();
        assert_eq!(series.len(), input.len());
        assert_eq!(series.points[0].timestamp, ms("2024-01-01"));
        assert_eq!(series.points[1].value, 101.0);
    }

    #[test]
    fn test_string_pairs_bad_value_no_partial_series() {
        // The second value is non-numeric; the whole operation fails.
        let input = pairs(&[("2024-01-01", "100.5"), ("2024-01-02", "bad")]);
        let err = series_from_string_pairs("DCOILBRENTEU", &input).unwrap_err();
        match err {
            AppError::Parse { field, value } => {
                assert_eq!(field, "value");
                assert_eq!(value, "bad");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_typed_points() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_time(NaiveTime::MIN);
        let series = series_from_typed_points("ma", &[(dt, 42.0)]);
        assert_eq!(series.points[0].timestamp, ms("2024-03-15"));
        assert_eq!(series.points[0].value, 42.0);
    }

    #[test]
    fn test_date_formats_agree() {
        // A FRED date and a provider midnight timestamp are the same instant.
        assert_eq!(ms("2024-01-02"), ms("2024-01-02T00:00:00"));
        assert_eq!(ms("2024-01-02"), ms("2024-01-02T00:00:00+00:00"));
    }

    #[test]
    fn test_out_of_order_input_preserved() {
        let input = pairs(&[("2024-01-02", "2.0"), ("2024-01-01", "1.0")]);
        let series = series_from_string_pairs("odd", &input).unwrap();
        // Not re-sorted; callers see the provider's ordering.
        assert!(series.points[0].timestamp > series.points[1].timestamp);
    }

    #[test]
    fn test_empty_inputs() {
        let series = series_from_string_pairs("empty", &[]).unwrap();
        assert!(series.is_empty());
        let series = series_from_price_table("empty", "_DATE_END,CLOSE_PRC\n").unwrap();
        assert!(series.is_empty());
    }
}
