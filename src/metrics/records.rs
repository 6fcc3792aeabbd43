//! Metric Records
//!
//! Typed views over the JSON bodies returned by the metric endpoints.
//! Revenue values are coerced the way a browser's `Number()` would, so a
//! bad value becomes NaN instead of an error. A country record without a
//! country keeps its place with a blank label. Daily records are checked:
//! one that carries neither date field is rejected.

use serde_json::{Map, Value};
use thiserror::Error;

/// Revenue-by-country record
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRevenue {
    pub country: String,
    pub revenue: f64,
}

/// Daily revenue record; the backend has shipped both date field names
#[derive(Debug, Clone, PartialEq)]
pub enum DailyRevenue {
    OrderDate { order_date: String, revenue: f64 },
    Date { date: String, revenue: f64 },
}

impl DailyRevenue {
    /// The date, whichever field carried it
    pub fn day(&self) -> &str {
        match self {
            DailyRevenue::OrderDate { order_date, .. } => order_date,
            DailyRevenue::Date { date, .. } => date,
        }
    }

    pub fn revenue(&self) -> f64 {
        match self {
            DailyRevenue::OrderDate { revenue, .. } | DailyRevenue::Date { revenue, .. } => *revenue,
        }
    }
}

/// Parallel label/value sequences for a single chart series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Oldest-first view of a newest-first series. Positional only.
    pub fn reversed(mut self) -> Self {
        self.labels.reverse();
        self.values.reverse();
        self
    }
}

impl FromIterator<(String, f64)> for Series {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        let (labels, values) = iter.into_iter().unzip();
        Self { labels, values }
    }
}

/// Errors for bodies that parse as JSON but not as metric records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Expected a list of records, got {0}")]
    NotAList(&'static str),

    #[error("Record {index} has neither `order_date` nor `date`")]
    UnrecognizedShape { index: usize },
}

impl CountryRevenue {
    /// Never fails: a null or absent country becomes an empty label
    pub fn from_value(value: &Value) -> Self {
        let record = as_record(value);
        let country = record
            .and_then(|r| label_field(r, "country"))
            .unwrap_or_default();

        Self {
            country,
            revenue: revenue_of(record),
        }
    }
}

impl DailyRevenue {
    pub fn from_value(index: usize, value: &Value) -> Result<Self, RecordError> {
        let record = as_record(value).ok_or(RecordError::UnrecognizedShape { index })?;
        let revenue = revenue_of(Some(record));

        if let Some(order_date) = label_field(record, "order_date") {
            Ok(DailyRevenue::OrderDate {
                order_date,
                revenue,
            })
        } else if let Some(date) = label_field(record, "date") {
            Ok(DailyRevenue::Date { date, revenue })
        } else {
            Err(RecordError::UnrecognizedShape { index })
        }
    }
}

/// Labels and values in response order
pub fn revenue_by_country_series(data: &Value) -> Result<Series, RecordError> {
    Ok(records(data)?
        .iter()
        .map(CountryRevenue::from_value)
        .map(|r| (r.country, r.revenue))
        .collect())
}

/// Labels and values reversed from response order (newest-first in,
/// oldest-first out)
pub fn daily_revenue_series(data: &Value) -> Result<Series, RecordError> {
    let series: Series = records(data)?
        .iter()
        .enumerate()
        .map(|(i, v)| DailyRevenue::from_value(i, v).map(|r| (r.day().to_string(), r.revenue())))
        .collect::<Result<_, _>>()?;

    Ok(series.reversed())
}

fn records(data: &Value) -> Result<&Vec<Value>, RecordError> {
    data.as_array()
        .ok_or_else(|| RecordError::NotAList(json_kind(data)))
}

fn as_record(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Text of a label field; null and nested values count as absent
fn label_field(record: &Map<String, Value>, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn revenue_of(record: Option<&Map<String, Value>>) -> f64 {
    record
        .and_then(|r| r.get("revenue"))
        .map(coerce_number)
        .unwrap_or(f64::NAN)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Numeric coercion with browser `Number()` semantics. Never fails;
/// anything that is not a number becomes NaN.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_str(s),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        // A one-element list coerces through its only element's text
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [Value::Number(_) | Value::String(_)] => coerce_number(&items[0]),
            [Value::Null] => 0.0,
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn coerce_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust also accepts "inf"/"nan" spellings; a browser does not
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_country_series_coerces_string_numbers() {
        let data = json!([{"country": "US", "revenue": "10"}, {"country": "FR", "revenue": 5}]);
        let series = revenue_by_country_series(&data).unwrap();

        assert_eq!(series.labels, vec!["US", "FR"]);
        assert_eq!(series.values, vec![10.0, 5.0]);
    }

    #[test]
    fn test_country_series_non_numeric_revenue_is_nan() {
        let data = json!([{"country": "DE", "revenue": "lots"}, {"country": "IT"}]);
        let series = revenue_by_country_series(&data).unwrap();

        assert_eq!(series.len(), 2);
        assert!(series.values[0].is_nan());
        assert!(series.values[1].is_nan());
    }

    #[test]
    fn test_country_null_keeps_record_with_blank_label() {
        let data = json!([
            {"country": "Turkey", "revenue": 1200.5},
            {"country": null, "revenue": 40}
        ]);
        let series = revenue_by_country_series(&data).unwrap();

        assert_eq!(series.labels, vec!["Turkey", ""]);
        assert_eq!(series.values, vec![1200.5, 40.0]);
    }

    #[test]
    fn test_country_missing_or_non_object_record_degrades() {
        let data = json!([{"revenue": 2}, 7, {"country": "US", "revenue": 1}]);
        let series = revenue_by_country_series(&data).unwrap();

        assert_eq!(series.labels, vec!["", "", "US"]);
        assert_eq!(series.values[0], 2.0);
        assert!(series.values[1].is_nan());
        assert_eq!(series.values[2], 1.0);
    }

    #[test]
    fn test_daily_series_is_reversed() {
        let data = json!([
            {"date": "2024-01-03", "revenue": 9},
            {"date": "2024-01-02", "revenue": 7},
            {"date": "2024-01-01", "revenue": 5}
        ]);
        let series = daily_revenue_series(&data).unwrap();

        assert_eq!(series.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(series.values, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_daily_series_reverses_by_position_not_date() {
        let data = json!([
            {"date": "2024-01-01", "revenue": 1},
            {"date": "2024-01-05", "revenue": 2},
            {"date": "2024-01-03", "revenue": 3}
        ]);
        let series = daily_revenue_series(&data).unwrap();
        assert_eq!(series.labels, vec!["2024-01-03", "2024-01-05", "2024-01-01"]);
    }

    #[test]
    fn test_daily_order_date_shape() {
        let data = json!([
            {"order_date": "2024-02-02", "revenue": "4.5"},
            {"order_date": "2024-02-01", "revenue": 3}
        ]);
        let series = daily_revenue_series(&data).unwrap();
        assert_eq!(series.labels, vec!["2024-02-01", "2024-02-02"]);
        assert_eq!(series.values, vec![3.0, 4.5]);
    }

    #[test]
    fn test_daily_mixed_shapes_each_classified() {
        let data = json!([
            {"order_date": "2024-02-02", "revenue": 2},
            {"date": "2024-02-01", "revenue": 1}
        ]);
        let series = daily_revenue_series(&data).unwrap();
        assert_eq!(series.labels, vec!["2024-02-01", "2024-02-02"]);
    }

    #[test]
    fn test_daily_order_date_preferred_when_both_present() {
        let record = DailyRevenue::from_value(
            0,
            &json!({"order_date": "a", "date": "b", "revenue": 1}),
        )
        .unwrap();
        assert!(matches!(record, DailyRevenue::OrderDate { .. }));
        assert_eq!(record.day(), "a");
    }

    #[test]
    fn test_daily_unrecognized_shape_fails() {
        let data = json!([{"date": "2024-01-01", "revenue": 1}, {"day": "x", "revenue": 2}]);
        let err = daily_revenue_series(&data).unwrap_err();
        assert_eq!(err, RecordError::UnrecognizedShape { index: 1 });

        let err = daily_revenue_series(&json!([{"date": null, "revenue": 2}])).unwrap_err();
        assert_eq!(err, RecordError::UnrecognizedShape { index: 0 });
    }

    #[test]
    fn test_non_list_body_is_rejected() {
        let err = revenue_by_country_series(&json!({"detail": "Guests not allowed"})).unwrap_err();
        assert_eq!(err, RecordError::NotAList("an object"));
        assert_eq!(err.to_string(), "Expected a list of records, got an object");
    }

    #[test]
    fn test_empty_list_gives_empty_series() {
        assert!(daily_revenue_series(&json!([])).unwrap().is_empty());
        assert!(revenue_by_country_series(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_coerce_number_strings() {
        assert_eq!(coerce_number(&json!("42")), 42.0);
        assert_eq!(coerce_number(&json!("  3.5\n")), 3.5);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("1e3")), 1000.0);
        assert_eq!(coerce_number(&json!(".5")), 0.5);
        assert_eq!(coerce_number(&json!("0x1F")), 31.0);
        assert_eq!(coerce_number(&json!("-Infinity")), f64::NEG_INFINITY);
        assert!(coerce_number(&json!("inf")).is_nan());
        assert!(coerce_number(&json!("nan")).is_nan());
        assert!(coerce_number(&json!("12abc")).is_nan());
        assert!(coerce_number(&json!("1,000")).is_nan());
    }

    #[test]
    fn test_coerce_number_other_values() {
        assert_eq!(coerce_number(&json!(7)), 7.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(false)), 0.0);
        assert_eq!(coerce_number(&Value::Null), 0.0);
        assert_eq!(coerce_number(&json!([])), 0.0);
        assert_eq!(coerce_number(&json!(["8"])), 8.0);
        assert!(coerce_number(&json!([1, 2])).is_nan());
        assert!(coerce_number(&json!({})).is_nan());
    }
}
