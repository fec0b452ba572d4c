//! Tolerant deserializers for backend fields whose JSON type drifts between
//! number, numeric string and null.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Positive integer from a number or numeric string.
///
/// Fractional values are truncated. Zero, negatives, non-finite and
/// non-numeric input all map to `None`.
pub fn positive_int<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(positive_int_from_value))
}

pub fn positive_int_from_value(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    positive_int_from_f64(number)
}

pub fn positive_int_from_f64(number: f64) -> Option<u32> {
    if !number.is_finite() {
        return None;
    }
    let truncated = number.trunc();
    if truncated < 1.0 || truncated > u32::MAX as f64 {
        return None;
    }
    Some(truncated as u32)
}

/// Raw editable text for a units field: numbers are rendered, null becomes
/// an empty string, strings pass through untouched.
pub fn units_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// String field that may be null or absent.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "positive_int")]
        year: Option<u32>,
        #[serde(default, deserialize_with = "units_text")]
        units: String,
        #[serde(default, deserialize_with = "text")]
        code: String,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_positive_int_accepts_numbers_and_strings() {
        assert_eq!(probe(json!({ "year": 3 })).year, Some(3));
        assert_eq!(probe(json!({ "year": 2.9 })).year, Some(2));
        assert_eq!(probe(json!({ "year": " 4 " })).year, Some(4));
    }

    #[test]
    fn test_positive_int_rejects_non_positive() {
        assert_eq!(probe(json!({ "year": 0 })).year, None);
        assert_eq!(probe(json!({ "year": -1 })).year, None);
        assert_eq!(probe(json!({ "year": 0.5 })).year, None);
        assert_eq!(probe(json!({ "year": "Second Year" })).year, None);
        assert_eq!(probe(json!({ "year": null })).year, None);
        assert_eq!(probe(json!({})).year, None);
    }

    #[test]
    fn test_units_text() {
        assert_eq!(probe(json!({ "units": 3 })).units, "3");
        assert_eq!(probe(json!({ "units": 1.5 })).units, "1.5");
        assert_eq!(probe(json!({ "units": "abc" })).units, "abc");
        assert_eq!(probe(json!({ "units": null })).units, "");
    }

    #[test]
    fn test_text_tolerates_null() {
        assert_eq!(probe(json!({ "code": null })).code, "");
        assert_eq!(probe(json!({ "code": "CSIT121" })).code, "CSIT121");
    }
}
