//! Serde helper functions for form and catalog deserialization.
//!
//! Form submissions send empty strings for optional fields, and the crop
//! catalog data encodes day offsets inconsistently (number, numeric string,
//! empty string, or absent). These helpers normalize both.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional NaiveDate, treating empty strings as None.
/// Expects format: YYYY-MM-DD
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional day count that may appear as a number, a numeric
/// string, an empty string, or null. Empty strings become None; anything else
/// non-numeric is an error.
pub fn deserialize_optional_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DayField {
        Number(i64),
        Text(String),
    }

    let value: Option<DayField> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(DayField::Number(n)) => Ok(Some(n)),
        Some(DayField::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<i64>().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}
