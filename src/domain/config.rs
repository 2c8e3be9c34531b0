//! Series configuration types.
//!
//! Configuration values arrive from loosely-typed sources (INI text, caller
//! literals), so fields are held as [`ConfigValue`] and judged lazily by
//! the traveler's validation rather than at construction.

use chrono::{NaiveDate, NaiveDateTime};

/// A raw configuration value, kept as supplied until validation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConfigValue {
    #[default]
    Missing,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<NaiveDateTime> for ConfigValue {
    fn from(value: NaiveDateTime) -> Self {
        ConfigValue::Timestamp(value)
    }
}

impl From<NaiveDate> for ConfigValue {
    fn from(value: NaiveDate) -> Self {
        ConfigValue::Timestamp(value.and_time(chrono::NaiveTime::MIN))
    }
}

/// Configuration for one series run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TravelerConfig {
    /// Starting point-in-time: a timestamp, or ISO-8601 text to parse.
    pub starts_at: ConfigValue,
    /// Total number of intervals to iterate; must validate as an integer.
    pub steps: ConfigValue,
    /// Calendar-unit name, passed through to the calendar seam unvalidated.
    pub time_units: String,
    /// Units per step; unset or zero behaves as 1.
    pub time_scale: Option<i64>,
}
