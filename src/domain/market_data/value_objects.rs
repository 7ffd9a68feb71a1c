use chrono::{DateTime, TimeZone, Utc};
use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Value Object - price in quote currency
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Display, Serialize, Deserialize)]
#[display(fmt = "{:.2}", _0)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - traded volume
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - UTC instant in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    /// Parse an RFC 3339 instant such as `2024-01-02T14:30:00Z`.
    pub fn parse_rfc3339(value: &str) -> Result<Self, chrono::ParseError> {
        let parsed = DateTime::parse_from_rfc3339(value)?;
        Ok(Self(parsed.with_timezone(&Utc).timestamp_millis()))
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }

    /// `HH:MM` in UTC; bars are displayed with minute resolution.
    pub fn format_minutes(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }

    pub fn format_datetime(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => format!("{} ms", self.0),
        }
    }
}

/// Value Object - OHLCV sample
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct OHLCV {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

/// Value Object - ticker symbol, always upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: &str) -> Result<Self, String> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err("Symbol cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}
