pub use super::value_objects::{OHLCV, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;
use strum::{AsRefStr, Display as StrumDisplay};

/// Candle direction. Every bar is exactly one of the two; there is no "unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr, Serialize, Deserialize)]
pub enum Direction {
    #[strum(serialize = "up")]
    Up,
    #[strum(serialize = "down")]
    Down,
}

/// Domain entity - one OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: Timestamp,
    pub ohlcv: OHLCV,
    pub trade_count: Option<u64>,
    pub vwap: Option<Price>,
}

impl Bar {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv, trade_count: None, vwap: None }
    }

    pub fn with_trade_stats(mut self, trade_count: u64, vwap: Price) -> Self {
        self.trade_count = Some(trade_count);
        self.vwap = Some(vwap);
        self
    }

    /// `close >= open` is up, everything else is down.
    pub fn direction(&self) -> Direction {
        if self.ohlcv.close >= self.ohlcv.open { Direction::Up } else { Direction::Down }
    }
}

/// Vertical value extent of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceExtent {
    pub min: f64,
    pub max: f64,
}

impl PriceExtent {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Domain entity - immutable, ordered bar sequence.
///
/// The order is the producer's; duplicates and out-of-order timestamps are kept as given.
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSequence {
    bars: Arc<[Bar]>,
}

impl BarSequence {
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars: bars.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn as_slice(&self) -> &[Bar] {
        &self.bars
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Min/max over every finite price of every bar, `None` when there is none.
    pub fn price_extent(&self) -> Option<PriceExtent> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for bar in self.bars.iter() {
            let o = &bar.ohlcv;
            for price in [o.low, o.high, o.open, o.close] {
                let value = price.value();
                if value.is_finite() {
                    min = min.min(value);
                    max = max.max(value);
                }
            }
        }
        (min <= max).then_some(PriceExtent { min, max })
    }

    /// Earliest and latest timestamps, independent of sequence order.
    pub fn time_extent(&self) -> Option<(Timestamp, Timestamp)> {
        let first = self.bars.iter().map(|b| b.timestamp).min()?;
        let last = self.bars.iter().map(|b| b.timestamp).max()?;
        Some((first, last))
    }
}

impl From<Vec<Bar>> for BarSequence {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}

impl Index<usize> for BarSequence {
    type Output = Bar;

    fn index(&self, index: usize) -> &Bar {
        &self.bars[index]
    }
}

impl<'a> IntoIterator for &'a BarSequence {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
