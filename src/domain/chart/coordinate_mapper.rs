use super::value_objects::{ChartInsets, Rect, SurfaceSize};
use crate::domain::market_data::BarSequence;

/// Share of the price span added above and below the extent
pub const PRICE_PADDING_RATIO: f64 = 0.05;
/// Half-height of the synthetic range around a flat price, relative to the price
pub const DEGENERATE_RANGE_RATIO: f64 = 0.01;
/// Half-height of the synthetic range when the flat price is zero
pub const DEGENERATE_RANGE_FLOOR: f64 = 1.0;
/// Range used when no finite, non-empty span can be built
pub const FALLBACK_RANGE: (f64, f64) = (0.0, 1.0);

/// Maps bar prices and positions to pixels for one `(bars, size, insets)` triple.
///
/// Built once per data replacement or resize and reused by every draw pass until then.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    plot: Rect,
    min_price: f64,
    max_price: f64,
    bar_count: usize,
    slot_width: f64,
}

impl CoordinateMapper {
    pub fn new(bars: &BarSequence, size: SurfaceSize, insets: ChartInsets) -> Self {
        let plot = plot_area(size, insets);
        let (min_price, max_price) = padded_range(bars);
        let bar_count = bars.len();
        let slot_width = if bar_count == 0 { plot.width } else { plot.width / bar_count as f64 };

        Self {
            plot,
            min_price,
            max_price,
            bar_count,
            slot_width,
        }
    }

    pub fn plot_area(&self) -> Rect {
        self.plot
    }

    pub fn price_range(&self) -> (f64, f64) {
        (self.min_price, self.max_price)
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    pub fn slot_width(&self) -> f64 {
        self.slot_width
    }

    pub fn price_to_y(&self, price: f64) -> f64 {
        let normalized = (self.max_price - price) / (self.max_price - self.min_price);
        self.plot.y + normalized * self.plot.height
    }

    pub fn y_to_price(&self, y: f64) -> f64 {
        if self.plot.height <= 0.0 {
            return self.max_price;
        }
        let normalized = (y - self.plot.y) / self.plot.height;
        self.max_price - normalized * (self.max_price - self.min_price)
    }

    /// Horizontal center of the slot for the bar at `index`.
    pub fn x_for_index(&self, index: usize) -> f64 {
        self.plot.x + self.slot_width * (index as f64 + 0.5)
    }

    /// Slot index under `x`, if it falls on a bar.
    pub fn index_at_x(&self, x: f64) -> Option<usize> {
        if self.bar_count == 0 || self.slot_width <= 0.0 || x < self.plot.x || x >= self.plot.right() {
            return None;
        }
        let index = ((x - self.plot.x) / self.slot_width).floor() as usize;
        (index < self.bar_count).then_some(index)
    }
}

fn plot_area(size: SurfaceSize, insets: ChartInsets) -> Rect {
    let width = size.width as f64;
    let height = size.height as f64;

    let (left, right) = if insets.left + insets.right < width {
        (insets.left, insets.right)
    } else {
        (0.0, 0.0)
    };
    let (top, bottom) = if insets.top + insets.bottom < height {
        (insets.top, insets.bottom)
    } else {
        (0.0, 0.0)
    };

    Rect::new(left, top, width - left - right, height - top - bottom)
}

fn padded_range(bars: &BarSequence) -> (f64, f64) {
    let Some(extent) = bars.price_extent() else {
        return FALLBACK_RANGE;
    };

    let span = extent.span();
    let (min, max) = if span > 0.0 {
        let padding = span * PRICE_PADDING_RATIO;
        (extent.min - padding, extent.max + padding)
    } else {
        let mid = extent.min + span / 2.0;
        let half = if mid == 0.0 {
            DEGENERATE_RANGE_FLOOR
        } else {
            (mid.abs() * DEGENERATE_RANGE_RATIO).max(f64::MIN_POSITIVE)
        };
        (mid - half, mid + half)
    };

    // Prices near the f64 limits pad past them.
    let (min, max) = (min.max(f64::MIN), max.min(f64::MAX));
    let height = max - min;
    if height > 0.0 && height.is_finite() { (min, max) } else { FALLBACK_RANGE }
}
