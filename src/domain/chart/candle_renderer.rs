//! Synthesizes candlesticks on top of the generic [`ChartSurface`] primitives.
//!
//! Each pass is a full repaint: clear, scales, then one glyph per bar in sequence order.
//! Bars are drawn as given; `high < low` and friends are not validated here.

use super::coordinate_mapper::CoordinateMapper;
use super::surface::ChartSurface;
use super::value_objects::{ChartStyle, Color, Point, Rect, TextAlign, TextStyle};
use crate::domain::errors::ChartResult;
use crate::domain::market_data::{Bar, BarSequence, Direction};
use serde::Serialize;

/// Wick stroke width in pixels
pub const WICK_WIDTH: f64 = 1.0;
/// Share of a slot taken by the body; the rest separates neighbours
pub const BODY_WIDTH_RATIO: f64 = 0.8;
/// Widest body regardless of slot size
pub const MAX_BODY_WIDTH: f64 = 16.0;
/// Flat bodies (`open == close`) are drawn at least this tall
pub const MIN_BODY_HEIGHT: f64 = 1.0;
/// Sequences at least this long are laid out with rayon when `parallel` is enabled
pub const PARALLEL_THRESHOLD: usize = 100;

const PRICE_LABEL_GAP: f64 = 6.0;
const PRICE_LABEL_MIN_SPACE: f64 = 24.0;
const TIME_LABEL_OFFSET: f64 = 16.0;
const TIME_LABEL_MIN_SPACE: f64 = 12.0;
const TIME_LABEL_SPACING: f64 = 80.0;
const TARGET_PRICE_LINES: usize = 6;

/// Pixel geometry of one candlestick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandleGlyph {
    pub index: usize,
    pub center_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body: Rect,
    pub direction: Direction,
}

/// Body width for a slot: `BODY_WIDTH_RATIO` of it, capped, and at least a pixel if the slot allows.
pub fn body_width_for(slot_width: f64) -> f64 {
    let width = (slot_width * BODY_WIDTH_RATIO).min(MAX_BODY_WIDTH);
    if width < 1.0 { slot_width.min(1.0) } else { width }
}

#[derive(Debug, Clone, Default)]
pub struct CandleRenderer {
    style: ChartStyle,
}

impl CandleRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn color_for(&self, direction: Direction) -> Color {
        match direction {
            Direction::Up => self.style.up_color,
            Direction::Down => self.style.down_color,
        }
    }

    /// Geometry of every glyph, in sequence order.
    pub fn layout(&self, bars: &BarSequence, mapper: &CoordinateMapper) -> Vec<CandleGlyph> {
        let body_width = body_width_for(mapper.slot_width());

        #[cfg(feature = "parallel")]
        if bars.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return bars
                .as_slice()
                .par_iter()
                .enumerate()
                .map(|(index, bar)| glyph_for(index, bar, mapper, body_width))
                .collect();
        }

        bars.iter()
            .enumerate()
            .map(|(index, bar)| glyph_for(index, bar, mapper, body_width))
            .collect()
    }

    /// Full chart pass.
    pub fn render<S: ChartSurface + ?Sized>(
        &self,
        bars: &BarSequence,
        mapper: &CoordinateMapper,
        surface: &mut S,
    ) -> ChartResult<usize> {
        surface.clear(self.style.background);

        if self.style.show_grid {
            self.draw_price_scale(mapper, surface);
        }
        self.draw_time_scale(bars, mapper, surface);
        self.draw_borders(mapper, surface);

        let glyphs = self.layout(bars, mapper);
        for glyph in &glyphs {
            self.draw_glyph(glyph, surface);
        }

        crate::log_trace!(crate::domain::logging::LogComponent::Domain("CandleRenderer"), "drew {} glyphs", glyphs.len());
        surface.present()?;
        Ok(glyphs.len())
    }

    /// "No data" pass: clears everything and centers `message`.
    pub fn render_placeholder<S: ChartSurface + ?Sized>(&self, message: &str, surface: &mut S) -> ChartResult<()> {
        surface.clear(self.style.placeholder_background);
        let size = surface.size();
        let style = TextStyle {
            font: self.style.placeholder_font.clone(),
            color: self.style.text_color.with_alpha(0.7),
            align: TextAlign::Center,
        };
        surface.text(message, Point::new(size.width as f64 / 2.0, size.height as f64 / 2.0), &style);
        surface.present()
    }

    fn draw_glyph<S: ChartSurface + ?Sized>(&self, glyph: &CandleGlyph, surface: &mut S) {
        let color = self.color_for(glyph.direction);
        surface.line(
            Point::new(glyph.center_x, glyph.wick_top),
            Point::new(glyph.center_x, glyph.wick_bottom),
            color,
            WICK_WIDTH,
        );
        surface.fill_rect(glyph.body, color);
        surface.stroke_rect(glyph.body, color, 1.0);
    }

    fn draw_price_scale<S: ChartSurface + ?Sized>(&self, mapper: &CoordinateMapper, surface: &mut S) {
        let plot = mapper.plot_area();
        let (min, max) = mapper.price_range();
        let show_labels = surface.size().width as f64 - plot.right() >= PRICE_LABEL_MIN_SPACE;
        let label_style = self.style.label_style(TextAlign::Left);

        for price in round_price_levels(min, max, TARGET_PRICE_LINES) {
            let y = mapper.price_to_y(price);
            surface.line(Point::new(plot.x, y), Point::new(plot.right(), y), self.style.grid_color, 1.0);
            if show_labels {
                surface.text(&format_price(price), Point::new(plot.right() + PRICE_LABEL_GAP, y + 4.0), &label_style);
            }
        }
    }

    fn draw_time_scale<S: ChartSurface + ?Sized>(&self, bars: &BarSequence, mapper: &CoordinateMapper, surface: &mut S) {
        let plot = mapper.plot_area();
        if bars.is_empty() || surface.size().height as f64 - plot.bottom() < TIME_LABEL_MIN_SPACE {
            return;
        }

        let max_labels = ((plot.width / TIME_LABEL_SPACING).floor() as usize).max(1);
        let step = bars.len().div_ceil(max_labels);
        let label_style = self.style.label_style(TextAlign::Center);

        for (index, bar) in bars.iter().enumerate().step_by(step) {
            let x = mapper.x_for_index(index);
            if self.style.show_grid {
                surface.line(Point::new(x, plot.y), Point::new(x, plot.bottom()), self.style.grid_color, 1.0);
            }
            surface.text(
                &bar.timestamp.format_minutes(),
                Point::new(x, plot.bottom() + TIME_LABEL_OFFSET),
                &label_style,
            );
        }
    }

    fn draw_borders<S: ChartSurface + ?Sized>(&self, mapper: &CoordinateMapper, surface: &mut S) {
        let plot = mapper.plot_area();
        let color = self.style.border_color;
        surface.line(Point::new(plot.right(), plot.y), Point::new(plot.right(), plot.bottom()), color, 1.0);
        surface.line(Point::new(plot.x, plot.bottom()), Point::new(plot.right(), plot.bottom()), color, 1.0);
    }
}

fn glyph_for(index: usize, bar: &Bar, mapper: &CoordinateMapper, body_width: f64) -> CandleGlyph {
    let ohlcv = &bar.ohlcv;
    let center_x = mapper.x_for_index(index);
    let (body_top, body_bottom) = body_span(
        mapper.price_to_y(ohlcv.open.value()),
        mapper.price_to_y(ohlcv.close.value()),
        mapper.plot_area(),
    );

    let y_high = mapper.price_to_y(ohlcv.high.value());
    let y_low = mapper.price_to_y(ohlcv.low.value());

    CandleGlyph {
        index,
        center_x,
        // The wick always encloses the body, even for flat or malformed bars.
        wick_top: y_high.min(y_low).min(body_top),
        wick_bottom: y_high.max(y_low).max(body_bottom),
        body: Rect::new(center_x - body_width / 2.0, body_top, body_width, body_bottom - body_top),
        direction: bar.direction(),
    }
}

fn body_span(y_open: f64, y_close: f64, plot: Rect) -> (f64, f64) {
    let top = y_open.min(y_close);
    let bottom = y_open.max(y_close);
    if bottom - top >= MIN_BODY_HEIGHT {
        return (top, bottom);
    }

    let center = (top + bottom) / 2.0;
    let mut top = center - MIN_BODY_HEIGHT / 2.0;
    let mut bottom = center + MIN_BODY_HEIGHT / 2.0;
    if top < plot.y {
        bottom += plot.y - top;
        top = plot.y;
    }
    if bottom > plot.bottom() {
        top -= bottom - plot.bottom();
        bottom = plot.bottom();
    }
    (top.max(plot.y), bottom)
}

/// Round price levels (1, 2, 2.5, 5 × 10^k steps) inside `[min, max]`, about `target` of them.
pub fn round_price_levels(min: f64, max: f64, target: usize) -> Vec<f64> {
    let range = max - min;
    if !(range > 0.0) || !range.is_finite() || target == 0 {
        return Vec::new();
    }

    let rough_step = range / target as f64;
    let magnitude = 10_f64.powf(rough_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= rough_step)
        .unwrap_or(magnitude * 10.0);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn format_price(price: f64) -> String {
    if price.abs() >= 1000.0 { format!("{:.0}", price) } else { format!("{:.2}", price) }
}
