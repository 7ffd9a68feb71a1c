//! In-memory surface that records every primitive instead of rasterizing it.
//!
//! Used by the native test suite and the benchmarks, where no browser canvas exists.

use crate::domain::{
    chart::{ChartSurface, Color, Point, Rect, SurfaceProvider, SurfaceSize, TextStyle},
    errors::{ChartError, ChartResult},
};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { color: Color },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, line_width: f64 },
    Line { from: Point, to: Point, color: Color, line_width: f64 },
    Text { text: String, at: Point, style: TextStyle },
}

/// Holds the commands of the current frame; `clear` starts a new one.
#[derive(Debug)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    frames_presented: u64,
    released: bool,
    reject_present: bool,
    release_counter: Rc<Cell<usize>>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames_presented: 0,
            released: false,
            reject_present: false,
            release_counter: Rc::new(Cell::new(0)),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Filled rectangles drawn in `color`, in draw order.
    pub fn filled_in(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every x/y coordinate touched by the current frame.
    pub fn extent_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { rect, .. } | DrawCommand::StrokeRect { rect, .. } => {
                    points.push(Point::new(rect.x, rect.y));
                    points.push(Point::new(rect.right(), rect.bottom()));
                }
                DrawCommand::Line { from, to, .. } => {
                    points.push(*from);
                    points.push(*to);
                }
                DrawCommand::Clear { .. } | DrawCommand::Text { .. } => {}
            }
        }
        points
    }
}

impl ChartSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.clear();
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, line_width });
    }

    fn line(&mut self, from: Point, to: Point, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Line { from, to, color, line_width });
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text { text: text.to_string(), at, style: style.clone() });
    }

    fn present(&mut self) -> ChartResult<()> {
        if self.released {
            return Err(ChartError::Rendering("surface already released".to_string()));
        }
        if self.reject_present {
            return Err(ChartError::Rendering("present rejected".to_string()));
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.commands.clear();
            self.release_counter.set(self.release_counter.get() + 1);
        }
    }
}

/// Stand-in for a host DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContainer {
    pub id: String,
    pub attached: bool,
}

impl TestContainer {
    pub fn attached(id: &str) -> Self {
        Self { id: id.to_string(), attached: true }
    }

    pub fn detached(id: &str) -> Self {
        Self { id: id.to_string(), attached: false }
    }
}

/// Hands out [`RecordingSurface`]s and counts how many are still alive.
///
/// Clones share their counters, so a clone kept outside a lifecycle manager still observes it.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurfaceProvider {
    acquired: Rc<Cell<usize>>,
    released: Rc<Cell<usize>>,
    reject_present: bool,
}

impl RecordingSurfaceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces from this provider fail every `present`, like a lost context.
    pub fn rejecting_present() -> Self {
        Self { reject_present: true, ..Self::default() }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.get()
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    /// Surfaces acquired and not yet released.
    pub fn live_surfaces(&self) -> usize {
        self.acquired.get() - self.released.get()
    }
}

impl SurfaceProvider for RecordingSurfaceProvider {
    type Container = TestContainer;
    type Surface = RecordingSurface;

    fn acquire(&mut self, container: &TestContainer, size: SurfaceSize) -> ChartResult<RecordingSurface> {
        if !container.attached {
            return Err(ChartError::SurfaceUnavailable(format!("container '{}' is detached", container.id)));
        }
        self.acquired.set(self.acquired.get() + 1);
        let mut surface = RecordingSurface::new(size);
        surface.reject_present = self.reject_present;
        surface.release_counter = Rc::clone(&self.released);
        Ok(surface)
    }
}
