//! Drawing substrate the chart paints onto.
//!
//! The renderer only speaks in these primitives, so the same draw pass runs against the
//! browser canvas and against an in-memory recorder.

use super::value_objects::{Color, Point, Rect, SurfaceSize, TextStyle};
use crate::domain::errors::ChartResult;

pub trait ChartSurface {
    fn size(&self) -> SurfaceSize;

    /// Change the backing store dimensions. Contents are undefined until the next full pass.
    fn set_size(&mut self, size: SurfaceSize);

    /// Overwrite every pixel with `color`. Each pass starts here.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64);

    fn line(&mut self, from: Point, to: Point, color: Color, line_width: f64);

    fn text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Present the finished frame.
    fn present(&mut self) -> ChartResult<()> {
        Ok(())
    }

    /// Drop backing resources. Must tolerate repeated calls.
    fn release(&mut self);
}

/// Creates surfaces bound to a host container.
pub trait SurfaceProvider {
    type Container;
    type Surface: ChartSurface;

    /// Fails with `ChartError::SurfaceUnavailable` when the container is missing or detached.
    fn acquire(&mut self, container: &Self::Container, size: SurfaceSize) -> ChartResult<Self::Surface>;
}
