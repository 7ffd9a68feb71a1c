use crate::domain::{
    chart::{ChartSurface, Color, Point, Rect, SurfaceProvider, SurfaceSize, TextStyle},
    errors::{ChartError, ChartResult},
    logging::{LogComponent, get_logger},
};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

/// Canvas 2D surface living as a child `<canvas>` of the host container.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    size: SurfaceSize,
    released: bool,
}

impl CanvasSurface {
    /// Wrap an existing canvas element and size its backing store.
    pub fn from_canvas(canvas: HtmlCanvasElement, size: SurfaceSize) -> ChartResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| ChartError::SurfaceUnavailable("failed to get 2D context".to_string()))?
            .ok_or_else(|| ChartError::SurfaceUnavailable("2D context not supported".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::SurfaceUnavailable("failed to cast to 2D context".to_string()))?;

        let mut surface = Self { canvas, context, size, released: false };
        surface.set_size(size);
        Ok(surface)
    }

    /// Wrap `canvas` and append it to `container`.
    ///
    /// The context is acquired first, so a canvas that cannot draw is never attached.
    pub fn attach(container: &HtmlElement, canvas: HtmlCanvasElement, size: SurfaceSize) -> ChartResult<Self> {
        let surface = Self::from_canvas(canvas, size)?;
        container
            .append_child(&surface.canvas)
            .map_err(|_| ChartError::SurfaceUnavailable("failed to attach canvas".to_string()))?;
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn stroke_style(&self, color: Color, line_width: f64) {
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(line_width);
    }
}

impl ChartSurface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", size.width));
        let _ = style.set_property("height", &format!("{}px", size.height));
    }

    fn clear(&mut self, color: Color) {
        let (width, height) = (self.size.width as f64, self.size.height as f64);
        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.stroke_style(color, line_width);
        self.context.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn line(&mut self, from: Point, to: Point, color: Color, line_width: f64) {
        self.stroke_style(color, line_width);
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.context.set_font(&style.font);
        self.context.set_text_align(style.align.as_ref());
        self.context.set_fill_style_str(&style.color.to_css());
        if self.context.fill_text(text, at.x, at.y).is_err() {
            get_logger().warn(LogComponent::Infrastructure("CanvasSurface"), &format!("fill_text failed for '{}'", text));
        }
    }

    fn present(&mut self) -> ChartResult<()> {
        if self.released {
            return Err(ChartError::Rendering("surface already released".to_string()));
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.canvas.remove();
        get_logger().debug(LogComponent::Infrastructure("CanvasSurface"), "canvas removed from container");
    }
}

/// Appends a fresh `<canvas>` to the container on every mount.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasSurfaceProvider;

impl CanvasSurfaceProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SurfaceProvider for CanvasSurfaceProvider {
    type Container = HtmlElement;
    type Surface = CanvasSurface;

    fn acquire(&mut self, container: &HtmlElement, size: SurfaceSize) -> ChartResult<CanvasSurface> {
        if !container.is_connected() {
            return Err(ChartError::SurfaceUnavailable("container is not attached to the document".to_string()));
        }

        let document = container
            .owner_document()
            .ok_or_else(|| ChartError::SurfaceUnavailable("container has no owner document".to_string()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|_| ChartError::SurfaceUnavailable("failed to create canvas element".to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::SurfaceUnavailable("created element is not a canvas".to_string()))?;

        let surface = CanvasSurface::attach(container, canvas, size)?;
        get_logger().info(
            LogComponent::Infrastructure("CanvasSurface"),
            &format!("canvas {}x{} attached", size.width, size.height),
        );
        Ok(surface)
    }
}
