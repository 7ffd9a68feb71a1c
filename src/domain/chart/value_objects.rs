use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Default chart width in CSS pixels
pub const DEFAULT_WIDTH: u32 = 600;
/// Default chart height in CSS pixels
pub const DEFAULT_HEIGHT: u32 = 400;

/// Value Object - RGBA color, channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// CSS color string understood by Canvas 2D (`#rrggbb` or `rgba(...)`).
    pub fn to_css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                self.a.clamp(0.0, 1.0)
            )
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Pixel size of a chart surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Space reserved around the plot area for the scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartInsets {
    fn default() -> Self {
        Self { top: 12.0, right: 64.0, bottom: 28.0, left: 8.0 }
    }
}

impl ChartInsets {
    pub const NONE: ChartInsets = ChartInsets { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum TextAlign {
    #[strum(serialize = "left")]
    Left,
    #[strum(serialize = "center")]
    Center,
    #[strum(serialize = "right")]
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: String,
    pub color: Color,
    pub align: TextAlign,
}

/// Colors and fonts of the chart; defaults follow the dashboard's dark theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub up_color: Color,
    pub down_color: Color,
    pub background: Color,
    pub placeholder_background: Color,
    pub grid_color: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub font: String,
    pub placeholder_font: String,
    pub show_grid: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            up_color: Color::from_hex(0x26a69a),
            down_color: Color::from_hex(0xef5350),
            background: Color::from_hex(0x1e2433),
            placeholder_background: Color::from_hex(0x252b3a),
            grid_color: Color::WHITE.with_alpha(0.1),
            border_color: Color::WHITE.with_alpha(0.2),
            text_color: Color::WHITE,
            font: "11px sans-serif".to_string(),
            placeholder_font: "14px sans-serif".to_string(),
            show_grid: true,
        }
    }
}

impl ChartStyle {
    pub fn label_style(&self, align: TextAlign) -> TextStyle {
        TextStyle { font: self.font.clone(), color: self.text_color, align }
    }
}

/// Mount-time configuration. `symbol` is a display label and never affects layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub symbol: String,
    pub insets: ChartInsets,
    pub style: ChartStyle,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            symbol: String::new(),
            insets: ChartInsets::default(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartOptions {
    pub fn for_symbol(symbol: &str) -> Self {
        Self { symbol: symbol.to_string(), ..Default::default() }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    pub fn placeholder_text(&self) -> String {
        format!("No data available for {}", self.symbol)
    }
}
