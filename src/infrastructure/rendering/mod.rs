pub mod canvas_surface;
pub mod recording_surface;

pub use canvas_surface::{CanvasSurface, CanvasSurfaceProvider};
pub use recording_surface::{DrawCommand, RecordingSurface, RecordingSurfaceProvider, TestContainer};
