//! Chart aggregate: coordinate mapping, candle synthesis and the surface contract.

pub mod candle_renderer;
pub mod coordinate_mapper;
pub mod surface;
pub mod value_objects;

pub use candle_renderer::*;
pub use coordinate_mapper::*;
pub use surface::*;
pub use value_objects::*;
