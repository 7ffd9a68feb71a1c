//! Market data aggregate: bars, bar sequences and the fetch contract.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
