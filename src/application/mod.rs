pub mod chart_lifecycle;
pub mod use_cases;

pub use chart_lifecycle::*;
pub use use_cases::*;
