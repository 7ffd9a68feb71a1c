use derive_more::Display;

/// Misuse of the chart lifecycle. These are caller bugs, not recoverable states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LifecycleError {
    #[display(fmt = "chart is already mounted")]
    AlreadyMounted,
    #[display(fmt = "chart is not mounted")]
    NotMounted,
}

impl std::error::Error for LifecycleError {}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ChartError {
    #[display(fmt = "Lifecycle Error: {}", _0)]
    Lifecycle(LifecycleError),
    #[display(fmt = "Surface Unavailable: {}", _0)]
    SurfaceUnavailable(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
}

impl std::error::Error for ChartError {}

/// Errors surfaced at the application edge (fetch collaborator and hosts).
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Decode Error: {}", _0)]
    Decode(String),
    #[display(fmt = "{}", _0)]
    Chart(ChartError),
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
}

impl std::error::Error for AppError {}

impl From<LifecycleError> for ChartError {
    fn from(err: LifecycleError) -> Self {
        ChartError::Lifecycle(err)
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::Chart(err)
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        AppError::Chart(ChartError::Lifecycle(err))
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
pub type AppResult<T> = Result<T, AppError>;
