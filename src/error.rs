use crate::exception::{ExceptionFilter, HttpExceptionFilter};
use crate::lifecycle::LifecycleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HelloMvcError>;

#[derive(Debug, Error)]
pub enum HelloMvcError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for HelloMvcError {
    fn into_response(self) -> axum::response::Response {
        HttpExceptionFilter.catch(Box::new(self))
    }
}
