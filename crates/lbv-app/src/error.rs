//! Error types for the lbv-app service layer.

use std::path::PathBuf;

use crate::prediction_service::PredictionError;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Model bundle error: {0}")]
    Bundle(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No model bundle given (pass a bundle path or set bundle_path in the config)")]
    NoBundle,

    #[error("{0}")]
    Prediction(#[from] PredictionError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lbv-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<lbv_model::BundleError> for AppError {
    fn from(err: lbv_model::BundleError) -> Self {
        AppError::Bundle(err.to_string())
    }
}

impl From<lbv_fuels::UnitError> for AppError {
    fn from(err: lbv_fuels::UnitError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<lbv_core::LbvError> for AppError {
    fn from(err: lbv_core::LbvError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Config(format!("Failed to parse config YAML: {err}"))
    }
}
