//! Shared application service layer for the LBV predictor.
//!
//! This crate ties the fuel catalog, the domain validator and the model bundle
//! into one prediction service, and provides per-user sessions with their own
//! bounded history. Front ends (the CLI today) only talk to this layer.

pub mod config;
pub mod error;
pub mod history;
pub mod prediction_service;
pub mod session;

// Re-export key types for convenience
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_DISPLAY, HistoryEntry, HistoryLog};
pub use prediction_service::{FailureKind, PredictionError, PredictionResult, PredictionService};
pub use session::Session;

pub use lbv_core::SpeedUnit;
pub use lbv_fuels::Query;
