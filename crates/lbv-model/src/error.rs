//! Model, encoding and bundle errors.

use std::path::PathBuf;

use lbv_fuels::CatalogError;
use thiserror::Error;

/// Result type for bundle loading.
pub type BundleResult<T> = Result<T, BundleError>;

/// Failure inside the regressor while evaluating one row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Inference failed: {message}")]
    Inference { message: String },

    #[error("Model returned a non-finite value: {value}")]
    NonFiniteOutput { value: f64 },

    #[error("Malformed model: {what}")]
    Malformed { what: String },
}

/// Fuel label could not be mapped to a categorical id.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("Fuel '{label}' is not known to the label encoder")]
    UnknownLabel { label: String },
}

/// Bundle could not be loaded. Always fatal to the service.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to read bundle file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported bundle format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported bundle version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid regressor: {what}")]
    Regressor { what: String },

    #[error("Invalid label encoder: {what}")]
    Encoder { what: String },

    #[error("Invalid fuel metadata: {0}")]
    Catalog(#[from] CatalogError),

    #[error(
        "Label encoder does not match the fuel catalog (missing from encoder: {missing_in_encoder:?}, missing from catalog: {missing_in_catalog:?})"
    )]
    EncoderMismatch {
        missing_in_encoder: Vec<String>,
        missing_in_catalog: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::Inference {
            message: "tree walk exceeded depth".into(),
        };
        assert!(err.to_string().contains("tree walk"));

        let err = EncodingError::UnknownLabel {
            label: "kerosene".into(),
        };
        assert!(err.to_string().contains("kerosene"));
    }

    #[test]
    fn mismatch_lists_both_sides() {
        let err = BundleError::EncoderMismatch {
            missing_in_encoder: vec!["propane_air".into()],
            missing_in_catalog: vec!["butane_air".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("propane_air"));
        assert!(msg.contains("butane_air"));
    }
}
