use thiserror::Error;

pub type LbvResult<T> = Result<T, LbvError>;

/// Low-level numeric and argument failures. Higher crates wrap these in
/// their own error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LbvError {
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must lie in [0, 1], got {value}")]
    NotAFraction { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
