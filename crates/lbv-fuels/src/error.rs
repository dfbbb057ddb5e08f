//! Catalog and validation errors.

use core::fmt;

use crate::descriptor::{BlendPair, Range};
use thiserror::Error;

/// Result type for catalog construction.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Shape violations found while building descriptors or the catalog.
///
/// Any of these aborts catalog construction; there is no partial catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Fuel id must not be empty")]
    EmptyId,

    #[error("Fuel '{fuel_id}': {field} range has a non-finite bound")]
    NonFiniteBound { fuel_id: String, field: InputField },

    #[error("Fuel '{fuel_id}': {field} range {range} has min > max")]
    InvertedRange {
        fuel_id: String,
        field: InputField,
        range: Range,
    },

    #[error("Fuel '{fuel_id}': blend fuel has no valid blend pairs")]
    NoBlendPairs { fuel_id: String },

    #[error("Fuel '{fuel_id}': blend pair {pair} must hold finite fractions in [0, 1]")]
    InvalidBlendPair { fuel_id: String, pair: BlendPair },

    #[error("Fuel '{fuel_id}': duplicate blend pair {pair}")]
    DuplicateBlendPair { fuel_id: String, pair: BlendPair },

    #[error("Fuel '{fuel_id}': non-blend fuel may only list the pair {expected}")]
    PureFuelPair { fuel_id: String, expected: BlendPair },

    #[error("Duplicate fuel id: {fuel_id}")]
    DuplicateFuel { fuel_id: String },

    #[error("Catalog must contain at least one fuel")]
    Empty,
}

/// Input dimension of a query, used to point at the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Fuel,
    Temperature,
    Pressure,
    Phi,
    Fractions,
}

impl InputField {
    /// Canonical unit label for the field, empty when dimensionless.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Pressure => "bar",
            Self::Fuel | Self::Phi | Self::Fractions => "",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fuel => write!(f, "fuel"),
            Self::Temperature => write!(f, "temperature"),
            Self::Pressure => write!(f, "pressure"),
            Self::Phi => write!(f, "equivalence ratio"),
            Self::Fractions => write!(f, "blend fractions"),
        }
    }
}

/// Rejection of a candidate query against the fuel domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown fuel: '{fuel_id}'")]
    UnknownFuel { fuel_id: String },

    #[error("{field} {value} is outside the dataset range {range}")]
    OutOfRange {
        field: InputField,
        value: f64,
        range: Range,
    },

    #[error(
        "Blend ratio {attempted} is not available for '{fuel_id}'; valid pairs: {}",
        PairList(.valid)
    )]
    InvalidBlendRatio {
        fuel_id: String,
        attempted: BlendPair,
        valid: Vec<BlendPair>,
    },
}

impl ValidationError {
    /// The input a front end should highlight.
    pub fn field(&self) -> InputField {
        match self {
            Self::UnknownFuel { .. } => InputField::Fuel,
            Self::OutOfRange { field, .. } => *field,
            Self::InvalidBlendRatio { .. } => InputField::Fractions,
        }
    }
}

struct PairList<'a>(&'a [BlendPair]);

impl fmt::Display for PairList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pair}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let err = ValidationError::OutOfRange {
            field: InputField::Temperature,
            value: 700.0,
            range: Range::new(300.0, 606.0),
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("700"));
        assert!(msg.contains("[300, 606]"));
    }

    #[test]
    fn blend_ratio_lists_valid_pairs() {
        let err = ValidationError::InvalidBlendRatio {
            fuel_id: "ch4_h2_air".into(),
            attempted: BlendPair::new(0.3, 0.3),
            valid: vec![BlendPair::new(0.9, 0.1), BlendPair::new(0.8, 0.2)],
        };
        let msg = err.to_string();
        assert!(msg.contains("(0.3, 0.3)"));
        assert!(msg.contains("(0.9, 0.1), (0.8, 0.2)"));
        assert_eq!(err.field(), InputField::Fractions);
    }
}
