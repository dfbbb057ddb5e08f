//! Float checks shared by the catalog, the model loader and unit conversion.

use crate::{LbvError, LbvResult};

/// Absolute/relative closeness test for converted quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerance {
    /// Round-off left behind by a chain of unit conversions.
    pub const CONVERSION: Self = Self {
        abs: 1e-12,
        rel: 1e-9,
    };

    pub const fn new(abs: f64, rel: f64) -> Self {
        Self { abs, rel }
    }

    pub fn close(self, a: f64, b: f64) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::CONVERSION
    }
}

pub fn ensure_finite(value: f64, what: &'static str) -> LbvResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LbvError::NonFinite { what, value })
    }
}

/// Finite and within `[0, 1]`, e.g. one component of a blend pair.
pub fn ensure_fraction(value: f64, what: &'static str) -> LbvResult<f64> {
    let value = ensure_finite(value, what)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LbvError::NotAFraction { what, value })
    }
}
