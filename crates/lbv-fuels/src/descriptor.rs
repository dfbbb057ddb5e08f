//! Fuel descriptors: the valid input domain of one fuel.

use core::fmt;

use crate::error::{CatalogError, CatalogResult, InputField};
use lbv_core::ensure_fraction;
use serde::{Deserialize, Serialize};

/// The only composition a non-blend fuel accepts.
pub const PURE_FUEL_PAIR: BlendPair = BlendPair {
    frac_a: 1.0,
    frac_b: 0.0,
};

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive membership. NaN is never contained.
    pub fn contains(&self, v: f64) -> bool {
        (self.min..=self.max).contains(&v)
    }

    fn check(&self, fuel_id: &str, field: InputField) -> CatalogResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CatalogError::NonFiniteBound {
                fuel_id: fuel_id.to_string(),
                field,
            });
        }
        if self.min > self.max {
            return Err(CatalogError::InvertedRange {
                fuel_id: fuel_id.to_string(),
                field,
                range: *self,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A `(frac_a, frac_b)` composition. Compared by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct BlendPair {
    pub frac_a: f64,
    pub frac_b: f64,
}

impl BlendPair {
    pub const fn new(frac_a: f64, frac_b: f64) -> Self {
        Self { frac_a, frac_b }
    }

    fn is_well_formed(&self) -> bool {
        ensure_fraction(self.frac_a, "frac_a").is_ok()
            && ensure_fraction(self.frac_b, "frac_b").is_ok()
    }
}

impl From<(f64, f64)> for BlendPair {
    fn from((frac_a, frac_b): (f64, f64)) -> Self {
        Self { frac_a, frac_b }
    }
}

impl From<BlendPair> for (f64, f64) {
    fn from(pair: BlendPair) -> Self {
        (pair.frac_a, pair.frac_b)
    }
}

impl fmt::Display for BlendPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.frac_a, self.frac_b)
    }
}

/// Valid input domain of a single fuel.
///
/// Temperature bounds are Kelvin, pressure bounds are bar (absolute).
/// Construction checks every shape invariant, so a descriptor that exists is
/// always well formed; fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelDescriptor {
    id: String,
    display_name: String,
    temperature_k: Range,
    pressure_bar: Range,
    phi: Range,
    is_blend: bool,
    valid_blend_pairs: Vec<BlendPair>,
    source_info: Option<String>,
}

impl FuelDescriptor {
    /// Describe a single-component fuel. Its only valid pair is `(1.0, 0.0)`.
    pub fn pure(
        id: impl Into<String>,
        temperature_k: Range,
        pressure_bar: Range,
        phi: Range,
    ) -> CatalogResult<Self> {
        Self::new(id, temperature_k, pressure_bar, phi, false, Vec::new())
    }

    /// Describe a two-component blend restricted to `pairs`.
    pub fn blend(
        id: impl Into<String>,
        temperature_k: Range,
        pressure_bar: Range,
        phi: Range,
        pairs: Vec<BlendPair>,
    ) -> CatalogResult<Self> {
        Self::new(id, temperature_k, pressure_bar, phi, true, pairs)
    }

    /// General constructor used when the blend flag comes from data.
    ///
    /// For non-blend fuels `pairs` may be empty or exactly `[(1.0, 0.0)]`.
    pub fn new(
        id: impl Into<String>,
        temperature_k: Range,
        pressure_bar: Range,
        phi: Range,
        is_blend: bool,
        pairs: Vec<BlendPair>,
    ) -> CatalogResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }

        temperature_k.check(&id, InputField::Temperature)?;
        pressure_bar.check(&id, InputField::Pressure)?;
        phi.check(&id, InputField::Phi)?;

        let valid_blend_pairs = if is_blend {
            check_blend_pairs(&id, &pairs)?;
            pairs
        } else {
            if pairs.iter().any(|p| *p != PURE_FUEL_PAIR) {
                return Err(CatalogError::PureFuelPair {
                    fuel_id: id,
                    expected: PURE_FUEL_PAIR,
                });
            }
            vec![PURE_FUEL_PAIR]
        };

        Ok(Self {
            display_name: id.clone(),
            id,
            temperature_k,
            pressure_bar,
            phi,
            is_blend,
            valid_blend_pairs,
            source_info: None,
        })
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_source_info(mut self, source: impl Into<String>) -> Self {
        self.source_info = Some(source.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn temperature_range(&self) -> Range {
        self.temperature_k
    }

    pub fn pressure_range(&self) -> Range {
        self.pressure_bar
    }

    pub fn phi_range(&self) -> Range {
        self.phi
    }

    pub fn is_blend(&self) -> bool {
        self.is_blend
    }

    /// Permissible pairs. Always `[(1.0, 0.0)]` for non-blend fuels.
    pub fn valid_blend_pairs(&self) -> &[BlendPair] {
        &self.valid_blend_pairs
    }

    /// Exact-match membership test.
    pub fn accepts_pair(&self, pair: BlendPair) -> bool {
        self.valid_blend_pairs.contains(&pair)
    }

    pub fn source_info(&self) -> Option<&str> {
        self.source_info.as_deref()
    }

    /// Range for a numeric input field, `None` for fuel and fractions.
    pub fn range_of(&self, field: InputField) -> Option<Range> {
        match field {
            InputField::Temperature => Some(self.temperature_k),
            InputField::Pressure => Some(self.pressure_bar),
            InputField::Phi => Some(self.phi),
            InputField::Fuel | InputField::Fractions => None,
        }
    }
}

fn check_blend_pairs(fuel_id: &str, pairs: &[BlendPair]) -> CatalogResult<()> {
    if pairs.is_empty() {
        return Err(CatalogError::NoBlendPairs {
            fuel_id: fuel_id.to_string(),
        });
    }
    for (i, pair) in pairs.iter().enumerate() {
        if !pair.is_well_formed() {
            return Err(CatalogError::InvalidBlendPair {
                fuel_id: fuel_id.to_string(),
                pair: *pair,
            });
        }
        if pairs[..i].contains(pair) {
            return Err(CatalogError::DuplicateBlendPair {
                fuel_id: fuel_id.to_string(),
                pair: *pair,
            });
        }
    }
    Ok(())
}
