//! Domain validation of candidate queries.
//!
//! Blend ratios are checked as a discrete allow-list, never as a numeric
//! range: only experimentally realized ratios are admissible.

use crate::catalog::FuelCatalog;
use crate::descriptor::{BlendPair, FuelDescriptor, PURE_FUEL_PAIR, Range};
use crate::error::{InputField, ValidationError};

/// One prediction request, copied by value at submission time.
///
/// Temperature in Kelvin, pressure in bar (absolute).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub fuel_id: String,
    pub temperature_k: f64,
    pub pressure_bar: f64,
    pub phi: f64,
    pub frac_a: f64,
    pub frac_b: f64,
}

impl Query {
    pub fn new(
        fuel_id: impl Into<String>,
        temperature_k: f64,
        pressure_bar: f64,
        phi: f64,
        frac_a: f64,
        frac_b: f64,
    ) -> Self {
        Self {
            fuel_id: fuel_id.into(),
            temperature_k,
            pressure_bar,
            phi,
            frac_a,
            frac_b,
        }
    }

    /// Query for a single-component fuel, composition `(1.0, 0.0)`.
    pub fn pure(
        fuel_id: impl Into<String>,
        temperature_k: f64,
        pressure_bar: f64,
        phi: f64,
    ) -> Self {
        Self::new(
            fuel_id,
            temperature_k,
            pressure_bar,
            phi,
            PURE_FUEL_PAIR.frac_a,
            PURE_FUEL_PAIR.frac_b,
        )
    }

    pub fn blend_pair(&self) -> BlendPair {
        BlendPair::new(self.frac_a, self.frac_b)
    }
}

/// Check a query against the catalog.
///
/// Order: fuel, temperature, pressure, phi, blend pair. The first failing
/// check is reported. Returns the fuel's descriptor on success.
pub fn validate_query<'a>(
    catalog: &'a FuelCatalog,
    query: &Query,
) -> Result<&'a FuelDescriptor, ValidationError> {
    let descriptor = catalog.lookup(&query.fuel_id)?;

    check_range(
        InputField::Temperature,
        query.temperature_k,
        descriptor.temperature_range(),
    )?;
    check_range(
        InputField::Pressure,
        query.pressure_bar,
        descriptor.pressure_range(),
    )?;
    check_range(InputField::Phi, query.phi, descriptor.phi_range())?;

    // Non-blend descriptors hold exactly [(1.0, 0.0)], so one membership
    // test covers both cases.
    let attempted = query.blend_pair();
    if !descriptor.accepts_pair(attempted) {
        return Err(ValidationError::InvalidBlendRatio {
            fuel_id: descriptor.id().to_string(),
            attempted,
            valid: descriptor.valid_blend_pairs().to_vec(),
        });
    }

    Ok(descriptor)
}

fn check_range(field: InputField, value: f64, range: Range) -> Result<(), ValidationError> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            range,
        })
    }
}
