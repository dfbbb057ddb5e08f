//! Feature vector: the wire contract between a query and the regressor.
//!
//! The field order and count are fixed by the trained model. Changing either
//! requires retraining; a mismatch produces wrong predictions, not errors.

use core::ops::Index;

use lbv_fuels::Query;

use crate::encoder::FuelEncoder;
use crate::error::EncodingError;

pub const FEATURE_COUNT: usize = 6;

pub const FUEL_ID_IDX: usize = 0;
pub const FRAC_A_IDX: usize = 1;
pub const FRAC_B_IDX: usize = 2;
pub const PHI_IDX: usize = 3;
pub const TEMPERATURE_K_IDX: usize = 4;
pub const PRESSURE_BAR_IDX: usize = 5;

/// Column names, in order, as used when the model was trained.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fuel_id_encoded",
    "frac_A",
    "frac_B",
    "phi",
    "temperature_K",
    "pressure_bar",
];

/// One model input row:
/// `[fuel_id_encoded, frac_a, frac_b, phi, temperature_k, pressure_bar]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(
        fuel_code: u32,
        frac_a: f64,
        frac_b: f64,
        phi: f64,
        temperature_k: f64,
        pressure_bar: f64,
    ) -> Self {
        let mut row = [0.0; FEATURE_COUNT];
        row[FUEL_ID_IDX] = f64::from(fuel_code);
        row[FRAC_A_IDX] = frac_a;
        row[FRAC_B_IDX] = frac_b;
        row[PHI_IDX] = phi;
        row[TEMPERATURE_K_IDX] = temperature_k;
        row[PRESSURE_BAR_IDX] = pressure_bar;
        Self(row)
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// `name=value` pairs for logging.
    pub fn describe(&self) -> String {
        FEATURE_NAMES
            .iter()
            .zip(self.0.iter())
            .map(|(name, v)| format!("{name}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

/// Build the feature row for a query.
///
/// The query is expected to have passed domain validation; an unknown fuel
/// here means the encoder and catalog disagree.
pub fn encode_features(
    encoder: &dyn FuelEncoder,
    query: &Query,
) -> Result<FeatureVector, EncodingError> {
    let fuel_code = encoder.encode(&query.fuel_id)?;
    Ok(FeatureVector::new(
        fuel_code,
        query.frac_a,
        query.frac_b,
        query.phi,
        query.temperature_k,
        query.pressure_bar,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LabelEncoder;

    fn encoder() -> LabelEncoder {
        LabelEncoder::fit(["methane_air", "ch4_h2_air", "propane_air"])
    }

    #[test]
    fn methane_scenario_row() {
        let enc = encoder();
        let query = Query::pure("methane_air", 300.0, 1.0, 1.0);
        let row = encode_features(&enc, &query).unwrap();
        let id = f64::from(enc.encode("methane_air").unwrap());
        assert_eq!(row.as_array(), &[id, 1.0, 0.0, 1.0, 300.0, 1.0]);
    }

    #[test]
    fn field_order_is_fixed() {
        let enc = encoder();
        let query = Query::new("ch4_h2_air", 450.0, 3.0, 0.8, 0.7, 0.3);
        let row = encode_features(&enc, &query).unwrap();
        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row[FUEL_ID_IDX], 0.0);
        assert_eq!(row[FRAC_A_IDX], 0.7);
        assert_eq!(row[FRAC_B_IDX], 0.3);
        assert_eq!(row[PHI_IDX], 0.8);
        assert_eq!(row[TEMPERATURE_K_IDX], 450.0);
        assert_eq!(row[PRESSURE_BAR_IDX], 3.0);
    }

    #[test]
    fn unknown_fuel_is_encoding_error() {
        let enc = encoder();
        let query = Query::pure("kerosene", 300.0, 1.0, 1.0);
        assert_eq!(
            encode_features(&enc, &query).unwrap_err(),
            EncodingError::UnknownLabel {
                label: "kerosene".into()
            }
        );
    }

    #[test]
    fn describe_names_every_column() {
        let row = FeatureVector::new(2, 1.0, 0.0, 1.0, 300.0, 1.0);
        let text = row.describe();
        for name in FEATURE_NAMES {
            assert!(text.contains(name));
        }
    }
}
