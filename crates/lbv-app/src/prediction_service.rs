//! Prediction orchestration: validate, encode, infer, convert.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use lbv_core::{SpeedUnit, Velocity, cm_per_s};
use lbv_fuels::{FuelCatalog, FuelDescriptor, Query, ValidationError, validate_query};
use lbv_model::{
    EncodingError, FeatureVector, FuelEncoder, ModelBundle, ModelError, Regressor, encode_features,
};
use tracing::{debug, info, warn};

/// Burning velocity prediction in the requested display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Regressor output, cm/s.
    pub raw_cm_per_s: f64,
    pub unit: SpeedUnit,
    /// `raw_cm_per_s` expressed in `unit`.
    pub converted: f64,
}

impl PredictionResult {
    pub fn new(raw_cm_per_s: f64, unit: SpeedUnit) -> Self {
        Self {
            raw_cm_per_s,
            unit,
            converted: unit.from_cm_per_s(raw_cm_per_s),
        }
    }

    /// Same prediction in another display unit.
    pub fn in_unit(&self, unit: SpeedUnit) -> Self {
        Self::new(self.raw_cm_per_s, unit)
    }

    pub fn velocity(&self) -> Velocity {
        cm_per_s(self.raw_cm_per_s)
    }

    /// Formatted value, e.g. `42.50 cm/s` or `0.4250 m/s`.
    pub fn display(&self) -> String {
        self.unit.format(self.converted)
    }
}

/// Category of a failed prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Encoding,
    Inference,
}

/// Typed failure of [`PredictionService::predict`]. None of these end a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Feature encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Model inference failed: {detail}")]
    Inference { detail: String },
}

impl PredictionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Encoding(_) => FailureKind::Encoding,
            Self::Inference { .. } => FailureKind::Inference,
        }
    }
}

/// Stateless prediction front of a loaded model.
///
/// Holds only shared read-only parts, so one service can serve every session
/// in the process.
#[derive(Clone)]
pub struct PredictionService {
    catalog: Arc<FuelCatalog>,
    encoder: Arc<dyn FuelEncoder>,
    regressor: Arc<dyn Regressor>,
}

impl PredictionService {
    pub fn new(
        catalog: Arc<FuelCatalog>,
        encoder: Arc<dyn FuelEncoder>,
        regressor: Arc<dyn Regressor>,
    ) -> Self {
        Self {
            catalog,
            encoder,
            regressor,
        }
    }

    pub fn from_bundle(bundle: &ModelBundle) -> Self {
        info!(
            bundle = %bundle.name,
            regressor = %bundle.regressor.name(),
            fuels = bundle.catalog.len(),
            "prediction service ready"
        );
        Self::new(
            Arc::clone(&bundle.catalog),
            Arc::clone(&bundle.encoder),
            Arc::clone(&bundle.regressor),
        )
    }

    pub fn catalog(&self) -> &FuelCatalog {
        &self.catalog
    }

    /// Descriptor for displaying a fuel's valid ranges.
    pub fn describe_fuel(&self, fuel_id: &str) -> Result<&FuelDescriptor, ValidationError> {
        self.catalog.lookup(fuel_id)
    }

    /// Predict the burning velocity for one query.
    ///
    /// The model is only called for a query that passed domain validation.
    /// Model errors, panics and non-finite outputs all surface as
    /// [`PredictionError::Inference`].
    pub fn predict(
        &self,
        query: &Query,
        unit: SpeedUnit,
    ) -> Result<PredictionResult, PredictionError> {
        validate_query(&self.catalog, query).inspect_err(|e| {
            warn!(fuel = %query.fuel_id, field = %e.field(), "query rejected: {e}");
        })?;

        let features = encode_features(self.encoder.as_ref(), query)?;
        debug!(fuel = %query.fuel_id, features = %features.describe(), "invoking regressor");

        let raw = self.invoke(&features)?;
        let result = PredictionResult::new(raw, unit);
        debug!(fuel = %query.fuel_id, raw_cm_per_s = raw, "prediction complete");
        Ok(result)
    }

    fn invoke(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.regressor.predict(features)));

        let raw = match outcome {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                warn!(regressor = %self.regressor.name(), "inference failed: {err}");
                return Err(PredictionError::Inference {
                    detail: err.to_string(),
                });
            }
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                warn!(regressor = %self.regressor.name(), "regressor panicked: {detail}");
                return Err(PredictionError::Inference { detail });
            }
        };

        if !raw.is_finite() {
            warn!(regressor = %self.regressor.name(), "regressor returned {raw}");
            return Err(PredictionError::Inference {
                detail: ModelError::NonFiniteOutput { value: raw }.to_string(),
            });
        }
        Ok(raw)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("model panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("model panicked: {s}")
    } else {
        "model panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbv_fuels::InputField;
    use lbv_model::LabelEncoder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed value and counts calls.
    struct FixedModel {
        value: f64,
        calls: AtomicUsize,
    }

    impl Regressor for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value)
        }
    }

    struct FailingModel;

    impl Regressor for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Err(ModelError::Inference {
                message: "backend unavailable".to_string(),
            })
        }
    }

    fn service_with(regressor: Arc<dyn Regressor>) -> PredictionService {
        let catalog = FuelCatalog::builtin().unwrap();
        let encoder = LabelEncoder::fit(catalog.list_fuel_ids());
        PredictionService::new(Arc::new(catalog), Arc::new(encoder), regressor)
    }

    #[test]
    fn converts_to_meters_per_second() {
        let service = service_with(Arc::new(FixedModel {
            value: 42.5,
            calls: AtomicUsize::new(0),
        }));
        let query = Query::pure("methane_air", 300.0, 1.0, 1.0);

        let cm = service
            .predict(&query, SpeedUnit::CentimetersPerSecond)
            .unwrap();
        assert_eq!(cm.converted, 42.5);
        assert_eq!(cm.display(), "42.50 cm/s");

        let m = service.predict(&query, SpeedUnit::MetersPerSecond).unwrap();
        assert_eq!(m.raw_cm_per_s, 42.5);
        assert_eq!(m.converted, 42.5 / 100.0);
        assert_eq!(m.display(), "0.4250 m/s");
    }

    #[test]
    fn rejected_query_never_reaches_model() {
        let model = Arc::new(FixedModel {
            value: 1.0,
            calls: AtomicUsize::new(0),
        });
        let service = service_with(model.clone());
        let query = Query::new("ch4_h2_air", 300.0, 2.0, 1.0, 0.3, 0.3);

        let err = service
            .predict(&query, SpeedUnit::CentimetersPerSecond)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Validation);
        assert!(matches!(
            err,
            PredictionError::Validation(ValidationError::InvalidBlendRatio { .. })
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn out_of_range_names_field() {
        let service = service_with(Arc::new(FixedModel {
            value: 1.0,
            calls: AtomicUsize::new(0),
        }));
        let query = Query::pure("methane_air", 700.0, 1.0, 1.0);
        match service.predict(&query, SpeedUnit::CentimetersPerSecond) {
            Err(PredictionError::Validation(e)) => assert_eq!(e.field(), InputField::Temperature),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn model_error_becomes_inference_failure() {
        let service = service_with(Arc::new(FailingModel));
        let query = Query::pure("methane_air", 300.0, 1.0, 1.0);
        let err = service
            .predict(&query, SpeedUnit::CentimetersPerSecond)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Inference);
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn non_finite_output_is_inference_failure() {
        let service = service_with(Arc::new(FixedModel {
            value: f64::NAN,
            calls: AtomicUsize::new(0),
        }));
        let query = Query::pure("methane_air", 300.0, 1.0, 1.0);
        let err = service
            .predict(&query, SpeedUnit::CentimetersPerSecond)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Inference);
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn encoder_gap_is_encoding_failure() {
        let catalog = FuelCatalog::builtin().unwrap();
        let encoder = LabelEncoder::fit(["ch4_h2_air"]);
        let service = PredictionService::new(
            Arc::new(catalog),
            Arc::new(encoder),
            Arc::new(FixedModel {
                value: 1.0,
                calls: AtomicUsize::new(0),
            }),
        );
        let query = Query::pure("methane_air", 300.0, 1.0, 1.0);
        assert_eq!(
            service
                .predict(&query, SpeedUnit::CentimetersPerSecond)
                .unwrap_err()
                .kind(),
            FailureKind::Encoding
        );
    }

    #[test]
    fn result_round_trips_between_units() {
        let r = PredictionResult::new(36.7, SpeedUnit::MetersPerSecond);
        let back = r.in_unit(SpeedUnit::CentimetersPerSecond);
        assert_eq!(back.converted, 36.7);
        assert!((SpeedUnit::MetersPerSecond.to_cm_per_s(r.converted) - 36.7).abs() < 1e-12);
    }
}
