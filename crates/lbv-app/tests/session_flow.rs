//! End-to-end session behavior over real and injected models.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lbv_app::{
    AppConfig, FailureKind, PredictionError, PredictionService, Query, Session, SpeedUnit,
};
use lbv_fuels::{FuelCatalog, ValidationError};
use lbv_model::{FeatureVector, LabelEncoder, ModelBundle, ModelError, Regressor, load_bundle};

fn demo_bundle(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/bundles")
        .join(name)
}

/// Panics on the first call, then returns a fixed value.
struct FlakyModel {
    calls: AtomicUsize,
}

impl Regressor for FlakyModel {
    fn name(&self) -> &str {
        "flaky"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("native backend crashed");
        }
        Ok(50.0)
    }
}

struct CountingModel {
    calls: AtomicUsize,
}

impl Regressor for CountingModel {
    fn name(&self) -> &str {
        "counting"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(40.0)
    }
}

fn service_over(regressor: Arc<dyn Regressor>) -> PredictionService {
    let catalog = Arc::new(FuelCatalog::builtin().unwrap());
    let encoder = Arc::new(LabelEncoder::fit(catalog.list_fuel_ids()));
    let bundle = ModelBundle::from_parts("double", regressor, encoder, catalog).unwrap();
    PredictionService::from_bundle(&bundle)
}

#[test]
fn methane_prediction_with_demo_trees() {
    let bundle = load_bundle(&demo_bundle("lbv_demo.json")).unwrap();
    let service = PredictionService::from_bundle(&bundle);
    let mut session = Session::new(&AppConfig::default());

    let result = session
        .predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
        .unwrap();
    assert_eq!(result.raw_cm_per_s, 36.0);
    assert_eq!(result.display(), "36.00 cm/s");

    session.set_unit(SpeedUnit::MetersPerSecond);
    let result = session
        .predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
        .unwrap();
    assert_eq!(result.display(), "0.3600 m/s");
    assert_eq!(session.history().len(), 2);
}

#[test]
fn invalid_blend_ratio_never_calls_model() {
    let model = Arc::new(CountingModel {
        calls: AtomicUsize::new(0),
    });
    let service = service_over(model.clone());
    let mut session = Session::default();

    let err = session
        .predict(
            &service,
            Query::new("ch4_h2_air", 300.0, 2.0, 1.0, 0.3, 0.3),
        )
        .unwrap_err();
    match &err {
        PredictionError::Validation(ValidationError::InvalidBlendRatio { valid, .. }) => {
            assert_eq!(valid.len(), 5);
        }
        other => panic!("expected blend rejection, got {other:?}"),
    }
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    assert!(session.history().is_empty());

    session
        .predict(
            &service,
            Query::new("ch4_h2_air", 300.0, 2.0, 1.0, 0.7, 0.3),
        )
        .unwrap();
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn model_panic_keeps_session_usable() {
    let service = service_over(Arc::new(FlakyModel {
        calls: AtomicUsize::new(0),
    }));
    let mut session = Session::default();
    let query = Query::pure("propane_air", 350.0, 2.0, 1.1);

    let err = session.predict(&service, query.clone()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Inference);
    assert!(err.to_string().contains("native backend crashed"));
    assert!(session.history().is_empty());

    let result = session.predict(&service, query).unwrap();
    assert_eq!(result.raw_cm_per_s, 50.0);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn history_window_and_eviction() {
    let bundle = load_bundle(&demo_bundle("lbv_demo.json")).unwrap();
    let service = PredictionService::from_bundle(&bundle);
    let config = AppConfig {
        history_capacity: 3,
        ..AppConfig::default()
    };
    let mut session = Session::new(&config);

    for t in [300.0, 350.0, 420.0, 500.0] {
        session
            .predict(&service, Query::pure("methane_air", t, 1.0, 1.0))
            .unwrap();
    }

    assert_eq!(session.history().len(), 3);
    let recent = session.recent(2);
    assert_eq!(recent[0].query.temperature_k, 500.0);
    assert_eq!(recent[1].query.temperature_k, 420.0);
    assert_eq!(recent[0].result.raw_cm_per_s, 51.0);
}

#[test]
fn one_service_many_sessions() {
    let bundle = load_bundle(&demo_bundle("methane_linear.yaml")).unwrap();
    let service = PredictionService::from_bundle(&bundle);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = service.clone();
            std::thread::spawn(move || {
                let mut session = Session::default();
                for _ in 0..=i {
                    session
                        .predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
                        .unwrap();
                }
                session.history().len()
            })
        })
        .collect();

    let lens: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(lens, vec![1, 2, 3, 4]);
}

#[test]
fn bundle_catalog_limits_fuels() {
    let bundle = load_bundle(&demo_bundle("methane_linear.yaml")).unwrap();
    let service = PredictionService::from_bundle(&bundle);
    let err = service
        .predict(
            &Query::pure("propane_air", 300.0, 1.0, 1.0),
            SpeedUnit::CentimetersPerSecond,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PredictionError::Validation(ValidationError::UnknownFuel { .. })
    ));
    assert!(service.describe_fuel("methane_air").is_ok());
}
