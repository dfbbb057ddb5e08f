//! Per-user session state: display unit and prediction history.

use lbv_core::SpeedUnit;
use lbv_fuels::Query;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::history::{HistoryEntry, HistoryLog};
use crate::prediction_service::{PredictionError, PredictionResult, PredictionService};

/// One interactive session. Sessions never share history.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    unit: SpeedUnit,
    history: HistoryLog,
    history_display: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        info!(session = %id, capacity = config.history_capacity, "session started");
        Self {
            id,
            unit: config.default_unit,
            history: HistoryLog::new(config.history_capacity),
            history_display: config.history_display.max(1),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: SpeedUnit) {
        debug!(session = %self.id, unit = %unit, "display unit changed");
        self.unit = unit;
    }

    /// Run a prediction in the session's unit.
    ///
    /// A success is recorded as exactly one history entry. A failure leaves
    /// the history untouched and the session usable.
    pub fn predict(
        &mut self,
        service: &PredictionService,
        query: Query,
    ) -> Result<PredictionResult, PredictionError> {
        let result = service.predict(&query, self.unit)?;
        self.history.record(HistoryEntry::new(query, result));
        Ok(result)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.history.recent(n)
    }

    /// Entries shown by a bare `history` request.
    pub fn recent_display(&self) -> Vec<&HistoryEntry> {
        self.history.recent(self.history_display)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lbv_fuels::FuelCatalog;
    use lbv_model::{FeatureVector, LabelEncoder, ModelError, Regressor};

    /// Echoes the temperature so entries are distinguishable.
    struct EchoTemperature;

    impl Regressor for EchoTemperature {
        fn name(&self) -> &str {
            "echo"
        }

        fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
            Ok(features[4] / 10.0)
        }
    }

    fn service() -> PredictionService {
        let catalog = FuelCatalog::builtin().unwrap();
        let encoder = LabelEncoder::fit(catalog.list_fuel_ids());
        PredictionService::new(
            Arc::new(catalog),
            Arc::new(encoder),
            Arc::new(EchoTemperature),
        )
    }

    #[test]
    fn success_records_one_entry() {
        let service = service();
        let mut session = Session::default();
        let result = session
            .predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(result.raw_cm_per_s, 30.0);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.recent(1)[0].result, result);
    }

    #[test]
    fn failure_records_nothing() {
        let service = service();
        let mut session = Session::default();
        assert!(
            session
                .predict(&service, Query::pure("kerosene_air", 300.0, 1.0, 1.0))
                .is_err()
        );
        assert!(session.history().is_empty());

        session
            .predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn unit_applies_to_later_predictions() {
        let service = service();
        let mut session = Session::default();
        session.set_unit(SpeedUnit::MetersPerSecond);
        let result = session
            .predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(result.unit, SpeedUnit::MetersPerSecond);
        assert!((result.converted - 0.30).abs() < 1e-12);
    }

    #[test]
    fn sessions_are_isolated() {
        let service = service();
        let mut a = Session::default();
        let b = Session::default();
        a.predict(&service, Query::pure("methane_air", 300.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(a.history().len(), 1);
        assert!(b.history().is_empty());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn display_window_follows_config() {
        let service = service();
        let config = AppConfig {
            history_display: 2,
            ..AppConfig::default()
        };
        let mut session = Session::new(&config);
        for t in [300.0, 320.0, 340.0] {
            session
                .predict(&service, Query::pure("methane_air", t, 1.0, 1.0))
                .unwrap();
        }
        let shown: Vec<f64> = session
            .recent_display()
            .iter()
            .map(|e| e.query.temperature_k)
            .collect();
        assert_eq!(shown, vec![340.0, 320.0]);
    }
}
