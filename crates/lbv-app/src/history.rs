//! Bounded, newest-first log of successful predictions.

use std::collections::VecDeque;

use lbv_fuels::Query;

use crate::prediction_service::PredictionResult;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_HISTORY_DISPLAY: usize = 5;

/// One successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Insertion order within the owning log, assigned by [`HistoryLog::record`].
    pub sequence: u64,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub query: Query,
    pub result: PredictionResult,
    /// One-line description shown in history listings.
    pub summary: String,
}

impl HistoryEntry {
    pub fn new(query: Query, result: PredictionResult) -> Self {
        let summary = summarize(&query, &result);
        Self {
            sequence: 0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            query,
            result,
            summary,
        }
    }
}

fn summarize(query: &Query, result: &PredictionResult) -> String {
    format!(
        "{} T={} K P={} bar phi={} ({}, {}) -> {}",
        query.fuel_id,
        query.temperature_k,
        query.pressure_bar,
        query.phi,
        query.frac_a,
        query.frac_b,
        result.display()
    )
}

/// Session history, newest entry first.
///
/// Holds at most `capacity` entries; recording past that drops the oldest.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            next_sequence: 1,
        }
    }

    pub fn record(&mut self, mut entry: HistoryEntry) {
        entry.sequence = self.next_sequence;
        self.next_sequence += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Up to `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().take(n).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbv_core::SpeedUnit;

    fn entry(temperature_k: f64) -> HistoryEntry {
        HistoryEntry::new(
            Query::pure("methane_air", temperature_k, 1.0, 1.0),
            PredictionResult::new(36.0, SpeedUnit::CentimetersPerSecond),
        )
    }

    #[test]
    fn recent_is_newest_first() {
        let mut log = HistoryLog::default();
        log.record(entry(300.0));
        log.record(entry(310.0));
        log.record(entry(320.0));

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query.temperature_k, 320.0);
        assert_eq!(recent[1].query.temperature_k, 310.0);
    }

    #[test]
    fn recent_on_short_log_returns_all() {
        let mut log = HistoryLog::default();
        assert!(log.recent(5).is_empty());
        log.record(entry(300.0));
        assert_eq!(log.recent(5).len(), 1);
        assert!(log.recent(0).is_empty());
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut log = HistoryLog::new(3);
        for t in [300.0, 310.0, 320.0, 330.0] {
            log.record(entry(t));
        }
        assert_eq!(log.len(), 3);
        let temps: Vec<f64> = log.iter().map(|e| e.query.temperature_k).collect();
        assert_eq!(temps, vec![330.0, 320.0, 310.0]);
        let sequences: Vec<u64> = log.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![4, 3, 2]);
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let mut log = HistoryLog::new(0);
        assert_eq!(log.capacity(), 1);
        log.record(entry(300.0));
        log.record(entry(310.0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.recent(1)[0].query.temperature_k, 310.0);
    }

    #[test]
    fn entry_summary_and_timestamp() {
        let e = entry(300.0);
        assert!(e.summary.starts_with("methane_air"));
        assert!(e.summary.ends_with("36.00 cm/s"));
        assert!(chrono::DateTime::parse_from_rfc3339(&e.timestamp).is_ok());
    }

    #[test]
    fn clear_empties_log() {
        let mut log = HistoryLog::default();
        log.record(entry(300.0));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
