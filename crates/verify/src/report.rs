//! Verification reporting
//!
//! Purely additive aggregation: per-station tallies roll up into one run
//! report with every failing file enumerated.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-station verification tally.
#[derive(Debug, Clone, Serialize)]
pub struct StationReport {
    /// Canonical station code.
    pub station: String,
    /// Files tested.
    pub tested: usize,
    /// Files whose every record matched both sources.
    pub passed: usize,
    /// Files with any mismatch.
    pub failed: usize,
    /// Basenames of failing files.
    pub failures: Vec<String>,
}

impl StationReport {
    /// An empty tally for one station.
    pub fn new(station: impl Into<String>) -> Self {
        StationReport {
            station: station.into(),
            tested: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Count one passing file.
    pub fn record_pass(&mut self) {
        self.tested += 1;
        self.passed += 1;
    }

    /// Count one failing file.
    pub fn record_failure(&mut self, file: impl Into<String>) {
        self.tested += 1;
        self.failed += 1;
        self.failures.push(file.into());
    }
}

/// Whole-run aggregation across stations.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// When the verification run began.
    pub started_at: DateTime<Utc>,
    /// One report per station, in processing order.
    pub stations: Vec<StationReport>,
}

impl RunReport {
    /// An empty report stamped with the current time.
    pub fn new() -> Self {
        RunReport {
            started_at: Utc::now(),
            stations: Vec::new(),
        }
    }

    /// Append one station's tally.
    pub fn push(&mut self, station: StationReport) {
        self.stations.push(station);
    }

    /// Grand total of files tested.
    pub fn tested(&self) -> usize {
        self.stations.iter().map(|s| s.tested).sum()
    }

    /// Grand total of passing files.
    pub fn passed(&self) -> usize {
        self.stations.iter().map(|s| s.passed).sum()
    }

    /// Grand total of failing files.
    pub fn failed(&self) -> usize {
        self.stations.iter().map(|s| s.failed).sum()
    }

    /// True when no file anywhere failed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Every failing basename across all stations.
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.stations
            .iter()
            .flat_map(|s| s.failures.iter().map(String::as_str))
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
