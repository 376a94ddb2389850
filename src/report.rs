/// Aggregated result of a sorting run.
use crate::error::SortError;
use crate::placer::Placement;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A candidate that could not be placed.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    /// Error kind label, e.g. `collision` or `io`.
    pub kind: &'static str,
    pub reason: String,
}

/// Per-run summary of placed and failed candidates.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub operation: String,
    pub dry_run: bool,
    pub placed: Vec<Placement>,
    /// Destination collisions; the file was left where it was.
    pub collisions: Vec<Failure>,
    /// Directory creation or move failures.
    pub failures: Vec<Failure>,
    /// Candidates never attempted because the run was cancelled.
    pub not_processed: Vec<PathBuf>,
}

impl RunReport {
    pub fn new(operation: &str, dry_run: bool) -> Self {
        Self {
            operation: operation.to_string(),
            dry_run,
            ..Default::default()
        }
    }

    /// Files a per-candidate error under collisions or failures.
    pub fn record_error(&mut self, path: PathBuf, error: &SortError) {
        let failure = Failure {
            path,
            kind: error.kind(),
            reason: error.to_string(),
        };
        match error {
            SortError::DestinationCollision { .. } => self.collisions.push(failure),
            _ => self.failures.push(failure),
        }
    }

    pub fn total_processed(&self) -> usize {
        self.placed.len() + self.collisions.len() + self.failures.len()
    }

    pub fn was_cancelled(&self) -> bool {
        !self.not_processed.is_empty()
    }

    /// True when every candidate was placed.
    pub fn is_complete_success(&self) -> bool {
        self.collisions.is_empty() && self.failures.is_empty() && self.not_processed.is_empty()
    }

    /// Number of placed files per destination subpath, sorted by subpath.
    pub fn counts_by_folder(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for placement in &self.placed {
            *counts.entry(placement.relative.to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
