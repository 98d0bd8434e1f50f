use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::coords::{Granularity, GridCoordinate, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Ai,
}

/// A file lying entirely outside the world border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub granularity: Granularity,
    pub coord: GridCoordinate,
    pub bounds: Rectangle,
}

/// Candidates in traversal order. Not sorted, not deduplicated.
pub type DeletionSet = Vec<Candidate>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// Gone before we got to it; counts as satisfied.
    AlreadyAbsent,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveSummary {
    pub planned: usize,
    pub removed: usize,
    pub already_absent: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl RemoveSummary {
    pub fn record(&mut self, path: PathBuf, outcome: RemoveOutcome) {
        match outcome {
            RemoveOutcome::Removed => self.removed += 1,
            RemoveOutcome::AlreadyAbsent => self.already_absent += 1,
            RemoveOutcome::Failed(reason) => self.failed.push((path, reason)),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
