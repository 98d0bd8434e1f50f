use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::classifier::{Classifier, ScanResult};
use crate::error::PruneError;
use crate::model::{DeletionSet, RemoveSummary};
use crate::remove::remove_candidates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scanning,
    AwaitingConfirmation,
    Deleting,
    Done,
    Cancelled,
}

/// Scan, confirm, then delete. Files are only touched in [`Phase::Deleting`],
/// after the full set has been enumerated and confirmed.
#[derive(Debug)]
pub struct PruneSession {
    classifier: Classifier,
    root: PathBuf,
    phase: Phase,
    scan: ScanResult,
    summary: Option<RemoveSummary>,
}

impl PruneSession {
    pub fn new(classifier: Classifier, root: impl Into<PathBuf>) -> Self {
        Self {
            classifier,
            root: root.into(),
            phase: Phase::Scanning,
            scan: ScanResult::default(),
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn candidates(&self) -> &DeletionSet {
        &self.scan.candidates
    }

    pub fn scan_result(&self) -> &ScanResult {
        &self.scan
    }

    /// Enumerates candidates. An empty set ends the session in [`Phase::Done`].
    pub fn scan(&mut self) -> Result<&DeletionSet> {
        self.ensure_phase(Phase::Scanning, "scan")?;
        self.scan = self.classifier.scan(&self.root)?;
        self.phase = if self.scan.candidates.is_empty() {
            Phase::Done
        } else {
            Phase::AwaitingConfirmation
        };
        info!(
            candidates = self.scan.candidates.len(),
            inspected = self.scan.inspected,
            "scan finished"
        );
        Ok(&self.scan.candidates)
    }

    pub fn resolve(&mut self, confirmed: bool) -> Result<Phase, PruneError> {
        self.ensure_phase(Phase::AwaitingConfirmation, "resolve confirmation")?;
        self.phase = if confirmed {
            Phase::Deleting
        } else {
            Phase::Cancelled
        };
        Ok(self.phase)
    }

    pub fn delete(&mut self) -> Result<&RemoveSummary, PruneError> {
        self.ensure_phase(Phase::Deleting, "delete")?;
        let summary = remove_candidates(&self.scan.candidates);
        self.phase = Phase::Done;
        Ok(&*self.summary.insert(summary))
    }

    fn ensure_phase(&self, phase: Phase, action: &'static str) -> Result<(), PruneError> {
        if self.phase != phase {
            return Err(PruneError::InvalidTransition {
                from: self.phase,
                action,
            });
        }
        Ok(())
    }
}
