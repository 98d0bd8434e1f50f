use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::model::{DeletionSet, RemoveOutcome, RemoveSummary};

pub fn remove_file_idempotent(path: &Path) -> RemoveOutcome {
    match fs::remove_file(path) {
        Ok(()) => RemoveOutcome::Removed,
        Err(err) if err.kind() == ErrorKind::NotFound => RemoveOutcome::AlreadyAbsent,
        Err(err) => RemoveOutcome::Failed(err.to_string()),
    }
}

/// Removes every candidate, continuing past individual failures.
pub fn remove_candidates(set: &DeletionSet) -> RemoveSummary {
    let mut summary = RemoveSummary {
        planned: set.len(),
        ..RemoveSummary::default()
    };
    for c in set {
        let outcome = remove_file_idempotent(&c.path);
        match &outcome {
            RemoveOutcome::Failed(reason) => {
                warn!(file = %c.path.display(), reason = %reason, "remove failed")
            }
            other => debug!(file = %c.path.display(), outcome = ?other, "removed"),
        }
        summary.record(c.path.clone(), outcome);
    }
    summary
}
