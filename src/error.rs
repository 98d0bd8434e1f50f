use std::path::PathBuf;

use thiserror::Error;

use crate::session::Phase;

#[derive(Debug, Error)]
pub enum PruneError {
    #[error("cannot {action} while {from:?}")]
    InvalidTransition { from: Phase, action: &'static str },

    #[error("invalid world border: {0}")]
    InvalidBorder(String),

    #[error("failed listing {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("missing world border value: {0}")]
    MissingBorderValue(&'static str),

    #[error("expected an integer for {field}, got {input:?}")]
    BadInteger { field: &'static str, input: String },
}
