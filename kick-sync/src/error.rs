//! Error types for kick-sync.

use thiserror::Error;

use kick_core::{GitError, NonceError};

use crate::step::Step;

/// A fatal failure that stopped the kick pipeline.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing remotes failed; nothing was staged, committed, or pushed.
    #[error("could not list remotes: {0}")]
    Remotes(#[source] GitError),

    /// The nonce marker could not be written.
    #[error("could not update nonce marker: {0}")]
    Nonce(#[from] NonceError),

    /// A git step failed and that step does not tolerate failure.
    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: GitError,
    },
}

impl SyncError {
    /// The step that aborted the run.
    pub fn step(&self) -> Step {
        match self {
            SyncError::Remotes(_) => Step::QueryRemotes,
            SyncError::Nonce(_) => Step::Nonce,
            SyncError::Step { step, .. } => step.clone(),
        }
    }
}
