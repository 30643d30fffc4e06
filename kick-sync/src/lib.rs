//! # kick-sync
//!
//! Sync orchestration over the external `git` binary.
//!
//! Call [`pipeline::run`] with a resolved [`kick_core::Config`] and a
//! [`kick_core::GitRunner`] to stage, commit, pull, push, and sync tags.
//! A commit that finds nothing to commit is recorded as
//! [`StepOutcome::Tolerated`]; every other failure stops the run with a
//! [`SyncError`] naming the step.

pub mod error;
pub mod pipeline;
pub mod step;

pub use error::SyncError;
pub use pipeline::{run, KickReport, StepRecord};
pub use step::{Step, StepOutcome};
