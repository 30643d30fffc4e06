//! Pipeline steps, the git command each one issues, and how failures settle.

use std::fmt;

use serde::Serialize;

use kick_core::{Config, GitCommand, GitError};

use crate::error::SyncError;

/// Identity of one step in the kick pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    QueryRemotes,
    Nonce,
    Stage,
    Commit,
    Pull,
    Push,
    FetchTags,
    /// `remote` is `None` when tags go to the default remote.
    PushTags { remote: Option<String> },
}

impl Step {
    /// Whether `err` from this step lets the pipeline carry on.
    ///
    /// Only a commit that ran and exited non-zero qualifies: git reports
    /// "nothing to commit" that way on a clean tree.
    pub fn tolerates(&self, err: &GitError) -> bool {
        matches!(self, Step::Commit) && err.is_exit_failure()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::QueryRemotes => write!(f, "remote query"),
            Step::Nonce => write!(f, "nonce"),
            Step::Stage => write!(f, "stage"),
            Step::Commit => write!(f, "commit"),
            Step::Pull => write!(f, "pull"),
            Step::Push => write!(f, "push"),
            Step::FetchTags => write!(f, "tag fetch"),
            Step::PushTags { remote: None } => write!(f, "tag push"),
            Step::PushTags {
                remote: Some(remote),
            } => write!(f, "tag push to '{remote}'"),
        }
    }
}

/// How a step ended, when it did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded,
    /// The step failed in a way the pipeline expects and ignores.
    Tolerated { reason: String },
}

/// Turn a step's raw result into an outcome, or a fatal [`SyncError`].
pub fn settle(step: Step, result: Result<(), GitError>) -> Result<StepOutcome, SyncError> {
    match result {
        Ok(()) => Ok(StepOutcome::Succeeded),
        Err(err) if step.tolerates(&err) => {
            tracing::debug!("{step} failed, continuing: {err}");
            Ok(StepOutcome::Tolerated {
                reason: err.to_string(),
            })
        }
        Err(source) => Err(SyncError::Step { step, source }),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn stage() -> GitCommand {
    GitCommand::new(["add", "."])
}

/// `git commit -a [-m <message>]`; an empty message leaves it to git.
pub fn commit(config: &Config) -> GitCommand {
    let cmd = GitCommand::new(["commit", "-a"]);
    if config.commit_message.is_empty() {
        cmd
    } else {
        cmd.arg("-m").arg(config.commit_message.as_str())
    }
}

pub fn pull(config: &Config) -> GitCommand {
    GitCommand::new(["pull"]).arg_if(config.pull_all, "--all")
}

pub fn push(config: &Config) -> GitCommand {
    GitCommand::new(["push"]).arg_if(config.push_all, "--all")
}

pub fn fetch_tags(config: &Config) -> GitCommand {
    GitCommand::new(["fetch", "--tags"]).arg_if(config.fetch_all, "--all")
}

/// `git push [<remote>] --tags`
pub fn push_tags(remote: Option<&str>) -> GitCommand {
    let cmd = GitCommand::new(["push"]);
    match remote {
        Some(remote) => cmd.arg(remote).arg("--tags"),
        None => cmd.arg("--tags"),
    }
}
