//! Error types for kick-core.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while invoking the external `git` binary.
#[derive(Debug, Error)]
pub enum GitError {
    /// The process could not be started (binary missing, permission denied, ...).
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    Status { command: String, status: ExitStatus },
}

impl GitError {
    /// True when git ran and reported failure, as opposed to never starting.
    pub fn is_exit_failure(&self) -> bool {
        matches!(self, GitError::Status { .. })
    }
}

/// Errors raised while writing or reading the nonce marker.
#[derive(Debug, Error)]
pub enum NonceError {
    /// Underlying I/O failure, annotated with the marker path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The marker exists but does not hold an RFC 3339 timestamp.
    #[error("nonce marker at {path} is not a valid timestamp: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: chrono::ParseError,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> NonceError {
    NonceError::Io {
        path: path.into(),
        source,
    }
}
