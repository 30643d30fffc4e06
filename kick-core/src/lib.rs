//! kick core library — configuration tiers, the git subprocess seam, the
//! nonce marker, and errors.
//!
//! - [`config`] — [`Config`] and its default / environment / flag tiers
//! - [`git`] — [`GitRunner`] and the process-backed [`SystemGit`]
//! - [`nonce`] — the `.kick` timestamp marker
//! - [`error`] — [`GitError`], [`NonceError`]

pub mod config;
pub mod error;
pub mod git;
pub mod nonce;

pub use config::{Config, FlagOverrides};
pub use error::{GitError, NonceError};
pub use git::{GitCommand, GitRunner, SystemGit};
