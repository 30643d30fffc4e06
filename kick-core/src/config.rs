//! Run configuration: defaults, environment overrides, flag overrides.
//!
//! Resolution is explicit and tiered. [`Config::default`] supplies the
//! baseline, [`Config::apply_env`] layers environment variables on top, and
//! [`Config::apply_flags`] layers command-line flags last. Nothing in this
//! module reads the process environment on its own; callers hand in a lookup.

use crate::error::GitError;
use crate::git::{GitCommand, GitRunner};

/// Commit message used when nothing else is configured.
pub const DEFAULT_COMMIT_MESSAGE: &str = "up";

pub const COMMIT_MESSAGE_ENV: &str = "KICK_MESSAGE";
pub const NONCE_ENV: &str = "KICK_NONCE";
pub const FETCH_ALL_ENV: &str = "KICK_FETCH_ALL";
pub const PULL_ALL_ENV: &str = "KICK_PULL_ALL";
pub const PUSH_ALL_ENV: &str = "KICK_PUSH_ALL";
pub const SYNC_TAGS_ENV: &str = "KICK_SYNC_TAGS";

/// Value that switches a boolean environment override on.
pub const ENV_ENABLED: &str = "1";
/// Value that switches a boolean environment override off.
pub const ENV_DISABLED: &str = "0";

/// Behavioural switches for a single kick run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log each git invocation and pass its output through.
    pub debug: bool,
    /// Touch the nonce marker so there is always something to commit.
    pub nonce: bool,
    /// Fetch tags from every remote.
    pub fetch_all: bool,
    /// Pull from every remote.
    pub pull_all: bool,
    /// Push to every remote, and push tags to each remote individually.
    pub push_all: bool,
    /// Fetch and push tags after the branch sync.
    pub sync_tags: bool,
    /// Commit message; empty means git decides.
    pub commit_message: String,
    remotes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            nonce: false,
            fetch_all: true,
            pull_all: true,
            push_all: true,
            sync_tags: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            remotes: Vec::new(),
        }
    }
}

/// Flag-tier overrides. `None` leaves the lower tiers in charge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub debug: Option<bool>,
    pub nonce: Option<bool>,
    pub fetch_all: Option<bool>,
    pub pull_all: Option<bool>,
    pub push_all: Option<bool>,
    pub sync_tags: Option<bool>,
    pub commit_message: Option<String>,
}

impl Config {
    /// Build a configuration from all three tiers: defaults, then `env`,
    /// then `flags`.
    pub fn resolve<F>(env: F, flags: &FlagOverrides) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env(env);
        config.apply_flags(flags);
        config
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Boolean variables act only on `"1"` (enable) and `"0"` (disable); any
    /// other value, or an unset variable, leaves the field as it was.
    /// `KICK_MESSAGE` replaces the message whenever it is set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(message) = lookup(COMMIT_MESSAGE_ENV) {
            self.commit_message = message;
        }

        let switches: [(&str, &mut bool); 5] = [
            (NONCE_ENV, &mut self.nonce),
            (FETCH_ALL_ENV, &mut self.fetch_all),
            (PULL_ALL_ENV, &mut self.pull_all),
            (PUSH_ALL_ENV, &mut self.push_all),
            (SYNC_TAGS_ENV, &mut self.sync_tags),
        ];
        for (name, field) in switches {
            if let Some(value) = lookup(name).as_deref().and_then(parse_switch) {
                *field = value;
            }
        }
    }

    /// Apply flag overrides; every `Some` wins over the current value.
    pub fn apply_flags(&mut self, flags: &FlagOverrides) {
        let switches = [
            (flags.debug, &mut self.debug),
            (flags.nonce, &mut self.nonce),
            (flags.fetch_all, &mut self.fetch_all),
            (flags.pull_all, &mut self.pull_all),
            (flags.push_all, &mut self.push_all),
            (flags.sync_tags, &mut self.sync_tags),
        ];
        for (flag, field) in switches {
            if let Some(value) = flag {
                *field = value;
            }
        }
        if let Some(message) = &flags.commit_message {
            self.commit_message = message.clone();
        }
    }

    /// Remote names from the last [`Config::query_remotes`], in the order git
    /// listed them.
    pub fn remotes(&self) -> &[String] {
        &self.remotes
    }

    /// Replace the cached remote list with the output of `git remote`.
    pub fn query_remotes(&mut self, runner: &mut dyn GitRunner) -> Result<(), GitError> {
        let stdout = runner.output(&GitCommand::new(["remote"]))?;
        self.remotes = parse_remotes(&stdout);
        tracing::debug!("remotes: {:?}", self.remotes);
        Ok(())
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        ENV_ENABLED => Some(true),
        ENV_DISABLED => Some(false),
        _ => None,
    }
}

/// One remote per output line; order kept, duplicates kept.
fn parse_remotes(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
