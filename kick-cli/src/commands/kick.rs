//! `kick` — stage, commit, pull, push, and sync tags in the current directory.

use anyhow::{Context, Result};
use clap::Args;

use kick_core::{Config, FlagOverrides, SystemGit};

use crate::logging;

/// Flags for a kick run. Each switch pair overrides the matching
/// `KICK_*` environment variable; the last one given wins.
#[derive(Args, Debug, Default)]
pub struct KickArgs {
    /// Enable additional logging and show git output.
    #[arg(long)]
    pub debug: bool,

    /// Commit message (overrides KICK_MESSAGE; empty lets git prompt).
    #[arg(long, short = 'm', value_name = "MSG", allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Touch the .kick nonce file so there is always something to commit.
    #[arg(long, overrides_with = "no_nonce")]
    pub nonce: bool,

    /// Do not touch the nonce file.
    #[arg(long, overrides_with = "nonce")]
    pub no_nonce: bool,

    /// Fetch tags from every remote.
    #[arg(long, overrides_with = "no_fetch_all")]
    pub fetch_all: bool,

    /// Fetch tags from the default remote only.
    #[arg(long, overrides_with = "fetch_all")]
    pub no_fetch_all: bool,

    /// Pull from every remote.
    #[arg(long, overrides_with = "no_pull_all")]
    pub pull_all: bool,

    /// Pull from the default remote only.
    #[arg(long, overrides_with = "pull_all")]
    pub no_pull_all: bool,

    /// Push to every remote, tags included.
    #[arg(long, overrides_with = "no_push_all")]
    pub push_all: bool,

    /// Push to the default remote only.
    #[arg(long, overrides_with = "push_all")]
    pub no_push_all: bool,

    /// Fetch and push tags after syncing branches.
    #[arg(long, overrides_with = "no_sync_tags")]
    pub sync_tags: bool,

    /// Leave tags alone.
    #[arg(long, overrides_with = "sync_tags")]
    pub no_sync_tags: bool,

    /// Print a JSON report of the run on success.
    #[arg(long)]
    pub json: bool,
}

impl KickArgs {
    pub fn run(self) -> Result<()> {
        let mut config = Config::resolve(|name| std::env::var(name).ok(), &self.overrides());
        logging::init(config.debug);

        let mut git = SystemGit::new(
            std::env::current_dir().context("could not determine working directory")?,
        )
        .with_debug(config.debug);
        let work_dir = git.work_dir().to_path_buf();

        let report = kick_sync::run(&mut config, &mut git, &work_dir)
            .with_context(|| format!("kick failed in {}", work_dir.display()))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to encode report")?
            );
        }
        Ok(())
    }

    /// The flag tier; switches that were not given stay `None`.
    pub fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            debug: self.debug.then_some(true),
            nonce: switch(self.nonce, self.no_nonce),
            fetch_all: switch(self.fetch_all, self.no_fetch_all),
            pull_all: switch(self.pull_all, self.no_pull_all),
            push_all: switch(self.push_all, self.no_push_all),
            sync_tags: switch(self.sync_tags, self.no_sync_tags),
            commit_message: self.message.clone(),
        }
    }
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_switches_leave_lower_tiers_alone() {
        let overrides = KickArgs::default().overrides();
        assert_eq!(overrides, FlagOverrides::default());
    }

    #[test]
    fn negative_switches_produce_explicit_false() {
        let args = KickArgs {
            no_push_all: true,
            no_sync_tags: true,
            nonce: true,
            message: Some("wip".into()),
            ..KickArgs::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.push_all, Some(false));
        assert_eq!(overrides.sync_tags, Some(false));
        assert_eq!(overrides.nonce, Some(true));
        assert_eq!(overrides.pull_all, None);
        assert_eq!(overrides.commit_message.as_deref(), Some("wip"));
    }
}
