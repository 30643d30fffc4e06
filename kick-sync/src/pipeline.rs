//! The kick pipeline: stage, commit, pull, push, then tags.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use kick_core::{nonce, Config, GitCommand, GitRunner};

use crate::error::SyncError;
use crate::step::{self, settle, Step, StepOutcome};

/// One finished step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    #[serde(flatten)]
    pub step: Step,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Summary of a run that reached the end of the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct KickReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u128,
    pub remotes: Vec<String>,
    /// Timestamp written to the nonce marker, when enabled.
    pub nonce: Option<DateTime<Utc>>,
    pub steps: Vec<StepRecord>,
}

impl KickReport {
    /// Outcome of the first record for `step`, if it ran.
    pub fn outcome_of(&self, step: &Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|r| &r.step == step)
            .map(|r| &r.outcome)
    }

    /// Steps that failed without stopping the run.
    pub fn tolerated(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Tolerated { .. }))
    }
}

/// Run the full pipeline against the repository at `work_dir`.
///
/// `config` receives the freshly discovered remote list. The first fatal
/// failure is returned as-is; a failed commit is recorded as tolerated and
/// the run continues.
pub fn run(
    config: &mut Config,
    git: &mut dyn GitRunner,
    work_dir: &Path,
) -> Result<KickReport, SyncError> {
    tracing::debug!("config: {config:?}");

    let clock = Instant::now();
    let mut kick = Kick {
        git,
        report: KickReport {
            started_at: Utc::now(),
            duration_ms: 0,
            remotes: Vec::new(),
            nonce: None,
            steps: Vec::new(),
        },
    };

    config.query_remotes(kick.git).map_err(SyncError::Remotes)?;
    kick.record(Step::QueryRemotes, StepOutcome::Succeeded);
    kick.report.remotes = config.remotes().to_vec();

    if config.nonce {
        kick.report.nonce = Some(nonce::ensure_at(work_dir)?);
        kick.record(Step::Nonce, StepOutcome::Succeeded);
    }

    kick.step(Step::Stage, step::stage())?;
    kick.step(Step::Commit, step::commit(config))?;
    kick.step(Step::Pull, step::pull(config))?;
    kick.step(Step::Push, step::push(config))?;

    if config.sync_tags {
        kick.step(Step::FetchTags, step::fetch_tags(config))?;
        kick.push_tags(config)?;
    }

    kick.report.duration_ms = clock.elapsed().as_millis();
    tracing::info!(
        "kick finished in {}ms ({} steps, {} tolerated)",
        kick.report.duration_ms,
        kick.report.steps.len(),
        kick.report.tolerated().count()
    );
    Ok(kick.report)
}

struct Kick<'a> {
    git: &'a mut dyn GitRunner,
    report: KickReport,
}

impl Kick<'_> {
    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.report.steps.push(StepRecord { step, outcome });
    }

    fn step(&mut self, step: Step, command: GitCommand) -> Result<(), SyncError> {
        let result = self.git.run(&command);
        let outcome = settle(step.clone(), result)?;
        self.record(step, outcome);
        Ok(())
    }

    /// With push-all, tags go to each discovered remote in order and the
    /// first failure stops the loop. Otherwise one push to the default remote.
    fn push_tags(&mut self, config: &Config) -> Result<(), SyncError> {
        if !config.push_all {
            return self.step(Step::PushTags { remote: None }, step::push_tags(None));
        }

        for remote in config.remotes() {
            self.step(
                Step::PushTags {
                    remote: Some(remote.clone()),
                },
                step::push_tags(Some(remote)),
            )?;
        }
        Ok(())
    }
}
