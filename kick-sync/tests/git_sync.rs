//! End-to-end pipeline runs against real git repositories.
//!
//! Each test builds a bare "origin" plus a clone to work in. Tests return
//! early when no `git` binary is available.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::sleep;
use std::time::Duration;

use kick_core::{nonce, Config, SystemGit};
use kick_sync::{run, Step, StepOutcome};
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn configure(dir: &Path) {
    for (key, value) in [
        ("user.name", "Kick Test"),
        ("user.email", "kick@example.invalid"),
        ("commit.gpgsign", "false"),
        ("tag.gpgsign", "false"),
        ("pull.rebase", "false"),
    ] {
        git(dir, &["config", key, value]);
    }
}

struct Fixture {
    _root: TempDir,
    remote: PathBuf,
    work: PathBuf,
}

impl Fixture {
    /// Bare remote on branch `trunk` with one commit, cloned into `work`.
    fn new() -> Self {
        let root = TempDir::new().expect("root");
        let remote = root.path().join("remote.git");
        let seed = root.path().join("seed");
        let work = root.path().join("work");
        fs::create_dir_all(&remote).unwrap();
        fs::create_dir_all(&seed).unwrap();

        git(&remote, &["init", "--bare", "--quiet"]);
        git(&remote, &["symbolic-ref", "HEAD", "refs/heads/trunk"]);

        git(&seed, &["init", "--quiet"]);
        configure(&seed);
        fs::write(seed.join("README"), "seed\n").unwrap();
        git(&seed, &["add", "."]);
        git(&seed, &["commit", "--quiet", "-m", "seed"]);
        let remote_str = remote.to_str().expect("utf-8 temp path");
        git(&seed, &["push", "--quiet", remote_str, "HEAD:refs/heads/trunk"]);

        let work_str = work.to_str().expect("utf-8 temp path");
        git(root.path(), &["clone", "--quiet", remote_str, work_str]);
        configure(&work);

        Self {
            _root: root,
            remote,
            work,
        }
    }

    fn remote_head_subject(&self) -> String {
        git(&self.remote, &["log", "-1", "--format=%s", "trunk"])
    }

    fn kick(&self, config: &mut Config) -> Result<kick_sync::KickReport, kick_sync::SyncError> {
        let mut runner = SystemGit::new(&self.work);
        run(config, &mut runner, &self.work)
    }
}

#[test]
fn modified_file_is_committed_and_pushed() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let fx = Fixture::new();
    fs::write(fx.work.join("README"), "changed\n").unwrap();

    let report = fx.kick(&mut Config::default()).expect("kick");

    assert_eq!(report.remotes, ["origin"]);
    assert_eq!(report.outcome_of(&Step::Commit), Some(&StepOutcome::Succeeded));
    assert_eq!(report.outcome_of(&Step::Push), Some(&StepOutcome::Succeeded));
    assert_eq!(fx.remote_head_subject(), "up");
}

#[test]
fn clean_tree_tolerates_commit_failure() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let fx = Fixture::new();

    let report = fx.kick(&mut Config::default()).expect("kick");

    assert!(matches!(
        report.outcome_of(&Step::Commit),
        Some(StepOutcome::Tolerated { .. })
    ));
    assert_eq!(report.outcome_of(&Step::Pull), Some(&StepOutcome::Succeeded));
    assert_eq!(fx.remote_head_subject(), "seed");
}

#[test]
fn nonce_forces_a_commit_and_advances_on_rerun() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let fx = Fixture::new();
    let mut config = Config::default();
    config.nonce = true;
    config.commit_message = "nonce".into();

    fx.kick(&mut config).expect("first kick");
    let first = nonce::read_at(&fx.work).unwrap().expect("marker");
    assert_eq!(fx.remote_head_subject(), "nonce");

    sleep(Duration::from_millis(1100));
    fx.kick(&mut config).expect("second kick");
    let second = nonce::read_at(&fx.work).unwrap().expect("marker");
    assert!(second > first, "rerun must write a later timestamp");
}

#[test]
fn local_tags_reach_every_remote() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let fx = Fixture::new();
    git(&fx.work, &["tag", "v0.1.0"]);

    let report = fx.kick(&mut Config::default()).expect("kick");

    assert_eq!(
        report.outcome_of(&Step::PushTags {
            remote: Some("origin".into())
        }),
        Some(&StepOutcome::Succeeded)
    );
    assert_eq!(git(&fx.remote, &["tag", "--list"]), "v0.1.0");
}

#[test]
fn missing_work_dir_fails_at_remote_query() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.nonce = true;
    // git cannot even start in a missing directory
    let gone = dir.path().join("gone");

    let mut runner = SystemGit::new(&gone);
    let err = run(&mut config, &mut runner, &gone).unwrap_err();

    assert_eq!(err.step(), Step::QueryRemotes);
    assert!(!nonce::nonce_path(&gone).exists());
}
