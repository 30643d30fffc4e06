//! Subprocess seam for the external `git` binary.
//!
//! Everything kick does to a repository goes through [`GitRunner`]. The
//! production implementation, [`SystemGit`], shells out with the caller's
//! environment and stdin so credential prompts keep working; tests swap in
//! scripted runners.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::GitError;

/// Argument vector for a single `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append `arg` only when `enabled`.
    pub fn arg_if(self, enabled: bool, arg: impl Into<String>) -> Self {
        if enabled {
            self.arg(arg)
        } else {
            self
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("git")?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes git commands on behalf of the orchestrator.
pub trait GitRunner {
    /// Run `command` to completion; only the exit status matters.
    fn run(&mut self, command: &GitCommand) -> Result<(), GitError>;

    /// Run `command` and return its standard output.
    fn output(&mut self, command: &GitCommand) -> Result<String, GitError>;
}

/// [`GitRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: OsString,
    work_dir: PathBuf,
    debug: bool,
}

impl SystemGit {
    /// Runner for the `git` on `PATH`, executing inside `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: OsString::from("git"),
            work_dir: work_dir.into(),
            debug: false,
        }
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Pass subprocess stdout/stderr through instead of discarding them.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Directory every command runs in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn command(&self, command: &GitCommand) -> Command {
        let mut process = Command::new(&self.program);
        process
            .args(command.args())
            .current_dir(&self.work_dir)
            .stdin(Stdio::inherit());
        tracing::debug!("cmd: {command}");
        process
    }
}

impl GitRunner for SystemGit {
    fn run(&mut self, command: &GitCommand) -> Result<(), GitError> {
        let mut process = self.command(command);
        if self.debug {
            process.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            process.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = process.status().map_err(|e| spawn_err(command, e))?;
        check_status(command, status)
    }

    fn output(&mut self, command: &GitCommand) -> Result<String, GitError> {
        let output = self
            .command(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| spawn_err(command, e))?;
        check_status(command, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn spawn_err(command: &GitCommand, source: std::io::Error) -> GitError {
    GitError::Spawn {
        command: command.to_string(),
        source,
    }
}

fn check_status(command: &GitCommand, status: ExitStatus) -> Result<(), GitError> {
    if status.success() {
        return Ok(());
    }
    Err(GitError::Status {
        command: command.to_string(),
        status,
    })
}
