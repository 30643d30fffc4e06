//! Nonce marker — a timestamp file that guarantees the tree has a change.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{io_err, NonceError};

/// Marker file name, relative to the repository working directory.
pub const NONCE_FILE: &str = ".kick";

/// `<dir>/.kick`
pub fn nonce_path(dir: &Path) -> PathBuf {
    dir.join(NONCE_FILE)
}

/// Render a timestamp the way the marker stores it, e.g. `2026-10-16T09:30:00Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Overwrite the marker in `dir` with the current UTC time.
///
/// Returns the timestamp that was written.
pub fn ensure_at(dir: &Path) -> Result<DateTime<Utc>, NonceError> {
    let now = Utc::now();
    let path = nonce_path(dir);

    let mut file = open_truncating(&path).map_err(|e| io_err(&path, e))?;
    file.write_all(format_timestamp(now).as_bytes())
        .map_err(|e| io_err(&path, e))?;

    tracing::debug!("nonce: {} <- {}", path.display(), format_timestamp(now));
    Ok(now)
}

/// Read the marker in `dir` back. `Ok(None)` when there is no marker yet.
pub fn read_at(dir: &Path) -> Result<Option<DateTime<Utc>>, NonceError> {
    let path = nonce_path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(&path, e)),
    };
    DateTime::parse_from_rfc3339(contents.trim())
        .map(|at| Some(at.with_timezone(&Utc)))
        .map_err(|source| NonceError::Parse { path, source })
}

#[cfg(unix)]
fn open_truncating(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
}

#[cfg(not(unix))]
fn open_truncating(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
