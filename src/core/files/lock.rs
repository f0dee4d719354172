//! Export lock marker

use crate::domain::{RecoError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Name of the marker file held while an export runs
pub const LOCK_FILE: &str = ".export.lock";

/// Held export lock
///
/// The marker file is removed when the guard is released or dropped, so the
/// lock is freed on every exit path of the run that took it.
#[derive(Debug)]
pub struct ExportLock {
    path: PathBuf,
    released: bool,
}

impl ExportLock {
    /// Atomically create the marker at `path`
    ///
    /// # Errors
    ///
    /// Returns `ExportLocked` if the marker already exists and `Io` if it
    /// cannot be created.
    pub(crate) fn acquire(path: PathBuf, holder: &str) -> Result<Self> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let current = fs::read_to_string(&path).unwrap_or_default();
                return Err(RecoError::ExportLocked(format!(
                    "lock marker {} already exists ({})",
                    path.display(),
                    current.trim()
                )));
            }
            Err(e) => {
                return Err(RecoError::Io(format!(
                    "Failed to create lock marker {}: {e}",
                    path.display()
                )))
            }
        };

        let lock = Self {
            path,
            released: false,
        };
        // Marker contents are informational; the lock is already held.
        if let Err(e) = writeln!(file, "{holder}") {
            tracing::warn!(path = %lock.path.display(), error = %e, "Failed to record lock holder");
        }

        tracing::info!(path = %lock.path.display(), holder = %holder, "Export lock acquired");
        Ok(lock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the marker now
    ///
    /// # Errors
    ///
    /// Returns `Io` if the marker exists but cannot be removed.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        remove_marker(&self.path)
    }
}

impl Drop for ExportLock {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = remove_marker(&self.path) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to release export lock");
        }
    }
}

pub(crate) fn remove_marker(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Export lock released");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RecoError::Io(format!(
            "Failed to remove lock marker {}: {e}",
            path.display()
        ))),
    }
}
