//! File manager
//!
//! Owns the export root directory. Chunk directories are time-stamped
//! relative paths (`YYYY/MM/DD/HH/mm/`, UTC) below the root, and every path
//! handed to [`FileManager::save`] or [`FileManager::load`] is resolved
//! against the root.

use super::htpasswd::{self, CREDENTIALS_FILE};
use super::lock::{remove_marker, ExportLock, LOCK_FILE};
use crate::core::credentials::BASIC_METHOD;
use crate::domain::{Credentials, RecoError, Result};
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Chunk file and lock management under an export root
#[derive(Debug, Clone)]
pub struct FileManager {
    root: PathBuf,
}

impl FileManager {
    /// Create a manager for `root`
    ///
    /// The directory is created lazily by the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative chunk directory for `timestamp`, with a trailing slash
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use reco_export::core::files::FileManager;
    ///
    /// let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 42).unwrap();
    /// assert_eq!(FileManager::chunk_dir_for(ts), "2025/03/07/09/05/");
    /// ```
    pub fn chunk_dir_for(timestamp: DateTime<Utc>) -> String {
        timestamp.format("%Y/%m/%d/%H/%M/").to_string()
    }

    /// Create the chunk directory for the current minute
    ///
    /// Returns the relative path. An existing directory is reused.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn create_chunk_dir(&self) -> Result<String> {
        self.create_chunk_dir_at(Utc::now())
    }

    /// Create the chunk directory for `timestamp`
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn create_chunk_dir_at(&self, timestamp: DateTime<Utc>) -> Result<String> {
        let relative = Self::chunk_dir_for(timestamp);
        let absolute = self.root.join(&relative);
        fs::create_dir_all(&absolute).map_err(|e| {
            RecoError::Io(format!(
                "Failed to create chunk directory {}: {e}",
                absolute.display()
            ))
        })?;
        tracing::debug!(chunk_dir = %relative, "Chunk directory ready");
        Ok(relative)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// Take the export lock
    ///
    /// # Arguments
    ///
    /// * `holder` - text recorded in the marker, shown to operators
    ///
    /// # Errors
    ///
    /// Returns `ExportLocked` if another export holds the lock.
    pub fn lock(&self, holder: &str) -> Result<ExportLock> {
        fs::create_dir_all(&self.root).map_err(|e| {
            RecoError::Io(format!(
                "Failed to create export root {}: {e}",
                self.root.display()
            ))
        })?;
        ExportLock::acquire(self.lock_path(), holder)
    }

    /// Remove the lock marker regardless of who holds it
    ///
    /// Returns whether a marker was present.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the marker cannot be removed.
    pub fn unlock(&self) -> Result<bool> {
        let was_locked = self.is_locked();
        remove_marker(&self.lock_path())?;
        if was_locked {
            tracing::warn!(root = %self.root.display(), "Export lock forcibly removed");
        }
        Ok(was_locked)
    }

    pub fn is_locked(&self) -> bool {
        self.lock_path().exists()
    }

    /// Contents of the lock marker, if held
    ///
    /// # Errors
    ///
    /// Returns `Io` if the marker exists but cannot be read.
    pub fn lock_holder(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.lock_path()) {
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Secure a chunk directory according to the credentials method
    ///
    /// For `basic` a credential file with the login and a SHA-256-crypt
    /// password hash is written into the directory. Other methods leave the
    /// directory untouched. The credentials are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `basic` credentials lack a login or
    /// password and `Io` if the credential file cannot be written.
    pub fn secure_dir(
        &self,
        chunk_dir: &str,
        method: &str,
        credentials: Credentials,
    ) -> Result<Credentials> {
        if method != BASIC_METHOD {
            tracing::debug!(chunk_dir = %chunk_dir, method = %method, "Chunk directory left unsecured");
            return Ok(credentials);
        }

        let (Some(login), Some(password)) = (credentials.login(), credentials.password()) else {
            return Err(RecoError::InvalidArgument(
                "basic credentials require a login and a password".to_string(),
            ));
        };

        let line = htpasswd::entry(login, password.expose_secret().as_ref())?;
        let relative = format!("{}/{CREDENTIALS_FILE}", chunk_dir.trim_end_matches('/'));
        self.save(&relative, format!("{line}\n").as_bytes())?;

        tracing::info!(chunk_dir = %chunk_dir, "Chunk directory secured with basic credentials");
        Ok(credentials)
    }

    /// Check a login and password against a chunk directory's credential file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory has no credential file.
    pub fn verify_credentials(&self, chunk_dir: &str, login: &str, password: &str) -> Result<bool> {
        let relative = format!("{}/{CREDENTIALS_FILE}", chunk_dir.trim_end_matches('/'));
        let contents = String::from_utf8_lossy(&self.load(&relative)?).into_owned();
        Ok(htpasswd::find_hash(&contents, login)
            .map_or(false, |hash| htpasswd::verify(hash, password)))
    }

    /// Write `contents` to a path relative to the export root
    ///
    /// Parent directories are created as needed. Returns the absolute path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for paths escaping the root and `Io` on
    /// write failure.
    pub fn save(&self, relative: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.resolve(relative)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RecoError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        fs::write(&path, contents)
            .map_err(|e| RecoError::Io(format!("Failed to write {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "File saved");
        Ok(path)
    }

    /// Read a file relative to the export root
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for paths escaping the root and `Io` if the
    /// file cannot be read.
    pub fn load(&self, relative: &str) -> Result<Vec<u8>> {
        let path = self.resolve(relative)?;
        fs::read(&path).map_err(|e| RecoError::Io(format!("Failed to read {}: {e}", path.display())))
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let candidate = Path::new(relative);
        let escapes = candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || escapes {
            return Err(RecoError::InvalidArgument(format!(
                "path '{relative}' must stay inside the export root"
            )));
        }
        Ok(self.root.join(candidate))
    }
}
