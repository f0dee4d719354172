//! Export file system layout
//!
//! - [`FileManager`] - chunk directories, lock marker, chunk files and
//!   directory securing under one export root
//! - [`ExportLock`] - guard held for the duration of an export
//! - [`htpasswd`] - credential file entries

pub mod htpasswd;
pub mod lock;
pub mod manager;

pub use lock::{ExportLock, LOCK_FILE};
pub use manager::FileManager;
