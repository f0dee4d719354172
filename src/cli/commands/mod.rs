//! CLI command implementations
//!
//! Commands return the process exit code:
//! 0 success, 2 configuration error, 3 export locked, 5 fatal error.

pub mod export;
pub mod init;
pub mod status;
pub mod unlock;
pub mod validate;

/// Command completed
pub const EXIT_OK: i32 = 0;
/// Configuration missing or invalid
pub const EXIT_CONFIG: i32 = 2;
/// Another export holds the lock
pub const EXIT_LOCKED: i32 = 3;
/// Unrecoverable failure
pub const EXIT_FATAL: i32 = 5;
/// Interrupted by a signal
pub const EXIT_INTERRUPTED: i32 = 130;
