//! Outbound HTTP notification
//!
//! - [`HttpNotifier`] - delivers a JSON payload with basic-auth credentials
//! - [`ReqwestNotifier`] - reqwest-backed implementation

pub mod http;
pub mod traits;

pub use http::ReqwestNotifier;
pub use traits::{BasicAuth, HttpNotifier};
