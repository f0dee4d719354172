//! Export pipeline
//!
//! - [`Exporter`] - runs an export: lock, secure, page, write, notify
//! - [`ChunkGenerator`] / [`FileSettings`] - chunk file serialization
//! - [`ExportNotifier`] - end-of-export notification payload and delivery
//! - [`ExportSummary`] - per-run report

pub mod chunk;
pub mod exporter;
pub mod notifier;
pub mod summary;

pub use chunk::{json_writer_factory, ChunkGenerator, FileSettings, WriterFactory};
pub use exporter::{ExportParameters, Exporter};
pub use notifier::ExportNotifier;
pub use summary::{ExportSummary, ExportedGroup};
