//! Core business logic for reco-export.
//!
//! # Modules
//!
//! - [`aggregator`] - fan-out of criteria across ordered data sources
//! - [`grouping`] - named grouping strategies and their dispatcher
//! - [`credentials`] - named directory securing methods and their dispatcher
//! - [`files`] - chunk directories, export lock, credential files
//! - [`export`] - the export run itself
//!
//! # Export Workflow
//!
//! 1. **Validate**: page size and credentials method
//! 2. **Lock**: take the export lock marker under the export root
//! 3. **Secure**: create the chunk directory and protect it
//! 4. **Page**: for each item type and language, count, fetch and write chunks
//! 5. **Notify**: send one event per exported item type and language
//! 6. **Report**: return an [`ExportSummary`](export::ExportSummary)
//!
//! # Example
//!
//! ```rust,no_run
//! use reco_export::config::load_config;
//! use reco_export::core::export::{ExportParameters, Exporter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("reco-export.toml")?;
//! let exporter = Exporter::from_config(&config)?;
//!
//! let summary = exporter
//!     .run(&ExportParameters::from_config(&config.export))
//!     .await?;
//!
//! println!("Chunks: {}", summary.chunks_written);
//! println!("Items: {}", summary.items_exported);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod credentials;
pub mod export;
pub mod files;
pub mod grouping;

pub use aggregator::DataSourceAggregator;
