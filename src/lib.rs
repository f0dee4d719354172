// reco-export - Content export for recommendation engines
// Copyright (c) 2025 reco-export Contributors
// Licensed under the MIT License

//! # reco-export - Content export for recommendation engines
//!
//! reco-export collects content items from one or more data sources, pages
//! them into chunk files inside a password-protected, time-stamped
//! directory and tells a remote recommendation engine where to download
//! them.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Querying** items through the [`adapters::datasource::DataSource`] trait
//! - **Aggregating** several sources behind one [`core::DataSourceAggregator`]
//! - **Grouping** items by item type and language
//! - **Securing** chunk directories with generated or configured credentials
//! - **Notifying** the recommendation engine once chunks are written
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (aggregation, grouping, credentials, files, export)
//! - [`adapters`] - Data sources, document writers and the HTTP notifier
//! - [`domain`] - Items, criteria, collections, events and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reco_export::config::load_config;
//! use reco_export::core::export::{ExportParameters, Exporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("reco-export.toml")?;
//!
//!     let exporter = Exporter::from_config(&config)?;
//!     let params = ExportParameters::from_config(&config.export);
//!     let summary = exporter.run(&params).await?;
//!
//!     println!("Exported {} items into {}", summary.items_exported, summary.chunk_dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Querying Items
//!
//! Every source answers the same [`domain::Criteria`]. Limit and offset
//! page through the matching items:
//!
//! ```rust
//! use reco_export::adapters::datasource::{DataSource, InMemoryDataSource};
//! use reco_export::domain::{Criteria, Item, ItemType};
//!
//! # async fn example() -> reco_export::domain::Result<()> {
//! let article = ItemType::new(2, "article", "Article")?;
//! let item = Item::builder()
//!     .id("42")
//!     .item_type(article)
//!     .language("eng-GB")
//!     .build()?;
//! let source = InMemoryDataSource::new("memory", vec![item]);
//!
//! let criteria = Criteria::builder()
//!     .item_types(["article"])
//!     .languages(["eng-GB"])
//!     .limit(50)
//!     .build()?;
//! assert_eq!(source.count_items(&criteria).await?, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All library operations return [`domain::Result`], whose error type is
//! [`domain::RecoError`].
//!
//! ## Logging
//!
//! reco-export uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(item_type = "article", language = "eng-GB", pages = 3, "Exporting item group");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
