//! Data sources
//!
//! - [`DataSource`] - capability trait queried by the aggregator and exporter
//! - [`InMemoryDataSource`] - fixed item list, optionally loaded from JSON
//! - [`RepositoryDataSource`] - content repository behind a [`ContentProvider`]

pub mod factory;
pub mod memory;
pub mod repository;
pub mod traits;

pub use factory::create_data_sources;
pub use memory::InMemoryDataSource;
pub use repository::{ContentProvider, ContentRecord, RepositoryDataSource};
pub use traits::DataSource;
