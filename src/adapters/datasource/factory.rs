//! Data source factory
//!
//! Builds the ordered list of data sources described by the configuration.

use super::memory::InMemoryDataSource;
use super::traits::DataSource;
use crate::config::RecoConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the configured data sources, in configuration order
///
/// # Errors
///
/// Returns an error if a source fixture cannot be loaded
pub fn create_data_sources(config: &RecoConfig) -> Result<Vec<Arc<dyn DataSource>>> {
    let mut sources: Vec<Arc<dyn DataSource>> = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        tracing::info!(source = %source.name, path = %source.path, "Creating data source");
        let data_source = InMemoryDataSource::from_json_file(&source.name, &source.path)?;
        sources.push(Arc::new(data_source));
    }
    Ok(sources)
}
