//! Export command implementation
//!
//! This module implements the `export` command: page configured item types
//! and languages into secured chunk files and notify the recommendation
//! engine.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_LOCKED, EXIT_OK};
use crate::config::loader::split_list;
use crate::config::load_config;
use crate::core::export::{ExportParameters, Exporter};
use crate::domain::RecoError;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override item type identifier(s) to export (comma-separated)
    #[arg(long)]
    pub item_type: Option<String>,

    /// Override language(s) to export (comma-separated)
    #[arg(long)]
    pub language: Option<String>,

    /// Override the number of items per chunk
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Override the directory securing method (none, user, basic)
    #[arg(long)]
    pub credentials_method: Option<String>,

    /// Override the site scope used by the `user` method
    #[arg(long)]
    pub site_scope: Option<String>,

    /// Transaction id echoed in the notification
    #[arg(long)]
    pub transaction: Option<String>,
}

impl ExportArgs {
    /// Apply command-line overrides to the configured parameters
    pub fn apply_overrides(&self, params: &mut ExportParameters) {
        if let Some(item_types) = &self.item_type {
            params.item_types = split_list(item_types);
            tracing::info!(item_types = ?params.item_types, "Overriding item types from CLI");
        }
        if let Some(languages) = &self.language {
            params.languages = split_list(languages);
            tracing::info!(languages = ?params.languages, "Overriding languages from CLI");
        }
        if let Some(page_size) = self.page_size {
            tracing::info!(page_size = page_size, "Overriding page size from CLI");
            params.page_size = page_size;
        }
        if let Some(method) = &self.credentials_method {
            tracing::info!(method = %method, "Overriding credentials method from CLI");
            params.credentials_method = method.clone();
        }
        if let Some(scope) = &self.site_scope {
            params.site_scope = Some(scope.clone());
        }
        if let Some(transaction) = &self.transaction {
            params.transaction = Some(transaction.clone());
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let mut params = ExportParameters::from_config(&config.export);
        self.apply_overrides(&mut params);

        let exporter = match Exporter::from_config(&config) {
            Ok(exporter) => exporter,
            Err(e) => {
                log_error_with_context!(&e, "Failed to initialize exporter");
                eprintln!("Failed to initialize export: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🚀 Starting export...");
        println!("  Item types: {}", params.item_types.join(", "));
        println!("  Languages: {}", params.languages.join(", "));
        println!("  Page size: {}", params.page_size);
        println!("  Credentials: {}", params.credentials_method);
        println!();

        // Dropping the run on interrupt releases the export lock.
        let outcome = tokio::select! {
            outcome = exporter.run(&params) => outcome,
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Received SIGINT (Ctrl+C), export aborted");
                eprintln!("\n⚠️  Export interrupted. Chunks written so far are left in place.");
                return Ok(EXIT_INTERRUPTED);
            }
        };

        let summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("📊 Export Summary:");
        println!("  Run: {}", summary.run_id);
        println!("  Chunk directory: {}", summary.chunk_dir);
        println!("  Chunks written: {}", summary.chunks_written);
        println!("  Items exported: {}", summary.items_exported);
        println!("  Events: {}", summary.events_emitted);
        println!(
            "  Notification: {}",
            if summary.notification_sent { "sent" } else { "skipped" }
        );
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
        println!("✅ Export completed successfully!");

        Ok(EXIT_OK)
    }
}

/// Process exit code for an export failure
pub fn exit_code_for(error: &RecoError) -> i32 {
    match error {
        RecoError::ExportLocked(_) => EXIT_LOCKED,
        RecoError::Configuration(_)
        | RecoError::InvalidArgument(_)
        | RecoError::UnsupportedExportCredentialsMethod { .. }
        | RecoError::UnsupportedGroupItemStrategy { .. } => EXIT_CONFIG,
        _ => EXIT_FATAL,
    }
}
