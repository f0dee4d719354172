//! Export run orchestration
//!
//! One run walks every requested item type and, nested inside it, every
//! language. Each combination with matching items is paged into chunk files
//! of at most `page_size` items and described by one [`ExportEvent`]. When
//! at least one event exists the recommendation engine is notified.
//!
//! The export lock is held for the whole run and released on every exit
//! path. Chunks already written stay in place when a later step fails.

use super::chunk::{json_writer_factory, ChunkGenerator, FileSettings, WriterFactory};
use super::notifier::ExportNotifier;
use super::summary::{ExportSummary, ExportedGroup};
use crate::adapters::datasource::{create_data_sources, DataSource};
use crate::adapters::notifier::ReqwestNotifier;
use crate::config::{ExportConfig, RecoConfig};
use crate::core::aggregator::DataSourceAggregator;
use crate::core::credentials::{ConfigCredentialsResolver, ExportCredentialsDispatcher};
use crate::core::files::FileManager;
use crate::domain::{Credentials, Criteria, ExportEvent, ItemType, RecoError, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Inputs of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParameters {
    /// Item type identifiers, in export order
    pub item_types: Vec<String>,

    /// Languages, exported in this order within each item type
    pub languages: Vec<String>,

    /// Maximum items per chunk file
    pub page_size: usize,

    /// Registered credentials method securing the chunk directory
    pub credentials_method: String,

    /// Site scope handed to the credentials method
    pub site_scope: Option<String>,

    /// Transaction id echoed in the notification
    pub transaction: Option<String>,
}

impl ExportParameters {
    /// Parameters taken from the `[export]` configuration section
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            item_types: config.item_types.clone(),
            languages: config.languages.clone(),
            page_size: config.page_size,
            credentials_method: config.credentials_method.clone(),
            site_scope: config.site_scope.clone(),
            transaction: None,
        }
    }
}

/// Pages items from a data source into secured chunk files
pub struct Exporter {
    source: Arc<dyn DataSource>,
    credentials: Arc<ExportCredentialsDispatcher>,
    files: FileManager,
    chunks: ChunkGenerator,
    notifier: ExportNotifier,
    download_base_url: String,
    format: String,
}

impl Exporter {
    /// Create an exporter writing JSON chunks
    ///
    /// # Arguments
    ///
    /// * `source` - data source (or aggregator) queried for items
    /// * `credentials` - registry of directory securing methods
    /// * `files` - export root management
    /// * `notifier` - end-of-export notification
    /// * `download_base_url` - public URL the export root is served under
    /// * `format` - format tag announced in events
    pub fn new(
        source: Arc<dyn DataSource>,
        credentials: Arc<ExportCredentialsDispatcher>,
        files: FileManager,
        notifier: ExportNotifier,
        download_base_url: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            source,
            credentials,
            chunks: ChunkGenerator::new(files.clone(), json_writer_factory()),
            files,
            notifier,
            download_base_url: download_base_url.into(),
            format: format.into(),
        }
    }

    /// Wire an exporter from configuration
    ///
    /// Configured sources are aggregated in declaration order and
    /// notifications go out over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fixture cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &RecoConfig) -> Result<Self> {
        let sources = create_data_sources(config)?;
        let aggregator: Arc<dyn DataSource> = Arc::new(DataSourceAggregator::new(sources));

        let resolver = Arc::new(ConfigCredentialsResolver::new(config.credentials.clone()));
        let credentials = Arc::new(ExportCredentialsDispatcher::with_defaults(resolver));

        let http = Arc::new(ReqwestNotifier::new(Duration::from_secs(
            config.recommendation.timeout_seconds,
        ))?);
        let notifier = ExportNotifier::new(http, &config.recommendation);

        Ok(Self::new(
            aggregator,
            credentials,
            FileManager::new(&config.export.root_dir),
            notifier,
            config.export.download_base_url.clone(),
            config.export.format.clone(),
        ))
    }

    /// Replace the chunk document writer
    pub fn with_writer_factory(mut self, writer_factory: WriterFactory) -> Self {
        self.chunks = ChunkGenerator::new(self.files.clone(), writer_factory);
        self
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    /// Download URL of a chunk path
    pub fn download_url(&self, chunk_path: &str) -> String {
        format!(
            "{}/{}",
            self.download_base_url.trim_end_matches('/'),
            chunk_path.trim_start_matches('/')
        )
    }

    /// Execute one export run
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a zero page size
    /// - `UnsupportedExportCredentialsMethod` for an unknown method
    /// - `ExportLocked` if another run holds the lock
    /// - any data source, file or notification failure, which aborts the run
    pub async fn run(&self, params: &ExportParameters) -> Result<ExportSummary> {
        let start = Instant::now();
        let criteria = self.validate(params)?;

        let run_id = Uuid::new_v4().to_string();
        let lock = self.files.lock(&format!(
            "run_id={run_id} pid={} started_at={}",
            std::process::id(),
            Utc::now().to_rfc3339()
        ))?;

        tracing::info!(
            run_id = %run_id,
            source = %self.source.name(),
            item_types = ?criteria.item_type_identifiers(),
            languages = ?criteria.languages(),
            page_size = params.page_size,
            credentials_method = %params.credentials_method,
            "Starting export"
        );

        let chunk_dir = self.files.create_chunk_dir()?;
        let credentials = self
            .credentials
            .credentials(&params.credentials_method, params.site_scope.as_deref())
            .await?;
        let credentials =
            self.files
                .secure_dir(&chunk_dir, &params.credentials_method, credentials)?;

        let mut summary = ExportSummary::new(&run_id, &chunk_dir);
        let mut events = Vec::new();

        for identifier in criteria.item_type_identifiers() {
            for language in criteria.languages() {
                let group_criteria = criteria
                    .narrowed_to(identifier, language)
                    .with_window(params.page_size, 0);
                let exported = self
                    .export_group(&group_criteria, &chunk_dir, &credentials)
                    .await?;
                if let Some((group, event)) = exported {
                    summary.add_group(group);
                    events.push(event);
                }
            }
        }

        summary.events_emitted = events.len();
        if events.is_empty() {
            tracing::info!(run_id = %run_id, "No items exported, notification skipped");
        } else {
            self.notifier
                .notify(params.transaction.as_deref(), &events)
                .await?;
            summary.notification_sent = true;
        }

        lock.release()?;

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    fn validate(&self, params: &ExportParameters) -> Result<Criteria> {
        if params.page_size == 0 {
            return Err(RecoError::InvalidArgument(
                "page size must be greater than zero".to_string(),
            ));
        }
        self.credentials
            .ensure_supported(&params.credentials_method)?;

        // Builder drops repeated identifiers and languages.
        Criteria::builder()
            .item_types(params.item_types.iter().map(String::as_str))
            .languages(params.languages.iter().map(String::as_str))
            .build()
    }

    /// Page one item type and language into chunks
    ///
    /// Returns `None` when nothing matches.
    async fn export_group(
        &self,
        criteria: &Criteria,
        chunk_dir: &str,
        credentials: &Credentials,
    ) -> Result<Option<(ExportedGroup, ExportEvent)>> {
        let identifier = criteria
            .item_type_identifiers()
            .first()
            .cloned()
            .unwrap_or_default();
        let language = criteria.languages().first().cloned().unwrap_or_default();
        let page_size = criteria.limit();

        let count = self.source.count_items(criteria).await?;
        if count == 0 {
            tracing::debug!(item_type = %identifier, language = %language, "No items to export");
            return Ok(None);
        }

        let pages = count.div_ceil(page_size);
        tracing::info!(
            item_type = %identifier,
            language = %language,
            count = count,
            pages = pages,
            "Exporting item group"
        );

        let mut urls = Vec::with_capacity(pages);
        let mut items_exported = 0;
        let mut item_type: Option<ItemType> = None;

        for page in 1..=pages {
            let page_criteria = criteria.with_window(page_size, (page - 1) * page_size);
            let items = self.source.fetch_items(&page_criteria).await?;

            if item_type.is_none() {
                item_type = items.first().ok().map(|item| item.item_type().clone());
            }
            items_exported += items.count();

            let settings = FileSettings::new(
                items,
                chunk_dir,
                &identifier,
                &language,
                page,
                self.chunks.extension(),
            );
            let chunk_path = settings.chunk_path.clone();
            self.chunks.generate(settings)?;
            urls.push(self.download_url(&chunk_path));
        }

        let (type_id, type_name) = item_type
            .map_or_else(|| (0, identifier.clone()), |t| (t.id(), t.name().to_string()));

        let event = ExportEvent::full(
            type_id,
            type_name,
            language.clone(),
            urls.clone(),
            credentials.clone(),
            self.format.clone(),
        );
        let group = ExportedGroup {
            item_type: identifier,
            language,
            items: items_exported,
            urls,
        };
        Ok(Some((group, event)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::datasource::InMemoryDataSource;
    use crate::adapters::notifier::{BasicAuth, HttpNotifier};
    use crate::config::{secret_string, CredentialsConfig, RecommendationConfig};
    use crate::domain::Item;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingNotifier {
        payloads: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl HttpNotifier for RecordingNotifier {
        async fn notify(
            &self,
            _endpoint: &str,
            payload: &serde_json::Value,
            _auth: &BasicAuth,
        ) -> Result<()> {
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    fn items(count: usize) -> Vec<Item> {
        let article = ItemType::new(2, "article", "Article").unwrap();
        (1..=count)
            .map(|n| {
                Item::builder()
                    .id(n.to_string())
                    .item_type(article.clone())
                    .language("eng-GB")
                    .build()
                    .unwrap()
            })
            .collect()
    }

    fn exporter(root: &TempDir, count: usize) -> (Exporter, Arc<RecordingNotifier>) {
        let http = Arc::new(RecordingNotifier::default());
        let notifier = ExportNotifier::new(
            http.clone(),
            &RecommendationConfig {
                endpoint: "https://reco.example.com/api/{customer_id}/items".to_string(),
                customer_id: "12345".to_string(),
                license_key: secret_string("license".to_string()),
                timeout_seconds: 30,
            },
        );
        let credentials = Arc::new(ExportCredentialsDispatcher::with_defaults(Arc::new(
            ConfigCredentialsResolver::new(CredentialsConfig::default()),
        )));
        let exporter = Exporter::new(
            Arc::new(InMemoryDataSource::new("memory", items(count))),
            credentials,
            FileManager::new(root.path()),
            notifier,
            "https://cms.example.com/export/",
            "generic",
        );
        (exporter, http)
    }

    fn params(page_size: usize, method: &str) -> ExportParameters {
        ExportParameters {
            item_types: vec!["article".to_string()],
            languages: vec!["eng-GB".to_string()],
            page_size,
            credentials_method: method.to_string(),
            site_scope: None,
            transaction: Some("tx-1".to_string()),
        }
    }

    #[test]
    fn test_download_url_joins_with_single_slash() {
        let root = TempDir::new().unwrap();
        let (exporter, _) = exporter(&root, 0);
        assert_eq!(
            exporter.download_url("2025/01/01/00/00/article_eng-GB_1.json"),
            "https://cms.example.com/export/2025/01/01/00/00/article_eng-GB_1.json"
        );
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected_before_locking() {
        let root = TempDir::new().unwrap();
        let (exporter, _) = exporter(&root, 1);

        let err = exporter.run(&params(0, "none")).await.unwrap_err();
        assert!(matches!(err, RecoError::InvalidArgument(_)));
        assert!(!exporter.files().is_locked());
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let root = TempDir::new().unwrap();
        let (exporter, _) = exporter(&root, 1);

        let err = exporter.run(&params(10, "ldap")).await.unwrap_err();
        assert!(matches!(
            err,
            RecoError::UnsupportedExportCredentialsMethod { .. }
        ));
    }

    #[tokio::test]
    async fn test_locked_export_fails() {
        let root = TempDir::new().unwrap();
        let (exporter, http) = exporter(&root, 1);
        let _held = exporter.files().lock("other-run").unwrap();

        let err = exporter.run(&params(10, "none")).await.unwrap_err();
        assert!(matches!(err, RecoError::ExportLocked(_)));
        assert!(http.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_pages_and_notifies() {
        let root = TempDir::new().unwrap();
        let (exporter, http) = exporter(&root, 25);

        let summary = exporter.run(&params(10, "none")).await.unwrap();

        assert_eq!(summary.chunks_written, 3);
        assert_eq!(summary.items_exported, 25);
        assert_eq!(summary.events_emitted, 1);
        assert!(summary.notification_sent);
        assert!(!exporter.files().is_locked());

        let payloads = http.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["transaction"], "tx-1");
        assert_eq!(payloads[0]["events"][0]["itemTypeName"], "Article");
        assert_eq!(
            payloads[0]["events"][0]["uri"].as_array().map(Vec::len),
            Some(3)
        );
    }

    #[tokio::test]
    async fn test_run_without_items_skips_notification() {
        let root = TempDir::new().unwrap();
        let (exporter, http) = exporter(&root, 0);

        let summary = exporter.run(&params(10, "none")).await.unwrap();

        assert!(summary.is_empty());
        assert!(!summary.notification_sent);
        assert!(http.payloads.lock().unwrap().is_empty());
        assert!(!exporter.files().is_locked());
    }

    #[tokio::test]
    async fn test_run_pages_across_aggregated_sources() {
        let root = TempDir::new().unwrap();
        let (single, http) = exporter(&root, 0);
        let aggregator = DataSourceAggregator::new(vec![
            Arc::new(InMemoryDataSource::new("first", items(600))) as Arc<dyn DataSource>,
            Arc::new(InMemoryDataSource::new("second", items(600))) as Arc<dyn DataSource>,
        ]);
        let exporter = Exporter {
            source: Arc::new(aggregator),
            ..single
        };

        let summary = exporter.run(&params(500, "none")).await.unwrap();
        assert_eq!(summary.chunks_written, 3);
        assert_eq!(summary.items_exported, 1200);

        let payloads = http.payloads.lock().unwrap();
        let prefix = "https://cms.example.com/export/";
        let sizes: Vec<usize> = payloads[0]["events"][0]["uri"]
            .as_array()
            .unwrap()
            .iter()
            .map(|uri| {
                let relative = uri.as_str().unwrap().trim_start_matches(prefix);
                let document: serde_json::Value =
                    serde_json::from_slice(&exporter.files().load(relative).unwrap()).unwrap();
                document["contentList"]["content"].as_array().unwrap().len()
            })
            .collect();
        assert_eq!(sizes, vec![500, 500, 200]);
    }
}
