//! Chunk file generation
//!
//! A chunk is one page of items of a single type and language, serialized
//! through an [`OutputWriter`] as
//! `{"contentList": {"content": [record, ...]}}`.

use crate::adapters::writer::{JsonOutputWriter, OutputWriter};
use crate::core::files::FileManager;
use crate::domain::{Item, ItemList, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Produces a fresh writer for each chunk document
pub type WriterFactory = Arc<dyn Fn() -> Box<dyn OutputWriter> + Send + Sync>;

/// Writer factory producing [`JsonOutputWriter`]s
pub fn json_writer_factory() -> WriterFactory {
    Arc::new(|| Box::new(JsonOutputWriter::new()) as Box<dyn OutputWriter>)
}

const RESERVED_FIELDS: [&str; 5] = [
    "contentId",
    "contentTypeId",
    "contentTypeIdentifier",
    "itemTypeName",
    "language",
];

/// Description of one chunk file to write
#[derive(Debug)]
pub struct FileSettings {
    pub item_list: ItemList,
    pub type_identifier: String,
    pub language: String,
    pub page: usize,
    /// Path relative to the export root
    pub chunk_path: String,
}

impl FileSettings {
    /// Describe page `page` of `type_identifier` in `language`
    ///
    /// `chunk_dir` is a relative directory ending with `/`.
    pub fn new(
        item_list: ItemList,
        chunk_dir: &str,
        type_identifier: &str,
        language: &str,
        page: usize,
        extension: &str,
    ) -> Self {
        Self {
            item_list,
            type_identifier: type_identifier.to_string(),
            language: language.to_string(),
            page,
            chunk_path: format!("{chunk_dir}{type_identifier}_{language}_{page}.{extension}"),
        }
    }
}

/// Serializes pages of items into chunk files under the export root
pub struct ChunkGenerator {
    files: FileManager,
    writer_factory: WriterFactory,
}

impl ChunkGenerator {
    pub fn new(files: FileManager, writer_factory: WriterFactory) -> Self {
        Self {
            files,
            writer_factory,
        }
    }

    /// Extension of the files this generator writes
    pub fn extension(&self) -> &'static str {
        (self.writer_factory)().extension()
    }

    /// Media type of the files this generator writes
    pub fn media_type(&self) -> &'static str {
        (self.writer_factory)().media_type()
    }

    /// Write the chunk described by `settings`
    ///
    /// Returns the absolute path of the written file.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the document cannot be produced and `Io`
    /// if it cannot be written.
    pub fn generate(&self, settings: FileSettings) -> Result<PathBuf> {
        let mut writer = (self.writer_factory)();
        let document = render(writer.as_mut(), &settings.item_list)?;
        let path = self.files.save(&settings.chunk_path, &document)?;

        tracing::info!(
            item_type = %settings.type_identifier,
            language = %settings.language,
            page = settings.page,
            items = settings.item_list.count(),
            chunk_path = %settings.chunk_path,
            media_type = writer.media_type(),
            "Chunk written"
        );
        Ok(path)
    }
}

/// Serialize items as a content list document
///
/// # Errors
///
/// Returns `Serialization` if the writer rejects the element sequence.
pub fn render(writer: &mut dyn OutputWriter, items: &ItemList) -> Result<Vec<u8>> {
    writer.start_object("contentList")?;
    writer.start_list("content")?;
    for item in items {
        write_record(writer, item)?;
    }
    writer.end_list("content")?;
    writer.end_object("contentList")?;
    writer.finish()
}

fn write_record(writer: &mut dyn OutputWriter, item: &Item) -> Result<()> {
    let item_type = item.item_type();
    writer.start_object("content")?;
    writer.value("contentId", item.id().into())?;
    writer.value("contentTypeId", item_type.id().into())?;
    writer.value("contentTypeIdentifier", item_type.identifier().into())?;
    writer.value("itemTypeName", item_type.name().into())?;
    writer.value("language", item.language().into())?;
    for (name, value) in item.attributes().iter() {
        if RESERVED_FIELDS.contains(&name) {
            tracing::debug!(id = %item.id(), attribute = %name, "Skipping attribute shadowing a record field");
            continue;
        }
        writer.value(name, value.to_json())?;
    }
    writer.end_object("content")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemType;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn article(id: &str) -> Item {
        Item::builder()
            .id(id)
            .item_type(ItemType::new(2, "article", "Article").unwrap())
            .language("eng-GB")
            .attribute("title", format!("Article {id}"))
            .attribute("tags", vec!["news", "sport"])
            .attribute("language", "shadowed")
            .build()
            .unwrap()
    }

    #[test]
    fn test_file_settings_chunk_path() {
        let settings = FileSettings::new(
            ItemList::empty(),
            "2025/01/02/03/04/",
            "article",
            "eng-GB",
            3,
            "json",
        );
        assert_eq!(settings.chunk_path, "2025/01/02/03/04/article_eng-GB_3.json");
    }

    #[test]
    fn test_render_content_list() {
        let mut writer = JsonOutputWriter::new();
        let items = ItemList::new(vec![article("1")]);

        let document: Value = serde_json::from_slice(&render(&mut writer, &items).unwrap()).unwrap();

        assert_eq!(
            document,
            json!({"contentList": {"content": [{
                "contentId": "1",
                "contentTypeId": 2,
                "contentTypeIdentifier": "article",
                "itemTypeName": "Article",
                "language": "eng-GB",
                "title": "Article 1",
                "tags": ["news", "sport"]
            }]}})
        );
    }

    #[test]
    fn test_render_empty_list() {
        let mut writer = JsonOutputWriter::new();
        let document: Value =
            serde_json::from_slice(&render(&mut writer, &ItemList::empty()).unwrap()).unwrap();
        assert_eq!(document, json!({"contentList": {"content": []}}));
    }

    #[test]
    fn test_generate_writes_file_under_root() {
        let dir = TempDir::new().unwrap();
        let generator = ChunkGenerator::new(FileManager::new(dir.path()), json_writer_factory());
        let settings = FileSettings::new(
            ItemList::new(vec![article("1"), article("2")]),
            "2025/01/02/03/04/",
            "article",
            "eng-GB",
            1,
            generator.extension(),
        );

        let path = generator.generate(settings).unwrap();

        assert_eq!(path, dir.path().join("2025/01/02/03/04/article_eng-GB_1.json"));
        let document: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(document["contentList"]["content"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_json_factory_writes_json_documents() {
        let dir = TempDir::new().unwrap();
        let generator = ChunkGenerator::new(FileManager::new(dir.path()), json_writer_factory());
        assert_eq!(generator.media_type(), "application/json");
        assert_eq!(generator.extension(), "json");
    }
}
