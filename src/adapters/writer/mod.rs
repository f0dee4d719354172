//! Structured document writers
//!
//! An [`OutputWriter`] receives a stream of start/end object, start/end list
//! and value events and serializes them into a document. Chunk files are
//! produced through this interface so the exporter does not depend on a wire
//! format.

pub mod json;

pub use json::JsonOutputWriter;

use crate::domain::Result;

/// Generic structured-document serializer
///
/// Elements nest: an object or list opened inside a list becomes one of its
/// entries and its name is only used to check the matching `end_*` call.
pub trait OutputWriter: Send {
    /// Open a named object element
    fn start_object(&mut self, name: &str) -> Result<()>;

    /// Close the innermost object element
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if the innermost open element is not
    /// an object called `name`.
    fn end_object(&mut self, name: &str) -> Result<()>;

    /// Open a named list element
    fn start_list(&mut self, name: &str) -> Result<()>;

    /// Close the innermost list element
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if the innermost open element is not
    /// a list called `name`.
    fn end_list(&mut self, name: &str) -> Result<()>;

    /// Write a named value into the innermost element
    fn value(&mut self, name: &str, value: serde_json::Value) -> Result<()>;

    /// Finish the document and return its bytes
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if elements are still open.
    fn finish(&mut self) -> Result<Vec<u8>>;

    /// Media type of the produced document
    fn media_type(&self) -> &'static str;

    /// File extension for produced documents, without the dot
    fn extension(&self) -> &'static str;
}
