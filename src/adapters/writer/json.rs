//! JSON output writer

use super::OutputWriter;
use crate::domain::{RecoError, Result};
use serde_json::{Map, Value};

enum Frame {
    Object { name: String, fields: Map<String, Value> },
    List { name: String, entries: Vec<Value> },
}

/// Builds a JSON document from writer events
///
/// The document root is an implicit object; top-level elements become its
/// fields.
///
/// ```
/// use reco_export::adapters::writer::{JsonOutputWriter, OutputWriter};
///
/// let mut writer = JsonOutputWriter::new();
/// writer.start_list("tags").unwrap();
/// writer.value("tag", "news".into()).unwrap();
/// writer.end_list("tags").unwrap();
/// let bytes = writer.finish().unwrap();
/// assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"tags":["news"]}"#);
/// ```
pub struct JsonOutputWriter {
    root: Map<String, Value>,
    stack: Vec<Frame>,
}

impl JsonOutputWriter {
    pub fn new() -> Self {
        Self {
            root: Map::new(),
            stack: Vec::new(),
        }
    }

    fn attach(&mut self, name: String, value: Value) {
        match self.stack.last_mut() {
            Some(Frame::Object { fields, .. }) => {
                fields.insert(name, value);
            }
            Some(Frame::List { entries, .. }) => entries.push(value),
            None => {
                self.root.insert(name, value);
            }
        }
    }

    fn mismatch(expected: &str, found: Option<&Frame>) -> RecoError {
        let found = match found {
            Some(Frame::Object { name, .. }) => format!("object '{name}'"),
            Some(Frame::List { name, .. }) => format!("list '{name}'"),
            None => "document root".to_string(),
        };
        RecoError::Serialization(format!("cannot close {expected}, innermost element is {found}"))
    }
}

impl Default for JsonOutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for JsonOutputWriter {
    fn start_object(&mut self, name: &str) -> Result<()> {
        self.stack.push(Frame::Object {
            name: name.to_string(),
            fields: Map::new(),
        });
        Ok(())
    }

    fn end_object(&mut self, name: &str) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object { name: open, fields }) if open == name => {
                self.attach(open, Value::Object(fields));
                Ok(())
            }
            other => Err(Self::mismatch(&format!("object '{name}'"), other.as_ref())),
        }
    }

    fn start_list(&mut self, name: &str) -> Result<()> {
        self.stack.push(Frame::List {
            name: name.to_string(),
            entries: Vec::new(),
        });
        Ok(())
    }

    fn end_list(&mut self, name: &str) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::List { name: open, entries }) if open == name => {
                self.attach(open, Value::Array(entries));
                Ok(())
            }
            other => Err(Self::mismatch(&format!("list '{name}'"), other.as_ref())),
        }
    }

    fn value(&mut self, name: &str, value: Value) -> Result<()> {
        self.attach(name.to_string(), value);
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        if let Some(open) = self.stack.last() {
            let name = match open {
                Frame::Object { name, .. } | Frame::List { name, .. } => name.clone(),
            };
            return Err(RecoError::Serialization(format!(
                "document finished with element '{name}' still open"
            )));
        }

        let document = Value::Object(std::mem::take(&mut self.root));
        Ok(serde_json::to_vec(&document)?)
    }

    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
