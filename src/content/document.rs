//! Raw documents as returned by the content API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rich_text::{rich_text_to_html, RichTextBlock};

/// A document from the content API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Repository-wide document id
    pub id: String,

    /// Human readable unique id, used as the URL slug
    #[serde(default)]
    pub uid: Option<String>,

    /// Custom type of the document (post, about, ...)
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Last publication timestamp, as sent by the API
    #[serde(default)]
    pub last_publication_date: Option<String>,

    /// Document fields
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl RawDocument {
    /// Create an empty document of the given type
    pub fn new(id: &str, doc_type: &str) -> Self {
        Self {
            id: id.to_string(),
            uid: None,
            doc_type: doc_type.to_string(),
            last_publication_date: None,
            data: Map::new(),
        }
    }

    /// Identifier used in URLs: the uid, or the id when the type has none
    pub fn slug(&self) -> &str {
        self.uid.as_deref().unwrap_or(&self.id)
    }

    /// Blocks of a rich text field; missing or malformed fields yield no blocks
    pub fn rich_text(&self, field: &str) -> Vec<RichTextBlock> {
        match self.data.get(field) {
            Some(value @ Value::Array(_)) => {
                serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                    tracing::debug!("Rich text field {} of {} is malformed: {}", field, self.id, e);
                    Vec::new()
                })
            }
            _ => Vec::new(),
        }
    }

    /// Rich text field as plain text, blocks joined by a space
    pub fn text(&self, field: &str) -> String {
        self.rich_text(field)
            .iter()
            .map(|block| block.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text of the first paragraph block of a rich text field
    pub fn first_paragraph(&self, field: &str) -> String {
        self.rich_text(field)
            .into_iter()
            .find(|block| block.kind == "paragraph")
            .map(|block| block.text)
            .unwrap_or_default()
    }

    /// Rich text field rendered as HTML
    pub fn html(&self, field: &str) -> String {
        rich_text_to_html(&self.rich_text(field))
    }

    /// `url` of an image or link field
    pub fn url(&self, field: &str) -> String {
        self.data
            .get(field)
            .and_then(|value| value.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}
