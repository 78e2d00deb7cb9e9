//! Index documents and their typed attributes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed attribute value, serialized in the index service's shape
/// (`{"StringValue": "..."}`, `{"LongValue": 3}`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    StringValue(String),
    StringListValue(Vec<String>),
    LongValue(i64),
    DateValue(DateTime<Utc>),
}

impl AttributeValue {
    /// Values viewed as a list of strings, for filter evaluation and facets
    pub fn as_strings(&self) -> Vec<String> {
        match self {
            AttributeValue::StringValue(s) => vec![s.clone()],
            AttributeValue::StringListValue(list) => list.clone(),
            AttributeValue::LongValue(n) => vec![n.to_string()],
            AttributeValue::DateValue(d) => vec![d.to_rfc3339()],
        }
    }
}

/// A key/value attribute attached to a document or used in a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAttribute {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: AttributeValue,
}

impl DocumentAttribute {
    pub fn new(key: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, AttributeValue::StringValue(value.into()))
    }

    pub fn string_list(key: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(key, AttributeValue::StringListValue(values))
    }

    pub fn long(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, AttributeValue::LongValue(value))
    }
}

/// Document content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    PlainText,
}

/// One indexable chunk of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// `<product_id>__<chunk_index>`
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Blob")]
    pub body: String,
    #[serde(rename = "ContentType")]
    pub content_type: ContentType,
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<DocumentAttribute>,
}

impl IndexDocument {
    /// Look up an attribute by key
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_serialized_shape() {
        let attr = DocumentAttribute::string_list("color", vec!["red".to_string()]);
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Key": "color", "Value": {"StringListValue": ["red"]}})
        );
    }

    #[test]
    fn test_attribute_lookup() {
        let doc = IndexDocument {
            id: "p1__0".to_string(),
            title: "red dress".to_string(),
            body: "red dress ,backless".to_string(),
            content_type: ContentType::PlainText,
            attributes: vec![DocumentAttribute::long("rating", 45)],
        };
        assert_eq!(doc.attribute("rating"), Some(&AttributeValue::LongValue(45)));
        assert!(doc.attribute("brand").is_none());
        assert_eq!(
            serde_json::to_value(doc.content_type).unwrap(),
            serde_json::json!("PLAIN_TEXT")
        );
    }
}
