//! Catalogue product records

use serde::{Deserialize, Deserializer, Serialize};

/// A raw attribute value as it appears in a catalogue export.
///
/// Plain JSON strings and numbers are accepted, as well as the typed
/// `{"S": "..."}` / `{"N": "..."}` cells produced by key-value store dumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Typed {
        #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
        s: Option<String>,
        #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
        n: Option<String>,
    },
}

impl FieldValue {
    /// The value rendered as text, `None` when empty
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s.clone()),
            FieldValue::Text(_) => None,
            FieldValue::Number(n) => Some(format_number(*n)),
            FieldValue::Typed { s, n } => s
                .as_ref()
                .filter(|v| !v.is_empty())
                .or_else(|| n.as_ref().filter(|v| !v.is_empty()))
                .cloned(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = FieldValue::deserialize(deserializer)?;
    value
        .as_text()
        .ok_or_else(|| serde::de::Error::custom("product_id must not be empty"))
}

/// A product in the catalogue. Read-only input to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<FieldValue>,
}

impl Product {
    /// Create a product with only an identifier
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            title: None,
            color: None,
            product_type: None,
            occasion: None,
            description: None,
            gender: None,
            category: None,
            brand: None,
            rating: None,
            discount: None,
            final_price: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_product_type(mut self, product_type: &str) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_occasion(mut self, occasion: &str) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Text of an optional field, `None` when missing or empty
    pub fn text(field: &Option<FieldValue>) -> Option<String> {
        field.as_ref().and_then(FieldValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_plain_record() {
        let json = r#"{"product_id":"p1","color":"Red","rating":4.5,"final_price":"$12.40"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id, "p1");
        assert_eq!(Product::text(&product.color).as_deref(), Some("Red"));
        assert_eq!(Product::text(&product.rating).as_deref(), Some("4.5"));
        assert_eq!(Product::text(&product.final_price).as_deref(), Some("$12.40"));
        assert!(product.occasion.is_none());
    }

    #[test]
    fn test_deserialize_typed_cells() {
        let json = r#"{"product_id":{"S":"p2"},"discount":{"N":"15"},"brand":{"S":""}}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id, "p2");
        assert_eq!(Product::text(&product.discount).as_deref(), Some("15"));
        assert_eq!(Product::text(&product.brand), None);
    }

    #[test]
    fn test_empty_id_rejected() {
        let json = r#"{"product_id":""}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_integral_numbers_render_without_fraction() {
        assert_eq!(FieldValue::Number(100.0).as_text().as_deref(), Some("100"));
    }
}
