//! Query-side and ranking result types

use serde::{Deserialize, Serialize};

use super::QueryRequest;

/// Structured product query, typically extracted from a user message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub product_color: Option<String>,
    #[serde(default)]
    pub product_occasion: Option<String>,
    #[serde(default)]
    pub product_desc: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Index hits to retrieve; 0 uses the catalogue's configured default
    #[serde(default)]
    pub top_n: usize,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, value: &str) -> Self {
        self.product_type = Some(value.to_string());
        self
    }

    pub fn with_color(mut self, value: &str) -> Self {
        self.product_color = Some(value.to_string());
        self
    }

    pub fn with_occasion(mut self, value: &str) -> Self {
        self.product_occasion = Some(value.to_string());
        self
    }

    pub fn with_desc(mut self, value: &str) -> Self {
        self.product_desc = Some(value.to_string());
        self
    }

    pub fn with_gender(mut self, value: &str) -> Self {
        self.gender = Some(value.to_string());
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Query text sent to the index: type, color, occasion and description
    /// joined by single spaces (missing parts stay as empty slots)
    pub fn query_text(&self) -> String {
        [
            &self.product_type,
            &self.product_color,
            &self.product_occasion,
            &self.product_desc,
        ]
        .iter()
        .map(|v| v.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Whether no attribute carries any text
    pub fn is_empty(&self) -> bool {
        self.query_text().trim().is_empty()
    }
}

/// Fuzzy score of one product against one attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub product_id: String,
    pub product_title: String,
    /// Similarity in `0.0..=100.0`
    pub score: f64,
}

/// A product with its combined weighted score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product_id: String,
    /// Normalized weighted score in `0.0..=1.0`
    pub total_weight: f64,
    /// `total_weight * 100`
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_type: Option<FuzzyMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_color: Option<FuzzyMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_occasion: Option<FuzzyMatch>,
}

/// Result of an end-to-end product search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub product_ids: Vec<String>,
    pub results: Vec<RankedProduct>,
    pub request: QueryRequest,
}

/// Result of ingesting a catalogue into an index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub products: usize,
    pub documents: usize,
    pub batches: usize,
    pub failed: usize,
}
