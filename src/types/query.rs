//! Semantic index query and response types

use serde::{Deserialize, Serialize};

use super::DocumentAttribute;

/// Recursive attribute filter tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeFilter {
    EqualsTo(DocumentAttribute),
    ContainsAny(DocumentAttribute),
    OrAllFilters(Vec<AttributeFilter>),
    AndAllFilters(Vec<AttributeFilter>),
}

/// Facet requested alongside a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetRequest {
    #[serde(rename = "DocumentAttributeKey")]
    pub key: String,
    #[serde(rename = "MaxResults")]
    pub max_results: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryResultType {
    Document,
}

/// A query sent to the semantic index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "QueryText")]
    pub query_text: String,
    #[serde(rename = "AttributeFilter", skip_serializing_if = "Option::is_none")]
    pub attribute_filter: Option<AttributeFilter>,
    #[serde(rename = "PageSize")]
    pub page_size: usize,
    #[serde(rename = "PageNumber")]
    pub page_number: usize,
    #[serde(rename = "Facets", default)]
    pub facets: Vec<FacetRequest>,
    #[serde(rename = "QueryResultTypeFilter")]
    pub result_type: QueryResultType,
}

/// Confidence band attached to each hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreConfidence {
    NotAvailable,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ScoreConfidence {
    /// Band for a relevance score in `0.0..=1.0`
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            ScoreConfidence::VeryHigh
        } else if score >= 0.5 {
            ScoreConfidence::High
        } else if score >= 0.25 {
            ScoreConfidence::Medium
        } else if score > 0.0 {
            ScoreConfidence::Low
        } else {
            ScoreConfidence::NotAvailable
        }
    }

    /// Whether hits of this band are trusted for re-ranking
    pub fn is_accepted(self) -> bool {
        matches!(
            self,
            ScoreConfidence::VeryHigh | ScoreConfidence::High | ScoreConfidence::Medium
        )
    }
}

/// A single hit returned by the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResultItem {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "DocumentId", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(rename = "DocumentTitle", default)]
    pub title: String,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "ScoreConfidence")]
    pub confidence: ScoreConfidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    pub key: String,
    pub counts: Vec<FacetCount>,
}

/// Index response for a query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(rename = "QueryId")]
    pub query_id: String,
    #[serde(rename = "ResultItems", default)]
    pub items: Vec<QueryResultItem>,
    #[serde(rename = "FacetResults", default)]
    pub facets: Vec<FacetResult>,
    #[serde(rename = "TotalNumberOfResults")]
    pub total: usize,
}

/// A document the index refused during a batch put
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedDocument {
    pub id: String,
    pub reason: String,
}

/// Outcome of one batch put
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchPutReport {
    pub accepted: usize,
    pub failed: Vec<FailedDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ScoreConfidence::from_score(1.0), ScoreConfidence::VeryHigh);
        assert_eq!(ScoreConfidence::from_score(0.5), ScoreConfidence::High);
        assert_eq!(ScoreConfidence::from_score(0.3), ScoreConfidence::Medium);
        assert_eq!(ScoreConfidence::from_score(0.1), ScoreConfidence::Low);
        assert_eq!(ScoreConfidence::from_score(0.0), ScoreConfidence::NotAvailable);
        assert!(ScoreConfidence::Medium.is_accepted());
        assert!(!ScoreConfidence::Low.is_accepted());
    }

    #[test]
    fn test_confidence_serialized_names() {
        assert_eq!(
            serde_json::to_value(ScoreConfidence::VeryHigh).unwrap(),
            serde_json::json!("VERY_HIGH")
        );
    }
}
