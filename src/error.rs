//! Error model for the search pipeline

use thiserror::Error;

/// Result type used across the crate
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors raised while loading, indexing or querying the catalogue
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A thesaurus line could not be parsed
    #[error("thesaurus line {line}: {reason}")]
    ThesaurusParse { line: usize, reason: String },

    /// A catalogue line could not be parsed
    #[error("catalog line {line}: {reason}")]
    CatalogParse { line: usize, reason: String },

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The semantic index backend rejected an operation
    #[error("index error: {0}")]
    Index(String),
}

impl SearchError {
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    /// Whether the error was caused by caller input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuery(_) | Self::InvalidNumber(_) | Self::ProductNotFound(_)
        )
    }
}
