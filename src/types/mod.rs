//! Data types for the product search pipeline
//!
//! This module contains the core data structures used throughout the application.

mod document;
mod product;
mod query;
mod ranking;

pub use document::{AttributeValue, ContentType, DocumentAttribute, IndexDocument};
pub use product::{FieldValue, Product};
pub use query::{
    AttributeFilter, BatchPutReport, FacetCount, FacetRequest, FacetResult, FailedDocument,
    QueryRequest, QueryResponse, QueryResultItem, QueryResultType, ScoreConfidence,
};
pub use ranking::{FuzzyMatch, IngestReport, ProductQuery, RankedProduct, SearchOutcome};
