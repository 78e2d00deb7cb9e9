//! Catalogue preprocessing before indexing
//!
//! - Synonym expansion and stop-word removal on product text
//! - Metadata chunking of color/type/occasion lists
//! - Normalization of products into typed index documents
//! - Index field configuration

pub mod chunk;
pub mod normalize;
pub mod schema;
pub mod text;

pub use chunk::{chunks_for_product, doc_chunks};
pub use normalize::{chunk_document_id, normalize_product, CHUNK_ID_SEPARATOR, MAX_LIST_VALUES};
pub use schema::{product_index_fields, FieldDefinition, FieldType, Relevance, SearchFlags};
pub use text::{
    classify_gender, get_list, parse_rounded_number, preprocess_text, remove_redundant_words,
    TextPreprocessor, UNISEX,
};
