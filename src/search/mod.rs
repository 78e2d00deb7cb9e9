//! Retrieval and re-ranking
//!
//! - Synonym dictionary and Solr-format thesaurus
//! - Attribute filters and query construction
//! - Semantic index trait with an in-memory inverted index
//! - Grouping of chunk hits back into products
//! - Fuzzy scoring and weighted ranking

pub mod consolidate;
pub mod filter;
pub mod fuzzy;
mod index;
pub mod rank;
mod synonyms;
mod thesaurus;

pub use consolidate::{
    accepted_document_ids, docs_with_titles, group_and_combine, split_document_id, DocTitle,
};
pub use filter::{
    attribute_filter, build_query, combine_filters, contains_filter, dynamic_filters,
    equals_filter, gender_filter, DEFAULT_FACETS, FACET_MAX_RESULTS,
};
pub use fuzzy::{fuzzy_search, partial_ratio, ratio};
pub use index::{matches_filter, InMemoryIndex, SemanticIndex};
pub use rank::{
    match_products_partial, rank_products, sort_ranked, weight_products, weight_results,
    AttributeMatches, PRODUCT_COLOR_WEIGHT, PRODUCT_OCCASION_WEIGHT, PRODUCT_TYPE_WEIGHT,
};
pub use synonyms::{is_stop_word, STOP_WORDS, SYNONYM_GROUPS};
pub use thesaurus::{SynonymRule, Thesaurus};
