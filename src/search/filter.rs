//! Attribute filter and query construction

use std::collections::BTreeMap;

use crate::preprocess::{get_list, UNISEX};
use crate::types::{
    AttributeFilter, AttributeValue, DocumentAttribute, FacetRequest, QueryRequest,
    QueryResultType,
};

/// Facets requested with every product query
pub const DEFAULT_FACETS: &[&str] = &["category", "brand"];

/// Maximum values returned per facet
pub const FACET_MAX_RESULTS: usize = 10;

/// `key == value` (key lowercased)
pub fn equals_filter(key: &str, value: &str) -> AttributeFilter {
    AttributeFilter::EqualsTo(DocumentAttribute::new(
        key.to_lowercase(),
        AttributeValue::StringValue(value.to_string()),
    ))
}

/// `key` contains any of the comma-separated values
pub fn contains_filter(key: &str, value: &str) -> AttributeFilter {
    AttributeFilter::ContainsAny(DocumentAttribute::new(
        key.to_lowercase(),
        AttributeValue::StringListValue(get_list(value)),
    ))
}

/// Products for the given gender plus unisex products.
///
/// Without a gender only unisex products pass.
pub fn gender_filter(gender: &str) -> AttributeFilter {
    let gender = gender.trim();
    if gender.is_empty() {
        return equals_filter("gender", UNISEX);
    }

    AttributeFilter::OrAllFilters(vec![
        equals_filter("gender", gender),
        equals_filter("gender", UNISEX),
    ])
}

/// Filter for one extracted attribute, `None` for unfiltered keys
pub fn attribute_filter(key: &str, value: &str) -> Option<AttributeFilter> {
    if value.trim().is_empty() {
        return None;
    }

    match key {
        "std_product_type" => Some(contains_filter(key, value)),
        "category" => Some(equals_filter(key, value)),
        _ => None,
    }
}

/// Filters for every filterable extracted attribute, in key order
pub fn dynamic_filters(extracted: &BTreeMap<String, String>) -> Vec<AttributeFilter> {
    extracted
        .iter()
        .filter_map(|(key, value)| attribute_filter(key, value))
        .collect()
}

/// `gender AND (any dynamic filter)`, or just the gender filter
pub fn combine_filters(gender: AttributeFilter, dynamic: Vec<AttributeFilter>) -> AttributeFilter {
    if dynamic.is_empty() {
        return gender;
    }

    AttributeFilter::AndAllFilters(vec![gender, AttributeFilter::OrAllFilters(dynamic)])
}

/// Query text: the extracted `query_text` when present, otherwise the message
pub fn query_text<'a>(message: &'a str, extracted: &'a BTreeMap<String, String>) -> &'a str {
    extracted
        .get("query_text")
        .map(String::as_str)
        .unwrap_or(message)
}

/// Assemble the full index query
pub fn build_query(
    message: &str,
    extracted: &BTreeMap<String, String>,
    gender: &str,
    top_n: usize,
) -> QueryRequest {
    let filter = combine_filters(gender_filter(gender), dynamic_filters(extracted));

    QueryRequest {
        query_text: query_text(message, extracted).to_string(),
        attribute_filter: Some(filter),
        page_size: top_n,
        page_number: 1,
        facets: DEFAULT_FACETS
            .iter()
            .map(|key| FacetRequest {
                key: key.to_string(),
                max_results: FACET_MAX_RESULTS,
            })
            .collect(),
        result_type: QueryResultType::Document,
    }
}
