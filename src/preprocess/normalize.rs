//! Turn catalogue products into index documents

use chrono::{DateTime, Utc};

use crate::error::{SearchError, SearchResult};
use crate::types::{
    AttributeValue, ContentType, DocumentAttribute, FieldValue, IndexDocument, Product,
};

use super::chunk::chunks_for_product;
use super::text::{
    classify_gender, get_list, parse_rounded_number, remove_redundant_words, TextPreprocessor,
    UNISEX,
};

/// Separator between product id and chunk sequence in document ids
pub const CHUNK_ID_SEPARATOR: &str = "__";

/// Maximum values kept in a list attribute
pub const MAX_LIST_VALUES: usize = 10;

const UNKNOWN: &str = "unknown";
const ANY_OCCASION: &str = "any occasion";
const DEFAULT_PRICE: i64 = 100;

/// Build the document id of chunk `index` of `product_id`
pub fn chunk_document_id(product_id: &str, index: usize) -> String {
    format!("{product_id}{CHUNK_ID_SEPARATOR}{index}")
}

/// Normalize one product into one document per metadata chunk.
///
/// Missing attributes fall back to neutral defaults; malformed numeric
/// attributes are an error.
pub fn normalize_product(
    product: &Product,
    preprocessor: &TextPreprocessor,
    updated_at: DateTime<Utc>,
) -> SearchResult<Vec<IndexDocument>> {
    let text = |field: &Option<FieldValue>, default: &str| -> String {
        match Product::text(field) {
            Some(value) => preprocessor.preprocess(&value),
            None => default.to_string(),
        }
    };
    let list_field = |field: &Option<FieldValue>, default: &str| -> String {
        remove_redundant_words(&text(field, default))
    };

    let gender = classify_gender(&text(&product.gender, UNISEX));
    let category = text(&product.category, UNKNOWN);
    let brand = text(&product.brand, UNKNOWN);
    let description = text(&product.description, UNKNOWN);

    let product_type = get_list(&list_field(&product.product_type, UNKNOWN));
    let color = get_list(&list_field(&product.color, UNKNOWN));
    let occasion = get_list(&list_field(&product.occasion, ANY_OCCASION));

    let rating = match Product::text(&product.rating) {
        Some(raw) => parse_float(&raw)?,
        None => 0.0,
    };
    let rating_long = match (rating * 10.0) as i64 {
        0 => 1,
        n => n,
    };
    let discount_long = match Product::text(&product.discount) {
        Some(raw) => parse_rounded_number(&raw)?,
        None => 0,
    };
    let final_price_long = match Product::text(&product.final_price) {
        Some(raw) => match parse_rounded_number(&raw)? {
            0 => DEFAULT_PRICE,
            n => n,
        },
        None => DEFAULT_PRICE,
    };

    let attributes = vec![
        DocumentAttribute::string("gender", gender),
        DocumentAttribute::string("category", category),
        DocumentAttribute::string("brand", brand),
        DocumentAttribute::string("product_id", product.product_id.clone()),
        DocumentAttribute::string_list("product_type", truncated(&product_type)),
        DocumentAttribute::string_list("color", truncated(&color)),
        DocumentAttribute::string_list("occasion", truncated(&occasion)),
        DocumentAttribute::long("rating", rating_long),
        DocumentAttribute::long("discount", discount_long),
        DocumentAttribute::long("final_price", final_price_long),
        DocumentAttribute::new("_last_updated_at", AttributeValue::DateValue(updated_at)),
    ];

    let documents = chunks_for_product(&color, &product_type, &occasion)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| IndexDocument {
            id: chunk_document_id(&product.product_id, index),
            body: format!("{chunk} ,{description}"),
            title: chunk,
            content_type: ContentType::PlainText,
            attributes: attributes.clone(),
        })
        .collect();

    Ok(documents)
}

fn truncated(values: &[String]) -> Vec<String> {
    values.iter().take(MAX_LIST_VALUES).cloned().collect()
}

fn parse_float(raw: &str) -> SearchResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SearchError::InvalidNumber(raw.to_string()))
}
