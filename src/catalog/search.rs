//! End-to-end product search: retrieval, consolidation, fuzzy re-ranking

use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::{SearchError, SearchResult};
use crate::search::{build_query, docs_with_titles, fuzzy_search, group_and_combine, rank_products};
use crate::types::{FuzzyMatch, ProductQuery, SearchOutcome};

use super::Catalog;

/// Fuzzy matches at or above this score are kept
const FUZZY_THRESHOLD: f64 = 0.0;

impl Catalog {
    /// Search the catalogue for a structured product query.
    ///
    /// Retrieves candidate chunks from the index, groups them into products,
    /// scores each requested attribute against the combined titles and ranks
    /// by weighted score. When a product type is requested, only products
    /// matching it are returned.
    pub fn product_search(&self, query: &ProductQuery) -> SearchResult<SearchOutcome> {
        if query.is_empty() {
            return Err(SearchError::invalid_query(
                "at least one of product type, color, occasion or description is required",
            ));
        }

        let top_n = if query.top_n > 0 { query.top_n } else { self.top_n };
        let gender = query
            .gender
            .as_deref()
            .map(|g| g.trim().to_lowercase())
            .unwrap_or_default();
        let query_text = query.query_text();

        let start = Instant::now();
        let request = build_query(&query_text, &BTreeMap::new(), &gender, top_n);
        tracing::info!(user_gender = %gender, query_text = %query_text, "Product search");
        tracing::info!(
            "attribute_filter: {}",
            serde_json::to_string(&request.attribute_filter)?
        );

        let response = self.index.read().query(&request)?;
        let grouped = group_and_combine(&docs_with_titles(&response.items));
        tracing::info!(
            hits = response.items.len(),
            products = grouped.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Index retrieval complete"
        );

        let score_attribute = |value: &Option<String>| -> Vec<FuzzyMatch> {
            match value.as_deref().map(str::trim) {
                Some(value) if !value.is_empty() => fuzzy_search(
                    value,
                    grouped.iter().map(|(id, title)| (id, title)),
                    FUZZY_THRESHOLD,
                ),
                _ => Vec::new(),
            }
        };

        let types = score_attribute(&query.product_type);
        let colors = score_attribute(&query.product_color);
        let occasions = score_attribute(&query.product_occasion);

        let require_type = query
            .product_type
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        let results = rank_products(types, colors, occasions, require_type);
        let product_ids = results.iter().map(|r| r.product_id.clone()).collect();

        tracing::info!(results = results.len(), "Product search complete");

        Ok(SearchOutcome {
            product_ids,
            results,
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Thesaurus;
    use crate::types::{AttributeFilter, Product};

    fn catalog() -> Catalog {
        let catalog = Catalog::new(Thesaurus::builtin()).unwrap();
        catalog
            .add_products(vec![
                Product::new("p1")
                    .with_color("Crimson")
                    .with_product_type("Dress")
                    .with_occasion("Party")
                    .with_description("backless satin")
                    .with_gender("women"),
                Product::new("p2")
                    .with_color("Blue")
                    .with_product_type("Shirt")
                    .with_occasion("Formal")
                    .with_description("slim fit cotton")
                    .with_gender("men"),
                Product::new("p3")
                    .with_color("Red")
                    .with_product_type("Shirt")
                    .with_occasion("Casual")
                    .with_description("linen")
                    .with_gender("unisex men women"),
            ])
            .unwrap();
        catalog.ingest().unwrap();
        catalog
    }

    #[test]
    fn test_empty_query_rejected() {
        let result = catalog().product_search(&ProductQuery::new().with_type("  "));
        assert!(matches!(result, Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn test_type_requested_keeps_type_matches_only() {
        let catalog = catalog();
        let outcome = catalog
            .product_search(
                &ProductQuery::new()
                    .with_type("dress")
                    .with_color("red")
                    .with_gender("female"),
            )
            .unwrap();

        assert_eq!(outcome.product_ids.first().map(String::as_str), Some("p1"));
        assert!(outcome.results.iter().all(|r| r.prod_type.is_some()));
        assert!(outcome
            .results
            .windows(2)
            .all(|w| w[0].total_weight >= w[1].total_weight));
    }

    #[test]
    fn test_request_carries_gender_filter() {
        let outcome = catalog()
            .product_search(&ProductQuery::new().with_color("red").with_gender("Male"))
            .unwrap();

        assert_eq!(outcome.request.query_text, " red  ");
        assert_eq!(outcome.request.page_size, 20);
        assert!(matches!(
            outcome.request.attribute_filter,
            Some(AttributeFilter::OrAllFilters(_))
        ));
        // p1 is womenswear and filtered out by the index
        assert!(!outcome.product_ids.contains(&"p1".to_string()));
        assert!(outcome.product_ids.contains(&"p3".to_string()));
    }
}
