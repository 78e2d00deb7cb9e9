//! Catalogue file loading (JSON Lines)

use std::fs;
use std::path::Path;

use crate::error::{SearchError, SearchResult};
use crate::types::Product;

/// Load a JSON Lines catalogue file
pub fn load_catalog(path: impl AsRef<Path>) -> SearchResult<Vec<Product>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let products = parse_catalog(&content)?;
    tracing::info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Parse JSON Lines catalogue text, one product per line.
///
/// Blank lines are skipped; the first malformed line is an error.
pub fn parse_catalog(content: &str) -> SearchResult<Vec<Product>> {
    let mut products = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let product: Product =
            serde_json::from_str(line).map_err(|e| SearchError::CatalogParse {
                line: idx + 1,
                reason: e.to_string(),
            })?;
        products.push(product);
    }

    Ok(products)
}
