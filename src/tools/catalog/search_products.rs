//! Search products tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::error::SearchResult;
use crate::protocol::{json_content, McpTool, Tool};
use crate::types::ProductQuery;

/// Tool for ranked product search over structured attributes
pub struct SearchProductsTool {
    catalog: Arc<Catalog>,
}

impl SearchProductsTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for SearchProductsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "search_products",
            "Search the product catalogue by type, color, occasion and description. \
             Returns product ids ranked by weighted fuzzy match.",
            json!({
                "type": "object",
                "properties": {
                    "product_type": {
                        "type": "string",
                        "description": "Product type, e.g. 'dress'"
                    },
                    "product_color": {
                        "type": "string",
                        "description": "Color, e.g. 'red'"
                    },
                    "product_occasion": {
                        "type": "string",
                        "description": "Occasion, e.g. 'party'"
                    },
                    "product_desc": {
                        "type": "string",
                        "description": "Free-text description"
                    },
                    "gender": {
                        "type": "string",
                        "description": "Shopper gender; unisex products always match"
                    },
                    "top_n": {
                        "type": "integer",
                        "description": "Index hits to retrieve before re-ranking (default: server setting)"
                    }
                }
            }),
        )
    }

    fn execute(&self, params: Value) -> SearchResult<Value> {
        let query: ProductQuery = serde_json::from_value(params)?;

        let outcome = self.catalog.product_search(&query)?;
        json_content(&json!({
            "product_ids": outcome.product_ids,
            "results": outcome.results,
        }))
    }
}
