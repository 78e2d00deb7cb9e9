//! Get product tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::error::{SearchError, SearchResult};
use crate::protocol::{json_content, McpTool, Tool};

/// Tool for fetching one catalogue product by id
pub struct GetProductTool {
    catalog: Arc<Catalog>,
}

impl GetProductTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for GetProductTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "get_product",
            "Get a catalogue product by its id",
            json!({
                "type": "object",
                "properties": {
                    "product_id": {
                        "type": "string",
                        "description": "Product id as found in search results"
                    }
                },
                "required": ["product_id"]
            }),
        )
    }

    fn execute(&self, params: Value) -> SearchResult<Value> {
        let product_id = params
            .get("product_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SearchError::invalid_query("Missing product_id"))?;

        let product = self.catalog.get_product(product_id)?;
        json_content(&product)
    }
}
