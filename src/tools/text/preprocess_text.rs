//! Preprocess text tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::error::{SearchError, SearchResult};
use crate::preprocess::{classify_gender, get_list, remove_redundant_words};
use crate::protocol::{json_content, McpTool, Tool};

/// Tool showing how product text is rewritten before indexing
pub struct PreprocessTextTool {
    catalog: Arc<Catalog>,
}

impl PreprocessTextTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for PreprocessTextTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "preprocess_text",
            "Apply synonym expansion and stop-word removal to text, as done for indexed products",
            json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to preprocess"
                    }
                },
                "required": ["text"]
            }),
        )
    }

    fn execute(&self, params: Value) -> SearchResult<Value> {
        let text = params
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SearchError::invalid_query("Missing text"))?;

        let preprocessed = self.catalog.preprocessor().preprocess(text);
        let merged = remove_redundant_words(&preprocessed);
        json_content(&json!({
            "preprocessed": preprocessed,
            "values": get_list(&merged),
            "gender": classify_gender(text),
        }))
    }
}
