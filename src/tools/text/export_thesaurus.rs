//! Export thesaurus tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::error::SearchResult;
use crate::protocol::{json_content, text_content, McpTool, Tool};

/// Tool rendering the active thesaurus in Solr synonym format
pub struct ExportThesaurusTool {
    catalog: Arc<Catalog>,
}

impl ExportThesaurusTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for ExportThesaurusTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "export_thesaurus",
            "Export the active synonym thesaurus in Solr format, one rule per line. \
             With 'term', return only that term and its synonyms.",
            json!({
                "type": "object",
                "properties": {
                    "term": {
                        "type": "string",
                        "description": "Word to look up, e.g. 'maroon'"
                    }
                }
            }),
        )
    }

    fn execute(&self, params: Value) -> SearchResult<Value> {
        match params.get("term").and_then(|v| v.as_str()) {
            Some(term) => json_content(&json!({
                "term": term,
                "synonyms": self.catalog.get_synonyms(term),
            })),
            None => Ok(text_content(self.catalog.thesaurus().render())),
        }
    }
}
