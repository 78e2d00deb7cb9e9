//! MCP Tools implementation
//!
//! - Catalogue tools (2): ranked search and product lookup
//! - Text tools (2): preprocessing preview and thesaurus export

pub mod catalog;
pub mod text;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::server::McpServer;

pub use catalog::{GetProductTool, SearchProductsTool};
pub use text::{ExportThesaurusTool, PreprocessTextTool};

/// Register all tools with the MCP server
pub fn register_all_tools(server: &mut McpServer, catalog: Arc<Catalog>) {
    server.register_tool(Box::new(SearchProductsTool::new(catalog.clone())));
    server.register_tool(Box::new(GetProductTool::new(catalog.clone())));
    server.register_tool(Box::new(PreprocessTextTool::new(catalog.clone())));
    server.register_tool(Box::new(ExportThesaurusTool::new(catalog)));
}
