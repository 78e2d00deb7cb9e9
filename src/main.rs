//! Product Search Server - Binary Entry Point
//!
//! Serves the catalogue over MCP on stdio or over HTTP, per configuration.

use std::sync::Arc;

use product_search::api::{self, AppState};
use product_search::catalog::Catalog;
use product_search::config::{LogFormat, SearchConfig, ServeMode};
use product_search::error::SearchResult;
use product_search::logging;
use product_search::protocol::ServerInfo;
use product_search::server::McpServer;
use product_search::tools::register_all_tools;

fn main() -> SearchResult<()> {
    // Logging first so configuration warnings are visible
    logging::init(LogFormat::from_env());
    let config = SearchConfig::from_env();

    tracing::info!(
        catalog = %config.catalog_path.display(),
        mode = ?config.mode,
        "Starting {} {}",
        product_search::NAME,
        product_search::VERSION
    );

    let (catalog, report) = Catalog::from_config(&config)?;
    tracing::info!(
        "Catalogue ready: {} products, {} documents indexed, {} failed",
        report.products,
        report.documents,
        report.failed
    );
    let catalog = Arc::new(catalog);

    match config.mode {
        ServeMode::Stdio => {
            let mut server = McpServer::with_info(ServerInfo::default());
            register_all_tools(&mut server, catalog);
            server.run()
        }
        ServeMode::Http => {
            let state = Arc::new(AppState::new(catalog));
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(api::serve(state, config.port))
        }
    }
}
