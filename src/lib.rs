//! Product Search
//!
//! Hybrid product search over a catalogue: synonym-aware preprocessing,
//! metadata chunking, retrieval from a semantic index and fuzzy re-ranking
//! of the hits by weighted attribute match.
//!
//! # Modules
//!
//! - `types`: Core data structures (Product, IndexDocument, QueryRequest, RankedProduct)
//! - `preprocess`: Text preprocessing, chunking, normalization and index schema
//! - `search`: Thesaurus, filters, semantic index, consolidation, fuzzy scoring, ranking
//! - `catalog`: Product catalogue with ingestion and end-to-end search
//! - `protocol`: MCP and JSON-RPC protocol types
//! - `server`: MCP server implementation
//! - `tools`: MCP tool implementations
//! - `api`: HTTP API
//! - `config`, `logging`, `error`: Runtime configuration, tracing setup, error type
//!
//! # Example
//!
//! ```no_run
//! use product_search::{Catalog, ProductQuery, SearchConfig};
//!
//! fn main() -> product_search::SearchResult<()> {
//!     let (catalog, _report) = Catalog::from_config(&SearchConfig::from_env())?;
//!     let outcome = catalog.product_search(
//!         &ProductQuery::new().with_type("dress").with_color("red"),
//!     )?;
//!     println!("{:?}", outcome.product_ids);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod preprocess;
pub mod protocol;
pub mod search;
pub mod server;
pub mod tools;
pub mod types;

// Re-export commonly used items at crate root
pub use catalog::Catalog;
pub use config::{LogFormat, SearchConfig, ServeMode};
pub use error::{SearchError, SearchResult};
pub use preprocess::{preprocess_text, TextPreprocessor};
pub use protocol::{McpTool, ServerInfo, Tool};
pub use search::{InMemoryIndex, SemanticIndex, Thesaurus};
pub use server::McpServer;
pub use types::{
    FuzzyMatch, IndexDocument, IngestReport, Product, ProductQuery, RankedProduct, SearchOutcome,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
