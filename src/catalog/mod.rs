//! Product catalogue - core search engine
//!
//! Owns the product list, the semantic index and the thesaurus, and runs
//! ingestion and the end-to-end product search.

mod ingest;
mod load;
mod search;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::config::{SearchConfig, DEFAULT_TOP_N};
use crate::error::{SearchError, SearchResult};
use crate::preprocess::{product_index_fields, TextPreprocessor};
use crate::search::{InMemoryIndex, SemanticIndex, Thesaurus};
use crate::types::{IngestReport, Product};

pub use ingest::BATCH_SIZE;
pub use load::{load_catalog, parse_catalog};

/// Products in insertion order with an id lookup
#[derive(Debug, Default)]
pub(crate) struct ProductStore {
    pub(crate) products: Vec<Product>,
    pub(crate) positions: HashMap<String, usize>,
}

/// Catalogue with its index, shared across request handlers
pub struct Catalog {
    pub(crate) catalog_path: Option<PathBuf>,
    pub(crate) store: RwLock<ProductStore>,
    pub(crate) index: RwLock<Box<dyn SemanticIndex>>,
    pub(crate) preprocessor: TextPreprocessor,
    pub(crate) thesaurus: Thesaurus,
    pub(crate) top_n: usize,
}

impl Catalog {
    /// Create an empty catalogue backed by an in-memory index
    pub fn new(thesaurus: Thesaurus) -> SearchResult<Self> {
        let index = InMemoryIndex::with_thesaurus(thesaurus.clone());
        Self::with_index(thesaurus, Box::new(index))
    }

    /// Create an empty catalogue backed by a custom index.
    ///
    /// The index schema is configured immediately.
    pub fn with_index(thesaurus: Thesaurus, mut index: Box<dyn SemanticIndex>) -> SearchResult<Self> {
        index.update_schema(product_index_fields())?;
        let preprocessor = TextPreprocessor::new(&thesaurus)?;

        Ok(Self {
            catalog_path: None,
            store: RwLock::new(ProductStore::default()),
            index: RwLock::new(index),
            preprocessor,
            thesaurus,
            top_n: DEFAULT_TOP_N,
        })
    }

    /// Build, load and ingest a catalogue from configuration.
    ///
    /// A missing catalogue file yields an empty catalogue.
    pub fn from_config(config: &SearchConfig) -> SearchResult<(Self, IngestReport)> {
        let thesaurus = match &config.thesaurus_path {
            Some(path) => {
                let thesaurus = Thesaurus::load(path)?;
                tracing::info!(
                    "Loaded thesaurus with {} rules from {}",
                    thesaurus.len(),
                    path.display()
                );
                thesaurus
            }
            None => Thesaurus::builtin(),
        };

        let mut catalog = Self::new(thesaurus)?.with_top_n(config.top_n);
        catalog.catalog_path = Some(config.catalog_path.clone());

        if config.catalog_path.exists() {
            let products = load_catalog(&config.catalog_path)?;
            catalog.add_products(products)?;
        } else {
            tracing::warn!(
                "Catalogue file {} not found, starting empty",
                config.catalog_path.display()
            );
        }

        let report = catalog.ingest()?;
        Ok((catalog, report))
    }

    /// Set the default number of index hits per search
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        if top_n > 0 {
            self.top_n = top_n;
        }
        self
    }

    /// Add products, rejecting ids already present (in the catalogue or
    /// earlier in the same batch). Nothing is added on error.
    pub fn add_products(&self, products: Vec<Product>) -> SearchResult<usize> {
        let mut store = self.store.write();

        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if store.positions.contains_key(&product.product_id)
                || !seen.insert(product.product_id.as_str())
            {
                return Err(SearchError::DuplicateProduct(product.product_id.clone()));
            }
        }

        let added = products.len();
        for product in products {
            let position = store.products.len();
            store.positions.insert(product.product_id.clone(), position);
            store.products.push(product);
        }
        Ok(added)
    }

    /// Get a product by id
    pub fn get_product(&self, product_id: &str) -> SearchResult<Product> {
        let store = self.store.read();
        store
            .positions
            .get(product_id)
            .map(|&i| store.products[i].clone())
            .ok_or_else(|| SearchError::ProductNotFound(product_id.to_string()))
    }

    /// List products with optional pagination
    pub fn list_products(&self, limit: Option<usize>, offset: Option<usize>) -> Vec<Product> {
        let store = self.store.read();
        let iter = store.products.iter().skip(offset.unwrap_or(0));
        match limit {
            Some(limit) => iter.take(limit).cloned().collect(),
            None => iter.cloned().collect(),
        }
    }

    /// Number of products in the catalogue
    pub fn len(&self) -> usize {
        self.store.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of documents in the index
    pub fn indexed_documents(&self) -> usize {
        self.index.read().len()
    }

    pub fn thesaurus(&self) -> &Thesaurus {
        &self.thesaurus
    }

    /// The term plus every word sharing a rule with it in the active thesaurus
    pub fn get_synonyms(&self, term: &str) -> Vec<String> {
        self.thesaurus.expand_term(term)
    }

    pub fn preprocessor(&self) -> &TextPreprocessor {
        &self.preprocessor
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Catalogue file this catalogue was loaded from, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}
