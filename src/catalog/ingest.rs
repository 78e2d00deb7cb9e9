//! Normalization and batched upload of the catalogue into the index

use chrono::Utc;
use rayon::prelude::*;

use crate::error::SearchResult;
use crate::preprocess::normalize_product;
use crate::types::{IndexDocument, IngestReport, Product};

use super::Catalog;

/// Documents pushed to the index per call
pub const BATCH_SIZE: usize = 10;

/// Threshold for normalizing products in parallel
const PARALLEL_NORMALIZE_THRESHOLD: usize = 1000;

impl Catalog {
    /// Normalize every product and push the documents to the index.
    ///
    /// Products that fail normalization and documents the index refuses are
    /// logged and counted; they never abort the run.
    pub fn ingest(&self) -> SearchResult<IngestReport> {
        let products = self.store.read().products.clone();
        self.ingest_products(&products)
    }

    /// Ingest a given set of products
    pub fn ingest_products(&self, products: &[Product]) -> SearchResult<IngestReport> {
        let updated_at = Utc::now();
        let normalize = |product: &Product| {
            normalize_product(product, &self.preprocessor, updated_at)
                .map_err(|e| (product.product_id.clone(), e))
        };

        let normalized: Vec<_> = if products.len() > PARALLEL_NORMALIZE_THRESHOLD {
            products.par_iter().map(normalize).collect()
        } else {
            products.iter().map(normalize).collect()
        };

        let mut report = IngestReport {
            products: products.len(),
            ..IngestReport::default()
        };

        let mut documents: Vec<IndexDocument> = Vec::new();
        for result in normalized {
            match result {
                Ok(docs) => documents.extend(docs),
                Err((product_id, e)) => {
                    tracing::warn!("Skipping product {}: {}", product_id, e);
                    report.failed += 1;
                }
            }
        }
        report.documents = documents.len();

        let mut index = self.index.write();
        for batch in documents.chunks(BATCH_SIZE) {
            report.batches += 1;
            match index.put_documents(batch.to_vec()) {
                Ok(put) => {
                    for failed in &put.failed {
                        tracing::warn!("Index rejected document '{}': {}", failed.id, failed.reason);
                    }
                    report.failed += put.failed.len();
                }
                Err(e) => {
                    tracing::warn!("Batch {} failed: {}", report.batches, e);
                    report.failed += batch.len();
                }
            }
        }

        tracing::info!(
            products = report.products,
            documents = report.documents,
            batches = report.batches,
            failed = report.failed,
            "Ingestion complete"
        );
        Ok(report)
    }
}
