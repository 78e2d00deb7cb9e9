//! Product endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use super::{ApiError, ApiResponse, PaginationParams};
use crate::api::state::AppState;
use crate::types::Product;

/// GET /api/products - List products with pagination
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Json<ApiResponse<Vec<Product>>> {
    let total = state.catalog.len();
    let products = state
        .catalog
        .list_products(Some(params.normalized_limit()), Some(params.offset));

    Json(ApiResponse::with_total(
        products,
        state.next_request_id(),
        total,
    ))
}

/// GET /api/products/:id - Get single product
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    // URL decode the id (handles spaces and special chars)
    let decoded_id = urlencoding::decode(&id)
        .map(|s| s.into_owned())
        .unwrap_or(id);

    let product = state.catalog.get_product(&decoded_id)?;
    Ok(Json(ApiResponse::new(product, state.next_request_id())))
}

/// Catalogue and index counts
#[derive(Debug, Serialize)]
pub struct CatalogStats {
    pub products: usize,
    pub documents: usize,
    pub thesaurus_rules: usize,
    pub requests_served: u64,
    pub uptime_seconds: i64,
}

/// GET /api/stats - Catalogue statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<CatalogStats>> {
    let stats = CatalogStats {
        products: state.catalog.len(),
        documents: state.catalog.indexed_documents(),
        thesaurus_rules: state.catalog.thesaurus().len(),
        requests_served: state.requests_served(),
        uptime_seconds: (chrono::Utc::now() - state.started_at).num_seconds(),
    };
    Json(ApiResponse::new(stats, state.next_request_id()))
}
