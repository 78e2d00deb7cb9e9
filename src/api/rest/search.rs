//! Search endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::types::{ProductQuery, RankedProduct};

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub color: Option<String>,
    pub occasion: Option<String>,
    pub desc: Option<String>,
    pub gender: Option<String>,
    /// Index hits retrieved before re-ranking
    pub limit: Option<usize>,
}

impl SearchParams {
    fn into_query(self, default_top_n: usize) -> ProductQuery {
        ProductQuery {
            product_type: self.product_type,
            product_color: self.color,
            product_occasion: self.occasion,
            product_desc: self.desc,
            gender: self.gender,
            top_n: self
                .limit
                .filter(|&n| n > 0)
                .map(|n| n.min(1000))
                .unwrap_or(default_top_n),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub product_ids: Vec<String>,
    pub results: Vec<RankedProduct>,
}

/// GET /api/search - Ranked product search
///
/// At least one of `type`, `color`, `occasion` or `desc` is required.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let query = params.into_query(state.catalog.top_n());
    if query.is_empty() {
        return Err(ApiError::bad_request(
            "One of 'type', 'color', 'occasion' or 'desc' is required",
        ));
    }

    // Ranking is CPU-bound; keep it off the async workers
    let catalog = state.catalog.clone();
    let outcome = tokio::task::spawn_blocking(move || catalog.product_search(&query))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))??;

    let total = outcome.results.len();
    let response = SearchResponse {
        product_ids: outcome.product_ids,
        results: outcome.results,
    };
    Ok(Json(ApiResponse::with_total(
        response,
        state.next_request_id(),
        total,
    )))
}
