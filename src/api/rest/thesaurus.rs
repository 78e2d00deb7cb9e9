//! Thesaurus endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::api::state::AppState;

/// GET /api/thesaurus - Active thesaurus in Solr synonym format
pub async fn get_thesaurus(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.catalog.thesaurus().render(),
    )
}
