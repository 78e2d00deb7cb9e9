//! REST API module for HTTP endpoints
//!
//! - `GET /api/search` - Ranked product search
//! - `GET /api/products` - List products with pagination
//! - `GET /api/products/:id` - Get single product
//! - `GET /api/thesaurus` - Active thesaurus as text
//! - `GET /api/stats` - Catalogue and index counts

pub mod products;
pub mod search;
pub mod thesaurus;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Common pagination parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items to return (default: 100, max: 1000)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of items to skip
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}

impl PaginationParams {
    /// Normalize limit to max 1000
    pub fn normalized_limit(&self) -> usize {
        self.limit.min(1000)
    }
}

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub request_id: u64,
    /// Total count (for paginated responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, request_id: u64) -> Self {
        Self {
            data,
            request_id,
            total: None,
        }
    }

    pub fn with_total(data: T, request_id: u64, total: usize) -> Self {
        Self {
            data,
            request_id,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::ProductNotFound(_) => ApiError::not_found(err.to_string()),
            e if e.is_client_error() => ApiError::bad_request(e.to_string()),
            e => {
                tracing::error!("Request failed: {}", e);
                ApiError::internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
