//! Tree browsing endpoints.
//!
//! - GET /api/v1/repository/tree?name=&path=
//!   One directory level with the commit that produced each entry.
//! - GET /api/v1/repository/blob?name=&path=
//!   File content and the metadata of the requested commit.
//! - GET /api/v1/repository/raw?name=&path=
//!   Raw file bytes.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{BlobContent, TreeListing};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/tree", get(get_tree))
        .route("/api/v1/repository/blob", get(get_blob))
        .route("/api/v1/repository/raw", get(get_raw))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct TreeQuery {
    name: Option<String>,
    path: Option<String>,
}

async fn get_tree(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<TreeListing>> {
    let listing = state
        .browse(move |browser| browser.browse_tree(query.name.as_deref(), query.path.as_deref()))
        .await?;
    Ok(Json(listing))
}

#[derive(Debug, Deserialize)]
struct BlobQuery {
    name: Option<String>,
    path: String,
}

async fn find_blob(state: &AppState, query: BlobQuery) -> Result<BlobContent> {
    let missing = query.path.clone();
    state
        .browse(move |browser| browser.browse_blob(query.name.as_deref(), &query.path))
        .await?
        .ok_or(AppError::PathNotFound(missing))
}

async fn get_blob(
    State(state): State<AppState>,
    Query(query): Query<BlobQuery>,
) -> Result<Json<BlobContent>> {
    Ok(Json(find_blob(&state, query).await?))
}

async fn get_raw(State(state): State<AppState>, Query(query): Query<BlobQuery>) -> Result<Response> {
    let blob = find_blob(&state, query).await?;
    let content_type = if blob.is_binary {
        "application/octet-stream"
    } else {
        "text/plain; charset=utf-8"
    };

    Ok(([(header::CONTENT_TYPE, content_type)], blob.data).into_response())
}
