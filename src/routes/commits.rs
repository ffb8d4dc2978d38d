//! History endpoints.
//!
//! - GET /api/v1/repository/commits?name=&limit=&offset=
//!   Newest-first history reachable from `name` (branch, tag, commit id,
//!   or HEAD when absent). Unknown names give an empty page.
//!
//! - GET /api/v1/repository/commits/{id}
//!   One commit by full id with its change summary against the first parent.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{CommitDetail, CommitListResponse};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/commits", get(get_commits))
        .route("/api/v1/repository/commits/{id}", get(get_commit_detail))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CommitsQuery {
    name: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

fn default_limit() -> usize {
    50
}

async fn get_commits(
    State(state): State<AppState>,
    Query(query): Query<CommitsQuery>,
) -> Result<Json<CommitListResponse>> {
    let name = query.name;
    let history = state
        .browse(move |browser| browser.get_commits(name.as_deref()))
        .await?;

    let total = history.commits.len();
    let commits = history
        .commits
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect();

    Ok(Json(CommitListResponse {
        branch: history.branch,
        commits,
        total,
        has_more: total > query.offset.saturating_add(query.limit),
    }))
}

async fn get_commit_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommitDetail>> {
    let lookup = id.clone();
    state
        .browse(move |browser| browser.get_commit_detail(&lookup))
        .await?
        .map(Json)
        .ok_or(AppError::CommitNotFound(id))
}
