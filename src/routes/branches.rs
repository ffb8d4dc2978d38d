//! Branch listing endpoint.
//!
//! - GET /api/v1/repository/branches
//!   Names of all local branches, then remote-tracking branches.
//!   Used by: branch selector

use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/branches", get(list_branches))
        .with_state(state)
}

async fn list_branches(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let branches = state.browse(|browser| browser.branch_names()).await?;
    Ok(Json(branches))
}
