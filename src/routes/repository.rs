use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::models::RepositoryInfo;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository", get(get_repository_info))
        .with_state(state)
}

async fn get_repository_info(State(state): State<AppState>) -> Result<Json<RepositoryInfo>> {
    let info = state.browse(|browser| browser.info()).await?;
    Ok(Json(info))
}
