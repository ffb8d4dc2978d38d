//! API route handlers - maps HTTP endpoints to browsing operations.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Basic repo info (GET /api/v1/repository)
//! - `branches`: Branch names
//! - `commits`: History from a reference and single-commit detail
//! - `tree`: Attributed directory listing, file content and raw bytes
//!
//! Every request is its own browsing session: the repository is opened on a
//! blocking thread for the request and released when the work returns.

pub mod branches;
pub mod commits;
pub mod repository;
pub mod tree;

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::git::RepositoryBrowser;

#[derive(Clone)]
pub struct AppState {
    pub repo_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(repo_path: PathBuf) -> Self {
        Self {
            repo_path: Arc::new(repo_path),
        }
    }

    pub async fn browse<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&RepositoryBrowser) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let repo_path = Arc::clone(&self.repo_path);
        tokio::task::spawn_blocking(move || RepositoryBrowser::session(repo_path.as_path(), f))
            .await
            .map_err(|e| AppError::Internal(format!("Browse task failed: {e}")))?
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(repository::routes(state.clone()))
        .merge(branches::routes(state.clone()))
        .merge(commits::routes(state.clone()))
        .merge(tree::routes(state))
}
