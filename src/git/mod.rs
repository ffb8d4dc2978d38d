//! Read-only browsing core over a git object store.
//!
//! - `repository`: session handle, branch names, repository info
//! - `refs`: name → starting commit resolution
//! - `history`: ancestry walks, history and commit detail
//! - `tree`: directory listings with per-entry attribution
//! - `diff`: change summary against the first parent
//! - `blob`: single file lookup by path

pub mod blob;
pub mod diff;
pub mod history;
pub mod refs;
pub mod repository;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use repository::RepositoryBrowser;
