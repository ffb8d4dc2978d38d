//! Data transfer objects (DTOs) produced by the browsing core.
//!
//! These structs are derived per request and serialized to JSON.
//! - `tree`: AttributedEntry, TreeListing, BlobContent, CommitInfo, RepositoryInfo
//! - `commit`: CommitDetail, CommitHistory, CommitListResponse, AuthorInfo
//! - `diff`: ChangeRecord, DiffStatus

pub mod commit;
pub mod diff;
pub mod tree;

pub use commit::*;
pub use diff::*;
pub use tree::*;
