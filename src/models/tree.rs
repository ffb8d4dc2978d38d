//! Tree and repository-related DTOs.
//!
//! - `AttributedEntry`: One file/directory in a listing with the commit that
//!   produced its content
//! - `TreeListing`: A non-recursive directory listing at some reference
//! - `BlobContent`: A single file's bytes at some reference
//! - `CommitInfo`: Attribution commit summary
//! - `RepositoryInfo`: Repo metadata (header display)

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributedEntry {
    pub name: String,
    /// Forward-slash separated path from the repository root
    pub path: String,
    pub kind: EntryKind,
    /// Branch name if the reference resolved through one, else the name asked for
    pub tree_name: String,
    pub last_commit: CommitInfo,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeListing {
    pub tree_name: String,
    pub branch: Option<String>,
    pub path: String,
    pub entries: Vec<AttributedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub oid: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub timestamp: i64,
    pub relative_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlobContent {
    pub name: String,
    pub path: String,
    pub tree_name: String,
    pub branch: Option<String>,
    /// The requested commit; the message is the full message
    pub commit: CommitInfo,
    pub size: usize,
    pub is_binary: bool,
    /// UTF-8 text of the blob, absent for binary content
    pub text: Option<String>,
    #[serde(skip)]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub path: String,
    pub head_branch: Option<String>,
    pub head_commit: Option<CommitInfo>,
    pub is_bare: bool,
    pub is_empty: bool,
}
