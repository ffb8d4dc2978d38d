use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::ChangeRecord;

/// One commit of a history listing, optionally with its change summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub oid: String,
    /// First line of the commit message
    pub message: String,
    pub author: AuthorInfo,
    pub date: DateTime<FixedOffset>,
    pub timestamp: i64,
    pub relative_time: String,
    pub tree_id: String,
    pub parents: Vec<String>,
    /// Only filled for single-commit detail requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<ChangeRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

/// History reachable from a resolved reference, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHistory {
    pub branch: Option<String>,
    pub commits: Vec<CommitDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitListResponse {
    pub branch: Option<String>,
    pub commits: Vec<CommitDetail>,
    pub total: usize,
    pub has_more: bool,
}
