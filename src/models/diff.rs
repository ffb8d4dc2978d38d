//! Change summary DTOs.
//!
//! - `ChangeRecord`: one changed path with its status
//! - `DiffStatus`: status classification relayed from libgit2
//!
//! Used by: commit detail responses

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    pub status: DiffStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    TypeChanged,
    Unmodified,
    Ignored,
    Untracked,
    Unreadable,
    Conflicted,
}

impl From<git2::Delta> for DiffStatus {
    fn from(delta: git2::Delta) -> Self {
        match delta {
            git2::Delta::Added => DiffStatus::Added,
            git2::Delta::Deleted => DiffStatus::Deleted,
            git2::Delta::Modified => DiffStatus::Modified,
            git2::Delta::Renamed => DiffStatus::Renamed,
            git2::Delta::Copied => DiffStatus::Copied,
            git2::Delta::Typechange => DiffStatus::TypeChanged,
            git2::Delta::Unmodified => DiffStatus::Unmodified,
            git2::Delta::Ignored => DiffStatus::Ignored,
            git2::Delta::Untracked => DiffStatus::Untracked,
            git2::Delta::Unreadable => DiffStatus::Unreadable,
            git2::Delta::Conflicted => DiffStatus::Conflicted,
        }
    }
}
