//! Browsing session over one repository.
//!
//! A `RepositoryBrowser` owns the libgit2 handle for the duration of one
//! logical session; the handle is released when the browser is dropped, so
//! every exit path (including `?` returns) closes it.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use git2::{BranchType, ErrorCode, Repository};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{CommitInfo, RepositoryInfo};

pub struct RepositoryBrowser {
    pub(crate) repo: Repository,
    pub path: PathBuf,
}

impl RepositoryBrowser {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = Repository::open(&path).map_err(|e| match e.code() {
            ErrorCode::NotFound => AppError::StoreUnavailable(path.display().to_string()),
            _ => AppError::Git(e),
        })?;

        tracing::debug!("Opened repository session: {}", path.display());
        Ok(Self { repo, path })
    }

    /// Open `path`, run `f` against the session and release the handle
    /// whatever `f` returns.
    pub fn session<P, F, T>(path: P, f: F) -> Result<T>
    where
        P: AsRef<Path>,
        F: FnOnce(&RepositoryBrowser) -> Result<T>,
    {
        let browser = Self::open(path)?;
        f(&browser)
    }

    pub fn info(&self) -> Result<RepositoryInfo> {
        let name = self
            .path
            .canonicalize()
            .unwrap_or_else(|_| self.path.clone())
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let head = self.repo.head().ok();
        let head_branch = head
            .as_ref()
            .filter(|h| h.is_branch())
            .and_then(|h| h.shorthand().map(|s| s.to_string()));
        let head_commit = head
            .and_then(|h| h.peel_to_commit().ok())
            .map(|c| commit_to_info(&c));

        Ok(RepositoryInfo {
            name,
            path: self.path.display().to_string(),
            head_branch,
            head_commit,
            is_bare: self.repo.is_bare(),
            is_empty: self.repo.is_empty()?,
        })
    }

    /// Names of all local branches followed by remote-tracking branches.
    pub fn branch_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for kind in [BranchType::Local, BranchType::Remote] {
            let mut group = Vec::new();
            for branch in self.repo.branches(Some(kind))? {
                let (branch, _) = branch?;
                if let Some(name) = branch.name()? {
                    group.push(name.to_string());
                }
            }
            group.sort();
            names.extend(group);
        }

        Ok(names)
    }
}

impl Drop for RepositoryBrowser {
    fn drop(&mut self) {
        tracing::debug!("Closing repository session: {}", self.path.display());
    }
}

pub fn commit_to_info(commit: &git2::Commit) -> CommitInfo {
    let timestamp = commit.author().when().seconds();
    CommitInfo {
        oid: commit.id().to_string(),
        message: commit.summary().unwrap_or("").trim().to_string(),
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        date: authored_date(commit),
        timestamp,
        relative_time: format_relative_time(timestamp),
    }
}

/// Author timestamp in the author's own UTC offset.
pub fn authored_date(commit: &git2::Commit) -> DateTime<FixedOffset> {
    let when = commit.author().when();
    FixedOffset::east_opt(when.offset_minutes() * 60)
        .and_then(|tz| tz.timestamp_opt(when.seconds(), 0).single())
        .unwrap_or_else(|| {
            Utc.timestamp_opt(when.seconds(), 0)
                .single()
                .unwrap_or_default()
                .fixed_offset()
        })
}

pub fn format_relative_time(timestamp: i64) -> String {
    let now = Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}
