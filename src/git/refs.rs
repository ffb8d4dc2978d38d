//! Reference resolution: turns a caller-supplied name into a starting commit.
//!
//! Lookup order: empty name → HEAD, then branches (local before
//! remote-tracking), then tags, then a literal full object id. A name that
//! matches nothing is not an error; callers get `None` and treat it as an
//! empty result.

use git2::{BranchType, Commit, ErrorCode, Oid, Reference};

use crate::error::Result;
use crate::git::repository::RepositoryBrowser;

/// A starting commit plus the branch it was reached through, if any.
pub struct ResolvedRef<'r> {
    pub commit: Commit<'r>,
    pub branch: Option<String>,
}

impl ResolvedRef<'_> {
    /// Label shown next to listings: the branch name when there is one,
    /// otherwise whatever name the caller asked for.
    pub fn label(&self, name: Option<&str>) -> String {
        self.branch
            .clone()
            .unwrap_or_else(|| name.unwrap_or_default().to_string())
    }
}

/// Errors that mean "no such thing" rather than a broken store.
pub(crate) fn is_miss(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::UnbornBranch
    )
}

fn is_full_object_id(name: &str) -> bool {
    name.len() == 40 && name.bytes().all(|b| b.is_ascii_hexdigit())
}

impl RepositoryBrowser {
    pub fn resolve(&self, name: Option<&str>) -> Result<Option<ResolvedRef<'_>>> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return self.resolve_head(),
        };

        if let Some(commit) = self.branch_tip(name)? {
            tracing::debug!("Resolved '{}' as branch {}", name, commit.id());
            return Ok(Some(ResolvedRef {
                commit,
                branch: Some(name.to_string()),
            }));
        }

        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => {
                let commit = self.peel_tag(name, reference)?;
                return Ok(commit.map(|commit| ResolvedRef { commit, branch: None }));
            }
            Err(e) if is_miss(&e) => {}
            Err(e) => return Err(e.into()),
        }

        let commit = if is_full_object_id(name) {
            self.commit_by_id(name)?
        } else {
            None
        };
        if commit.is_none() {
            tracing::debug!("No branch, tag or commit named '{}'", name);
        }
        Ok(commit.map(|commit| ResolvedRef { commit, branch: None }))
    }

    /// Exact lookup of a full object id among commits. Ids of other object
    /// kinds, malformed ids and unknown ids are all `None`.
    pub fn commit_by_id(&self, id: &str) -> Result<Option<Commit<'_>>> {
        let Ok(oid) = Oid::from_str(id) else {
            return Ok(None);
        };
        if !is_full_object_id(id) {
            return Ok(None);
        }

        match self.repo.find_object(oid, None) {
            Ok(obj) => Ok(obj.into_commit().ok()),
            Err(e) if is_miss(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_head(&self) -> Result<Option<ResolvedRef<'_>>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if is_miss(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let branch = if head.is_branch() {
            head.shorthand().map(|s| s.to_string())
        } else {
            None
        };
        let commit = head.peel_to_commit()?;
        Ok(Some(ResolvedRef { commit, branch }))
    }

    fn branch_tip(&self, name: &str) -> Result<Option<Commit<'_>>> {
        for kind in [BranchType::Local, BranchType::Remote] {
            match self.repo.find_branch(name, kind) {
                Ok(branch) => return Ok(Some(branch.get().peel_to_commit()?)),
                Err(e) if is_miss(&e) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }

    /// Follow a tag to its commit: lightweight tags point straight at the
    /// target, annotated tags through one tag object. Anything that does not
    /// end at a commit is `None`.
    fn peel_tag(&self, name: &str, reference: Reference<'_>) -> Result<Option<Commit<'_>>> {
        let Some(oid) = reference.resolve()?.target() else {
            return Ok(None);
        };

        let obj = self.repo.find_object(oid, None)?;
        let target = match obj.into_tag() {
            Ok(tag) => tag.target()?,
            Err(obj) => obj,
        };

        match target.into_commit() {
            Ok(commit) => Ok(Some(commit)),
            Err(other) => {
                tracing::debug!("Tag '{}' points at {:?}, not a commit", name, other.kind());
                Ok(None)
            }
        }
    }
}
