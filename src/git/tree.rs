//! Directory listings with per-entry attribution.
//!
//! Each entry of the listed tree is attributed to the chronologically
//! earliest ancestor whose tree holds the same object id at the same path.
//! This is a content-equality heuristic, not per-entry history: an entry
//! whose content reverts to an earlier state is attributed to the commit
//! that first introduced that content, not to the commit that reverted it.

use git2::{Commit, ObjectType, Oid, Tree};
use std::path::Path;
use std::time::Instant;

use crate::error::{AppError, Result};
use crate::git::history::Order;
use crate::git::refs::is_miss;
use crate::git::repository::{commit_to_info, RepositoryBrowser};
use crate::models::{AttributedEntry, EntryKind, TreeListing};

/// Entry of the listed tree awaiting attribution.
struct Pending {
    name: String,
    /// Stored name; `name` is its lossy display form.
    raw_name: Vec<u8>,
    path: String,
    kind: EntryKind,
    id: Oid,
}

/// Join non-empty `/`-separated segments, so leading, trailing and doubled
/// slashes are ignored.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn entry_kind(entry: &git2::TreeEntry<'_>) -> Option<EntryKind> {
    match entry.kind() {
        Some(ObjectType::Blob) => Some(EntryKind::File),
        Some(ObjectType::Tree) => Some(EntryKind::Directory),
        _ => None,
    }
}

impl RepositoryBrowser {
    /// One level of the tree at `name` under `path`, each entry attributed.
    /// Unresolvable names and paths that are not directories give an empty
    /// listing.
    pub fn browse_tree(&self, name: Option<&str>, path: Option<&str>) -> Result<TreeListing> {
        let path = normalize_path(path.unwrap_or(""));
        let mut listing = TreeListing {
            tree_name: name.unwrap_or_default().to_string(),
            branch: None,
            path: path.clone(),
            entries: Vec::new(),
        };

        let Some(resolved) = self.resolve(name)? else {
            return Ok(listing);
        };
        listing.tree_name = resolved.label(name);
        listing.branch = resolved.branch.clone();

        let Some(target) = self.subtree_at(resolved.commit.tree()?, &path)? else {
            tracing::debug!("'{}' is not a directory at {}", path, resolved.commit.id());
            return Ok(listing);
        };

        let pending = collect_entries(&target, &path);
        if pending.is_empty() {
            return Ok(listing);
        }

        let started = Instant::now();
        let ancestors = self.ancestors(&resolved.commit, Order::OldestFirst)?;
        let found = self.attribute(&ancestors, &path, target.id(), &pending)?;

        listing.entries = pending
            .into_iter()
            .zip(found)
            .map(|(entry, slot)| {
                let commit = slot.map(|idx| &ancestors[idx]).unwrap_or(&resolved.commit);
                AttributedEntry {
                    name: entry.name,
                    path: entry.path,
                    kind: entry.kind,
                    tree_name: listing.tree_name.clone(),
                    last_commit: commit_to_info(commit),
                }
            })
            .collect();

        tracing::info!(
            "Attributed {} entries under '{}' over {} ancestors in {:?}",
            listing.entries.len(),
            path,
            ancestors.len(),
            started.elapsed()
        );
        Ok(listing)
    }

    /// For each pending entry, the index of the first ancestor (oldest-first)
    /// holding the same object id at the entry's path.
    ///
    /// Single pass over the ancestry: each candidate's directory at `base` is
    /// looked up once and checked against every still-unattributed entry.
    /// If the candidate's directory has the listed tree's id, every remaining
    /// entry matches there.
    fn attribute(
        &self,
        ancestors: &[Commit<'_>],
        base: &str,
        target_tree: Oid,
        pending: &[Pending],
    ) -> Result<Vec<Option<usize>>> {
        let mut found: Vec<Option<usize>> = vec![None; pending.len()];
        let mut remaining = pending.len();

        for (idx, candidate) in ancestors.iter().enumerate() {
            if remaining == 0 {
                break;
            }

            let Some(dir) = self.subtree_at(candidate.tree()?, base)? else {
                continue;
            };

            if dir.id() == target_tree {
                for slot in found.iter_mut().filter(|slot| slot.is_none()) {
                    *slot = Some(idx);
                }
                break;
            }

            for (slot, entry) in found.iter_mut().zip(pending) {
                if slot.is_some() {
                    continue;
                }
                if dir.get_name_bytes(&entry.raw_name).is_some_and(|e| e.id() == entry.id) {
                    *slot = Some(idx);
                    remaining -= 1;
                }
            }
        }

        Ok(found)
    }

    /// The tree at `path` below `root`; `None` when the path is missing or
    /// names something other than a directory.
    pub(crate) fn subtree_at<'r>(&'r self, root: Tree<'r>, path: &str) -> Result<Option<Tree<'r>>> {
        if path.is_empty() {
            return Ok(Some(root));
        }

        let entry = match root.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if is_miss(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if entry.kind() != Some(ObjectType::Tree) {
            return Ok(None);
        }

        entry
            .to_object(&self.repo)?
            .into_tree()
            .map(Some)
            .map_err(|obj| {
                AppError::InvariantViolation(format!(
                    "{} is listed as a tree but is {:?}",
                    path,
                    obj.kind()
                ))
            })
    }
}

fn collect_entries(tree: &Tree<'_>, base: &str) -> Vec<Pending> {
    let mut pending = Vec::new();

    for entry in tree.iter() {
        let name = String::from_utf8_lossy(entry.name_bytes()).to_string();
        let Some(kind) = entry_kind(&entry) else {
            tracing::warn!("Skipping unsupported entry '{}' ({:?})", name, entry.kind());
            continue;
        };
        let path = if base.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", base, name)
        };

        pending.push(Pending {
            name,
            raw_name: entry.name_bytes().to_vec(),
            path,
            kind,
            id: entry.id(),
        });
    }

    pending
}
