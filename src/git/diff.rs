use git2::{Commit, DiffFindOptions};

use crate::error::Result;
use crate::git::repository::RepositoryBrowser;
use crate::models::ChangeRecord;

impl RepositoryBrowser {
    /// Per-path changes of `commit` against its first parent, or against an
    /// empty tree for a root commit. Merge commits are summarized against
    /// their first parent only. Sorted by path.
    pub fn summarize_changes(&self, commit: &Commit<'_>) -> Result<Vec<ChangeRecord>> {
        let tree = commit.tree()?;

        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut find = DiffFindOptions::new();
        find.renames(true).copies(true);
        diff.find_similar(Some(&mut find))?;

        let mut changes: Vec<ChangeRecord> = diff
            .deltas()
            .map(|delta| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                ChangeRecord {
                    path,
                    status: delta.status().into(),
                }
            })
            .collect();

        changes.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(changes)
    }
}
