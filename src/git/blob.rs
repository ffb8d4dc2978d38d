use git2::{Blob, Commit, ObjectType};

use crate::error::{AppError, Result};
use crate::git::repository::{commit_to_info, RepositoryBrowser};
use crate::models::BlobContent;

impl RepositoryBrowser {
    /// File content at `path` in the commit `name` resolves to. The metadata
    /// is that of the resolved commit itself, with its full message; no
    /// ancestry search is made.
    pub fn browse_blob(&self, name: Option<&str>, path: &str) -> Result<Option<BlobContent>> {
        let Some(resolved) = self.resolve(name)? else {
            return Ok(None);
        };
        let Some(blob) = self.locate(&resolved.commit, path)? else {
            tracing::debug!("No file '{}' at {}", path, resolved.commit.id());
            return Ok(None);
        };

        let segments = path_segments(path);
        let file_name = segments.last().copied().unwrap_or_default().to_string();

        let mut commit = commit_to_info(&resolved.commit);
        commit.message = resolved
            .commit
            .message()
            .unwrap_or("")
            .trim_end()
            .to_string();

        let data = blob.content().to_vec();
        let is_binary = blob.is_binary();
        let text = if is_binary {
            None
        } else {
            String::from_utf8(data.clone()).ok()
        };

        Ok(Some(BlobContent {
            name: file_name,
            path: segments.join("/"),
            tree_name: resolved.label(name),
            branch: resolved.branch,
            commit,
            size: data.len(),
            is_binary,
            text,
            data,
        }))
    }

    /// Walk `path` from the commit's root tree. Every segment but the last
    /// must name a directory, the last must name a file; names match exactly.
    pub fn locate<'r>(&'r self, commit: &Commit<'r>, path: &str) -> Result<Option<Blob<'r>>> {
        let segments = path_segments(path);
        let Some((file_name, dirs)) = segments.split_last() else {
            return Ok(None);
        };

        let mut tree = commit.tree()?;
        for dir in dirs {
            let next = {
                let Some(entry) = tree
                    .iter()
                    .find(|e| e.kind() == Some(ObjectType::Tree) && e.name_bytes() == dir.as_bytes())
                else {
                    return Ok(None);
                };
                entry.to_object(&self.repo)?
            };
            tree = next.into_tree().map_err(|obj| {
                AppError::InvariantViolation(format!("{} is listed as a tree but is {:?}", dir, obj.kind()))
            })?;
        }

        let object = {
            let Some(entry) = tree.iter().find(|e| {
                e.kind() == Some(ObjectType::Blob) && e.name_bytes() == file_name.as_bytes()
            }) else {
                return Ok(None);
            };
            entry.to_object(&self.repo)?
        };

        object.into_blob().map(Some).map_err(|obj| {
            AppError::InvariantViolation(format!(
                "{} is listed as a file but is {:?}",
                file_name,
                obj.kind()
            ))
        })
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
