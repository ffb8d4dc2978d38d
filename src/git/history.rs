use git2::{Commit, Sort};
use std::time::Instant;

use crate::error::Result;
use crate::git::repository::{authored_date, format_relative_time, RepositoryBrowser};
use crate::models::{AuthorInfo, CommitDetail, CommitHistory};

/// Direction of an ancestry walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Every commit before all of its ancestors; unrelated commits by
    /// committer time, newest first.
    NewestFirst,
    /// Exact reverse of `NewestFirst`.
    OldestFirst,
}

impl RepositoryBrowser {
    /// All commits reachable from `start` through parent links, `start`
    /// included, each exactly once.
    pub fn ancestors(&self, start: &Commit<'_>, order: Order) -> Result<Vec<Commit<'_>>> {
        let started = Instant::now();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start.id())?;

        let mut commits = Vec::new();
        for oid in revwalk {
            commits.push(self.repo.find_commit(oid?)?);
        }

        if order == Order::OldestFirst {
            commits.reverse();
        }

        tracing::info!(
            "Walked {} ancestors of {} in {:?}",
            commits.len(),
            start.id(),
            started.elapsed()
        );
        Ok(commits)
    }

    /// History reachable from `name`, newest first. An unresolvable name
    /// yields an empty history.
    pub fn get_commits(&self, name: Option<&str>) -> Result<CommitHistory> {
        let Some(resolved) = self.resolve(name)? else {
            return Ok(CommitHistory {
                branch: None,
                commits: Vec::new(),
            });
        };

        let commits = self
            .ancestors(&resolved.commit, Order::NewestFirst)?
            .iter()
            .map(commit_to_detail)
            .collect();

        Ok(CommitHistory {
            branch: resolved.branch,
            commits,
        })
    }

    /// A single commit by full object id, with its change summary.
    pub fn get_commit_detail(&self, id: &str) -> Result<Option<CommitDetail>> {
        let Some(commit) = self.commit_by_id(id)? else {
            return Ok(None);
        };

        let mut detail = commit_to_detail(&commit);
        detail.changes = Some(self.summarize_changes(&commit)?);
        Ok(Some(detail))
    }
}

pub fn commit_to_detail(commit: &Commit<'_>) -> CommitDetail {
    let author = commit.author();
    let timestamp = author.when().seconds();

    CommitDetail {
        oid: commit.id().to_string(),
        message: commit.summary().unwrap_or("").trim().to_string(),
        author: AuthorInfo {
            name: author.name().unwrap_or("Unknown").to_string(),
            email: author.email().unwrap_or("").to_string(),
        },
        date: authored_date(commit),
        timestamp,
        relative_time: format_relative_time(timestamp),
        tree_id: commit.tree_id().to_string(),
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        changes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{Fixture, T0};
    use crate::models::DiffStatus;
    use git2::Oid;
    use std::collections::HashSet;

    fn ids(commits: &[Commit<'_>]) -> Vec<Oid> {
        commits.iter().map(|c| c.id()).collect()
    }

    fn walk(fx: &Fixture, start: Oid, order: Order) -> Vec<Oid> {
        let browser = fx.browser();
        let commit = browser.repo.find_commit(start).unwrap();
        let walked = browser.ancestors(&commit, order).unwrap();
        ids(&walked)
    }

    #[test]
    fn test_linear_history_orders() {
        let fx = Fixture::new();
        let a = fx.commit(&[("a.txt", "1")], "A", &[], T0);
        let b = fx.commit(&[("a.txt", "2")], "B", &[a], T0 + 10);
        let c = fx.commit(&[("a.txt", "3")], "C", &[b], T0 + 20);

        assert_eq!(walk(&fx, c, Order::NewestFirst), vec![c, b, a]);
        assert_eq!(walk(&fx, c, Order::OldestFirst), vec![a, b, c]);
    }

    #[test]
    fn test_merge_visited_once_and_parents_follow_children() {
        let fx = Fixture::new();
        let a = fx.commit(&[("a.txt", "1")], "A", &[], T0);
        let b1 = fx.commit(&[("a.txt", "1"), ("b1.txt", "x")], "B1", &[a], T0 + 10);
        let b2 = fx.commit(&[("a.txt", "1"), ("b2.txt", "y")], "B2", &[a], T0 + 20);
        let m = fx.commit(
            &[("a.txt", "1"), ("b1.txt", "x"), ("b2.txt", "y")],
            "M",
            &[b1, b2],
            T0 + 30,
        );

        let newest = walk(&fx, m, Order::NewestFirst);
        assert_eq!(newest, vec![m, b2, b1, a]);

        let unique: HashSet<Oid> = newest.iter().copied().collect();
        assert_eq!(unique.len(), newest.len());

        let mut oldest = walk(&fx, m, Order::OldestFirst);
        oldest.reverse();
        assert_eq!(oldest, newest);
    }

    #[test]
    fn test_topology_beats_timestamps() {
        let fx = Fixture::new();
        // Child authored before its parent (clock skew)
        let a = fx.commit(&[("a.txt", "1")], "A", &[], T0 + 100);
        let b = fx.commit(&[("a.txt", "2")], "B", &[a], T0);

        assert_eq!(walk(&fx, b, Order::NewestFirst), vec![b, a]);
    }

    #[test]
    fn test_unrelated_commits_ordered_by_committer_time() {
        let fx = Fixture::new();
        let seed = fx.commit(&[("a.txt", "1")], "seed", &[], T0);
        let tree = fx.repo.find_tree(fx.tree_of(seed)).unwrap();
        let sig = |t: i64| {
            git2::Signature::new("Test User", "test@example.com", &git2::Time::new(t, 0)).unwrap()
        };

        // Author and committer times disagree on which side is newer
        let x = fx.repo.commit(None, &sig(T0 + 100), &sig(T0 + 10), "X", &tree, &[]).unwrap();
        let y = fx.repo.commit(None, &sig(T0 + 10), &sig(T0 + 100), "Y", &tree, &[]).unwrap();
        let m = fx.commit(&[("a.txt", "1")], "M", &[x, y], T0 + 200);

        assert_eq!(walk(&fx, m, Order::NewestFirst), vec![m, y, x]);
    }

    #[test]
    fn test_ancestors_exclude_descendants_and_unrelated_history() {
        let fx = Fixture::new();
        let a = fx.commit(&[("a.txt", "1")], "A", &[], T0);
        let b = fx.commit(&[("a.txt", "2")], "B", &[a], T0 + 10);
        let _c = fx.commit(&[("a.txt", "3")], "C", &[b], T0 + 20);
        let orphan = fx.commit(&[("o.txt", "o")], "orphan", &[], T0 + 30);

        assert_eq!(walk(&fx, b, Order::OldestFirst), vec![a, b]);
        assert_eq!(walk(&fx, orphan, Order::OldestFirst), vec![orphan]);
    }

    #[test]
    fn test_ancestors_idempotent() {
        let fx = Fixture::new();
        let a = fx.commit(&[("a.txt", "1")], "A", &[], T0);
        let b = fx.commit(&[("b.txt", "1")], "B", &[a], T0 + 10);

        assert_eq!(walk(&fx, b, Order::NewestFirst), walk(&fx, b, Order::NewestFirst));
    }

    #[test]
    fn test_get_commits_by_branch() {
        let fx = Fixture::new();
        let a = fx.commit(&[("a.txt", "1")], "first\n\nlonger body", &[], T0);
        let b = fx.commit(&[("a.txt", "2")], "second", &[a], T0 + 10);

        let history = fx.browser().get_commits(Some("main")).unwrap();
        assert_eq!(history.branch.as_deref(), Some("main"));
        let oids: Vec<String> = history.commits.iter().map(|c| c.oid.clone()).collect();
        assert_eq!(oids, vec![b.to_string(), a.to_string()]);

        let root = &history.commits[1];
        assert_eq!(root.message, "first");
        assert_eq!(root.author.email, "test@example.com");
        assert_eq!(root.timestamp, T0);
        assert!(root.parents.is_empty());
        assert_eq!(history.commits[0].parents, vec![a.to_string()]);
        assert!(root.changes.is_none());
    }

    #[test]
    fn test_get_commits_unknown_name_is_empty() {
        let fx = Fixture::new();
        fx.commit(&[("a.txt", "1")], "A", &[], T0);

        let history = fx.browser().get_commits(Some("nope")).unwrap();
        assert!(history.commits.is_empty());
        assert!(history.branch.is_none());
    }

    #[test]
    fn test_get_commit_detail_includes_changes() {
        let fx = Fixture::new();
        let a = fx.commit(&[("a.txt", "1")], "A", &[], T0);
        let b = fx.commit(&[("a.txt", "2"), ("new.txt", "n")], "B", &[a], T0 + 10);

        let detail = fx.browser().get_commit_detail(&b.to_string()).unwrap().unwrap();
        let changes = detail.changes.unwrap();
        let statuses: Vec<(&str, DiffStatus)> =
            changes.iter().map(|c| (c.path.as_str(), c.status)).collect();
        assert_eq!(
            statuses,
            vec![("a.txt", DiffStatus::Modified), ("new.txt", DiffStatus::Added)]
        );

        assert!(fx.browser().get_commit_detail(&"f".repeat(40)).unwrap().is_none());
        assert!(fx.browser().get_commit_detail("not-an-id").unwrap().is_none());
    }
}
