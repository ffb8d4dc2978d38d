//! Fixture repositories for the browsing tests.
//!
//! Trees are written directly with `treebuilder` and commits carry explicit
//! timestamps, so history shape and ordering are fully deterministic.

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use crate::git::RepositoryBrowser;

pub const T0: i64 = 1_700_000_000;

/// libgit2's object validation switch is process-global.
static STRICT_OBJECTS: Mutex<()> = Mutex::new(());

/// Run `f` with object validation off, so trees and refs may point at
/// missing or mismatched objects.
pub fn without_object_validation<T>(f: impl FnOnce() -> T) -> T {
    let _guard = STRICT_OBJECTS.lock().unwrap_or_else(|e| e.into_inner());
    git2::opts::strict_object_creation(false);
    let out = f();
    git2::opts::strict_object_creation(true);
    out
}

pub struct Fixture {
    pub repo: Repository,
    dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self { repo, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn browser(&self) -> RepositoryBrowser {
        RepositoryBrowser::open(self.path()).unwrap()
    }

    /// Commit a full snapshot of `files` and move `main` to it.
    pub fn commit(&self, files: &[(&str, &str)], message: &str, parents: &[Oid], time: i64) -> Oid {
        let tree_id = write_tree(&self.repo, files);
        self.commit_tree(tree_id, message, parents, time)
    }

    /// Commit an already written tree and move `main` to it.
    pub fn commit_tree(&self, tree_id: Oid, message: &str, parents: &[Oid], time: i64) -> Oid {
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap();
        let parents: Vec<git2::Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).unwrap())
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        let oid = self
            .repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .unwrap();
        self.repo
            .reference("refs/heads/main", oid, true, "fixture commit")
            .unwrap();
        oid
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, true).unwrap();
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let obj = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &obj, true).unwrap();
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let obj = self.repo.find_object(target, None).unwrap();
        let sig = Signature::new("Tagger", "tagger@example.com", &Time::new(T0, 0)).unwrap();
        self.repo.tag(name, &obj, &sig, "release", true).unwrap();
    }

    /// Write a single-level tree from raw `(name, object, filemode)` entries.
    pub fn raw_tree(&self, entries: &[(&[u8], Oid, i32)]) -> Oid {
        let mut builder = self.repo.treebuilder(None).unwrap();
        for &(name, id, mode) in entries {
            builder.insert(name.to_vec(), id, mode).unwrap();
        }
        builder.write().unwrap()
    }

    pub fn tree_of(&self, commit: Oid) -> Oid {
        self.repo.find_commit(commit).unwrap().tree_id()
    }
}

fn write_tree<'a>(repo: &Repository, files: &[(&'a str, &'a str)]) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    let mut dirs: BTreeMap<&'a str, Vec<(&'a str, &'a str)>> = BTreeMap::new();

    for &(path, content) in files {
        match path.split_once('/') {
            Some((dir, rest)) => dirs.entry(dir).or_default().push((rest, content)),
            None => {
                let blob = repo.blob(content.as_bytes()).unwrap();
                builder.insert(path, blob, 0o100644).unwrap();
            }
        }
    }

    for (dir, children) in dirs {
        let subtree = write_tree(repo, &children);
        builder.insert(dir, subtree, 0o040000).unwrap();
    }

    builder.write().unwrap()
}
