//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};
use gromit::Git2Backend;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory, with a local
    /// identity so commits made through the backend succeed.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Backend rooted at this repository.
    pub fn backend(&self) -> Git2Backend {
        Git2Backend::new(self.dir.path())
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `content` to `path` relative to the repository root.
    pub fn write_file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(full, content).expect("Failed to write file");
    }

    /// Add `path` to the index.
    pub fn stage(&self, path: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Write, stage and commit a single file.
    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> Oid {
        self.write_file(path, content);
        self.stage(path);
        self.commit_index(message)
    }

    /// Add an `origin` remote with the given URL.
    pub fn add_origin(&self, url: &str) {
        self.repo
            .remote("origin", url)
            .expect("Failed to add origin remote");
    }

    /// Point `refs/remotes/origin/<branch>` at `oid`, as a fetch would.
    pub fn set_remote_branch(&self, branch: &str, oid: Oid) {
        self.repo
            .reference(
                &format!("refs/remotes/origin/{}", branch),
                oid,
                true,
                "test remote branch",
            )
            .expect("Failed to create remote ref");
    }

    /// Name of the branch HEAD points at.
    pub fn head_branch(&self) -> String {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .shorthand()
            .expect("Branch name is not UTF-8")
            .to_string()
    }
}
