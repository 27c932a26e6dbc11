//! Version-control backend interface and the typed records it returns.
//!
//! Everything past this boundary works with these records; raw git2 objects
//! never leave the backend implementation.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::GitError;

/// Which pending changes a diff is computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffScope {
    /// HEAD tree against the index (`git diff --staged`).
    Staged,
    /// Index against the working directory (`git diff`).
    WorkingTree,
    /// Tree of `from` against tree of `to` (`git diff from..to`).
    Range { from: String, to: String },
}

impl DiffScope {
    /// Build a range scope from `from..to`.
    pub fn range(from: impl Into<String>, to: impl Into<String>) -> Self {
        DiffScope::Range {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for DiffScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffScope::Staged => write!(f, "staged"),
            DiffScope::WorkingTree => write!(f, "working-tree"),
            DiffScope::Range { from, to } => write!(f, "{from}..{to}"),
        }
    }
}

/// One path from `status()`, with porcelain-style letters for index and worktree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    /// `M`, `A`, `D`, `R`, `T`, `?` or `' '` when the index is unchanged.
    pub index: char,
    /// `M`, `D`, `R`, `T`, `?` or `' '` when the worktree is unchanged.
    pub working_dir: char,
}

impl StatusEntry {
    /// The letter that classifies this entry: the index letter when set,
    /// otherwise the worktree letter.
    pub fn letter(&self) -> char {
        if self.index != ' ' {
            self.index
        } else {
            self.working_dir
        }
    }
}

/// Numstat line for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: String,
    pub insertions: u32,
    pub deletions: u32,
    /// Delta status letter reported by the diff itself (`M`, `A`, `D`, `R`, ...).
    pub status: char,
}

/// Aggregate diff statistics (`git diff --stat` equivalent).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files: Vec<FileStat>,
    pub insertions: u32,
    pub deletions: u32,
    /// Number of files changed.
    pub changed: usize,
}

impl DiffSummary {
    /// Build a summary whose totals are derived from `files`.
    pub fn from_files(files: Vec<FileStat>) -> Self {
        let insertions = files.iter().fold(0u32, |acc, f| acc.saturating_add(f.insertions));
        let deletions = files.iter().fold(0u32, |acc, f| acc.saturating_add(f.deletions));
        let changed = files.len();
        Self {
            files,
            insertions,
            deletions,
            changed,
        }
    }

    /// Find the numstat entry for a path.
    pub fn find(&self, path: &str) -> Option<&FileStat> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A commit as shown in push/review/PR flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// First 7 hex characters of the commit id.
    pub short_id: String,
    /// First line of the commit message.
    pub subject: String,
    pub author: String,
    pub date: NaiveDate,
}

/// Result of `log(range)`: commits newest-first, as the backend walks them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    pub total: usize,
    pub commits: Vec<CommitRecord>,
}

impl CommitLog {
    pub fn new(commits: Vec<CommitRecord>) -> Self {
        Self {
            total: commits.len(),
            commits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Commits oldest-first, so that commit #1 is the oldest pending commit.
    pub fn chronological(&self) -> Vec<CommitRecord> {
        self.commits.iter().rev().cloned().collect()
    }
}

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub fetch_url: Option<String>,
    pub push_url: Option<String>,
}

impl RemoteInfo {
    /// URL used for pushing, falling back to the fetch URL.
    pub fn url(&self) -> Option<&str> {
        self.push_url.as_deref().or(self.fetch_url.as_deref())
    }
}

/// Porcelain-level operations the pipeline needs from version control.
///
/// This abstraction allows mocking the repository in orchestrator tests.
#[cfg_attr(test, mockall::automock)]
pub trait GitBackend {
    /// Whether the working directory is inside a git repository.
    fn is_repository(&self) -> bool;

    /// Root of the working tree.
    fn workdir(&self) -> Result<PathBuf, GitError>;

    /// Changed, staged and untracked paths.
    fn status(&self) -> Result<Vec<StatusEntry>, GitError>;

    /// Unified diff text for a scope (possibly empty).
    fn diff(&self, scope: &DiffScope) -> Result<String, GitError>;

    /// Per-file numstat and totals for a scope.
    fn diff_summary(&self, scope: &DiffScope) -> Result<DiffSummary, GitError>;

    /// Commits in `range` (e.g. `origin/main..HEAD`), newest first.
    fn log(&self, range: &str) -> Result<CommitLog, GitError>;

    fn remotes(&self) -> Result<Vec<RemoteInfo>, GitError>;

    /// Resolve a revision to a full commit id.
    fn rev_parse(&self, spec: &str) -> Result<String, GitError>;

    /// Short name of the checked-out branch (`rev-parse --abbrev-ref HEAD`).
    fn current_branch(&self) -> Result<String, GitError>;

    /// Stage paths matching `pathspec`, including deletions.
    fn add(&self, pathspec: &str) -> Result<(), GitError>;

    /// Commit the index on HEAD. Returns the new commit's short id.
    fn commit(&self, message: &str) -> Result<String, GitError>;

    /// Push the current branch with optional extra arguments.
    fn push(&self, args: &[String]) -> Result<(), GitError>;
}
