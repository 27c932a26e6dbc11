//! `GitBackend` implementation over git2.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use git2::{
    Commit, Delta, Diff, DiffFindOptions, DiffFormat, ErrorCode, IndexAddOption, Patch,
    Repository, Sort, Status, StatusOptions, Tree,
};
use tracing::{debug, warn};

use crate::error::GitError;

use super::backend::{
    CommitLog, CommitRecord, DiffScope, DiffSummary, FileStat, GitBackend, RemoteInfo,
    StatusEntry,
};
use super::executor;

/// Repository access rooted at a working directory.
///
/// The repository is discovered on every call, so a backend created outside a
/// repository simply reports `is_repository() == false`.
#[derive(Debug, Clone)]
pub struct Git2Backend {
    path: PathBuf,
}

impl Git2Backend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for the current directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn open(&self) -> Result<Repository, GitError> {
        Repository::discover(&self.path).map_err(|e| {
            debug!("Repository discovery failed at {}: {}", self.path.display(), e);
            GitError::NotARepository
        })
    }
}

impl GitBackend for Git2Backend {
    fn is_repository(&self) -> bool {
        self.open().is_ok()
    }

    fn workdir(&self) -> Result<PathBuf, GitError> {
        let repo = self.open()?;
        repo.workdir()
            .map(Path::to_path_buf)
            .ok_or(GitError::BareRepository)
    }

    fn status(&self) -> Result<Vec<StatusEntry>, GitError> {
        let repo = self.open()?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .renames_head_to_index(true)
            .exclude_submodules(true);

        let statuses = repo.statuses(Some(&mut opts)).map_err(GitError::Status)?;

        let mut entries = Vec::new();
        for entry in statuses.iter() {
            let status = entry.status();
            if status.is_ignored() || status == Status::CURRENT {
                continue;
            }

            let renamed_path = entry
                .head_to_index()
                .and_then(|d| d.new_file().path().map(|p| p.to_string_lossy().to_string()));
            let path = match renamed_path {
                Some(p) if status.is_index_renamed() => p,
                _ => match entry.path() {
                    Some(p) => p.to_string(),
                    None => continue,
                },
            };

            let (index, working_dir) = status_letters(status);
            entries.push(StatusEntry {
                path,
                index,
                working_dir,
            });
        }

        Ok(entries)
    }

    fn diff(&self, scope: &DiffScope) -> Result<String, GitError> {
        let repo = self.open()?;
        let diff = build_diff(&repo, scope)?;
        diff_text(&diff)
    }

    fn diff_summary(&self, scope: &DiffScope) -> Result<DiffSummary, GitError> {
        let repo = self.open()?;
        let diff = build_diff(&repo, scope)?;

        let mut files = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();
            if path.is_empty() {
                continue;
            }

            // Binary files have no line stats.
            let (insertions, deletions) = match Patch::from_diff(&diff, idx) {
                Ok(Some(patch)) => match patch.line_stats() {
                    Ok((_, adds, dels)) => (saturate(adds), saturate(dels)),
                    Err(e) => {
                        warn!("Failed to compute line stats for {}: {}", path, e);
                        (0, 0)
                    }
                },
                Ok(None) => (0, 0),
                Err(e) => return Err(GitError::Diff(e)),
            };

            files.push(FileStat {
                path,
                insertions,
                deletions,
                status: delta_letter(delta.status()),
            });
        }

        Ok(DiffSummary::from_files(files))
    }

    fn log(&self, range: &str) -> Result<CommitLog, GitError> {
        let repo = self.open()?;

        let mut revwalk = repo.revwalk().map_err(GitError::Revwalk)?;
        revwalk
            .set_sorting(Sort::TIME)
            .map_err(GitError::Revwalk)?;
        if range.contains("..") {
            revwalk
                .push_range(range)
                .map_err(|e| GitError::ReferenceNotFound(range.to_string(), e))?;
        } else {
            let oid = repo
                .revparse_single(range)
                .map_err(|e| GitError::ReferenceNotFound(range.to_string(), e))?
                .id();
            revwalk.push(oid).map_err(GitError::Revwalk)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(GitError::Revwalk)?;
            let commit = repo.find_commit(oid).map_err(GitError::Revwalk)?;
            commits.push(commit_record(&commit));
        }

        Ok(CommitLog::new(commits))
    }

    fn remotes(&self) -> Result<Vec<RemoteInfo>, GitError> {
        let repo = self.open()?;
        let names = repo.remotes().map_err(GitError::Remote)?;

        let mut remotes = Vec::new();
        for name in names.iter().flatten() {
            let remote = repo.find_remote(name).map_err(GitError::Remote)?;
            remotes.push(RemoteInfo {
                name: name.to_string(),
                fetch_url: remote.url().map(String::from),
                push_url: remote.pushurl().map(String::from),
            });
        }

        Ok(remotes)
    }

    fn rev_parse(&self, spec: &str) -> Result<String, GitError> {
        let repo = self.open()?;
        let object = repo
            .revparse_single(spec)
            .map_err(|e| GitError::ReferenceNotFound(spec.to_string(), e))?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::ReferenceNotFound(spec.to_string(), e))?;
        Ok(commit.id().to_string())
    }

    fn current_branch(&self) -> Result<String, GitError> {
        let repo = self.open()?;
        match repo.head() {
            Ok(head) => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            // Unborn branch: HEAD points at a ref that has no commit yet.
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = repo
                    .find_reference("HEAD")
                    .map_err(|e| GitError::ReferenceNotFound("HEAD".to_string(), e))?;
                Ok(head
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .unwrap_or("HEAD")
                    .to_string())
            }
            Err(e) => Err(GitError::ReferenceNotFound("HEAD".to_string(), e)),
        }
    }

    fn add(&self, pathspec: &str) -> Result<(), GitError> {
        let repo = self.open()?;
        let mut index = repo.index().map_err(GitError::StagingFailed)?;
        index
            .add_all([pathspec].iter(), IndexAddOption::DEFAULT, None)
            .map_err(GitError::StagingFailed)?;
        // add_all does not record deletions; update_all does.
        index
            .update_all([pathspec].iter(), None)
            .map_err(GitError::StagingFailed)?;
        index.write().map_err(GitError::StagingFailed)?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String, GitError> {
        let repo = self.open()?;

        let mut index = repo.index().map_err(GitError::StagingFailed)?;
        let tree_id = index.write_tree().map_err(GitError::StagingFailed)?;
        let tree = repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;

        let sig = repo.signature().map_err(GitError::Signature)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(GitError::CommitFailed)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(GitError::CommitFailed(e)),
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(GitError::CommitFailed)?;

        Ok(short_id(&oid.to_string()))
    }

    fn push(&self, args: &[String]) -> Result<(), GitError> {
        let workdir = self.workdir()?;
        executor::push(&workdir, args)
    }
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::Diff(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::Diff)?;
    Ok(Some(tree))
}

fn resolve_tree<'r>(repo: &'r Repository, spec: &str) -> Result<Tree<'r>, GitError> {
    repo.revparse_single(spec)
        .and_then(|obj| obj.peel_to_tree())
        .map_err(|e| GitError::ReferenceNotFound(spec.to_string(), e))
}

fn build_diff<'r>(repo: &'r Repository, scope: &DiffScope) -> Result<Diff<'r>, GitError> {
    let mut diff = match scope {
        DiffScope::Staged => {
            let head_tree = resolve_head_tree(repo)?;
            repo.diff_tree_to_index(head_tree.as_ref(), None, None)
                .map_err(GitError::Diff)?
        }
        DiffScope::WorkingTree => repo
            .diff_index_to_workdir(None, None)
            .map_err(GitError::Diff)?,
        DiffScope::Range { from, to } => {
            let old_tree = resolve_tree(repo, from)?;
            let new_tree = resolve_tree(repo, to)?;
            repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)
                .map_err(GitError::Diff)?
        }
    };

    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true);
    diff.find_similar(Some(&mut find_opts))
        .map_err(GitError::Diff)?;

    Ok(diff)
}

/// Render a diff as unified patch text.
fn diff_text(diff: &Diff<'_>) -> Result<String, GitError> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(GitError::Diff)?;
    Ok(text)
}

fn status_letters(status: Status) -> (char, char) {
    if status.is_wt_new() && !status.intersects(index_flags()) {
        return ('?', '?');
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };

    let working_dir = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else {
        ' '
    };

    (index, working_dir)
}

fn index_flags() -> Status {
    Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE
}

fn delta_letter(delta: Delta) -> char {
    match delta {
        Delta::Added => 'A',
        Delta::Modified => 'M',
        Delta::Deleted => 'D',
        Delta::Renamed => 'R',
        Delta::Copied => 'C',
        Delta::Typechange => 'T',
        Delta::Untracked => '?',
        _ => ' ',
    }
}

/// Line count from libgit2, clamped to `u32`.
fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn short_id(hex: &str) -> String {
    hex.chars().take(7).collect()
}

fn commit_record(commit: &Commit<'_>) -> CommitRecord {
    let time = commit.time();
    let date = FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| {
            DateTime::<Utc>::from_timestamp(time.seconds(), 0)
                .map(|dt| dt.with_timezone(&offset).date_naive())
        })
        .unwrap_or(NaiveDate::MIN);

    CommitRecord {
        short_id: short_id(&commit.id().to_string()),
        subject: commit
            .message()
            .and_then(|m| m.lines().next())
            .unwrap_or("")
            .to_string(),
        author: commit.author().name().unwrap_or("unknown").to_string(),
        date,
    }
}
