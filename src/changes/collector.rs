//! Collect pending changes from a `GitBackend` into a `ChangeSet`.

use tracing::debug;

use crate::error::GitError;
use crate::git::{DiffScope, DiffSummary, GitBackend, StatusEntry};

use super::{ChangeSet, ChangeType, FileChange};

/// Collect changes for `scope`.
///
/// With no scope, staged changes win; when the staged diff is empty the
/// working-tree diff is used instead.
pub fn collect_changes<B: GitBackend + ?Sized>(
    backend: &B,
    scope: Option<&DiffScope>,
) -> Result<ChangeSet, GitError> {
    if !backend.is_repository() {
        return Err(GitError::NotARepository);
    }

    let (scope, diff_text) = match scope {
        Some(scope) => (scope.clone(), backend.diff(scope)?),
        None => {
            let staged = backend.diff(&DiffScope::Staged)?;
            if staged.trim().is_empty() {
                debug!("No staged changes, falling back to working tree");
                let unstaged = backend.diff(&DiffScope::WorkingTree)?;
                (DiffScope::WorkingTree, unstaged)
            } else {
                (DiffScope::Staged, staged)
            }
        }
    };

    let summary = backend.diff_summary(&scope)?;

    let files = match scope {
        DiffScope::Range { .. } => files_from_summary(&summary),
        DiffScope::Staged | DiffScope::WorkingTree => {
            let status = backend.status()?;
            merge_status(&status, &summary)
        }
    };

    debug!(
        "Collected {} files ({} diff bytes) for scope {}",
        files.len(),
        diff_text.len(),
        scope
    );

    Ok(ChangeSet::new(files, diff_text, scope))
}

/// Collect the changes between `remote_branch` and HEAD.
pub fn collect_range<B: GitBackend + ?Sized>(
    backend: &B,
    remote_branch: &str,
) -> Result<ChangeSet, GitError> {
    collect_changes(backend, Some(&DiffScope::range(remote_branch, "HEAD")))
}

/// One entry per status path; line counts come from the matching numstat
/// entry and default to zero when there is none.
fn merge_status(status: &[StatusEntry], summary: &DiffSummary) -> Vec<FileChange> {
    status
        .iter()
        .map(|entry| {
            let (insertions, deletions) = summary
                .find(&entry.path)
                .map(|stat| (stat.insertions, stat.deletions))
                .unwrap_or((0, 0));
            FileChange {
                path: entry.path.clone(),
                insertions,
                deletions,
                change_type: ChangeType::from_letter(entry.letter()),
            }
        })
        .collect()
}

fn files_from_summary(summary: &DiffSummary) -> Vec<FileChange> {
    summary
        .files
        .iter()
        .map(|stat| FileChange {
            path: stat.path.clone(),
            insertions: stat.insertions,
            deletions: stat.deletions,
            change_type: ChangeType::from_letter(stat.status),
        })
        .collect()
}
