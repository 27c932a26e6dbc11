//! Remote branch resolution for push, review and PR flows.

use tracing::debug;

use crate::error::GitError;

use super::backend::{CommitRecord, GitBackend};

/// Name of the remote every flow compares against.
pub const ORIGIN: &str = "origin";

/// Outcome of looking up the remote-tracking branch to compare against.
///
/// `Unresolved` is a normal outcome (no origin, or none of the candidate
/// branches exist) that callers report to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteBranch {
    Resolved(String),
    Unresolved,
}

impl RemoteBranch {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            RemoteBranch::Resolved(name) => Some(name.as_str()),
            RemoteBranch::Unresolved => None,
        }
    }
}

/// Candidate remote-tracking branches, in the order they are tried.
pub fn remote_candidates(current_branch: &str) -> Vec<String> {
    vec![
        format!("{}/{}", ORIGIN, current_branch),
        format!("{}/master", ORIGIN),
        format!("{}/main", ORIGIN),
    ]
}

/// Resolve the remote-tracking branch for the current branch.
///
/// Requires an `origin` remote, then tries `origin/<current>`,
/// `origin/master` and `origin/main` in that order. Backend errors along
/// the way count as "not found" for that candidate.
pub fn resolve_remote_branch<B: GitBackend + ?Sized>(backend: &B) -> RemoteBranch {
    let has_origin = match backend.remotes() {
        Ok(remotes) => remotes.iter().any(|r| r.name == ORIGIN),
        Err(e) => {
            debug!("Could not list remotes: {}", e);
            false
        }
    };
    if !has_origin {
        debug!("No '{}' remote configured", ORIGIN);
        return RemoteBranch::Unresolved;
    }

    let current = match backend.current_branch() {
        Ok(branch) => branch,
        Err(e) => {
            debug!("Could not determine current branch: {}", e);
            return RemoteBranch::Unresolved;
        }
    };

    for candidate in remote_candidates(&current) {
        match backend.rev_parse(&candidate) {
            Ok(_) => {
                debug!("Resolved remote branch: {}", candidate);
                return RemoteBranch::Resolved(candidate);
            }
            Err(e) => debug!("Remote branch {} not available: {}", candidate, e),
        }
    }

    RemoteBranch::Unresolved
}

/// Target branch name shown to users, without the remote prefix.
pub fn target_branch_name(remote_branch: &str) -> &str {
    remote_branch
        .strip_prefix(&format!("{}/", ORIGIN))
        .unwrap_or(remote_branch)
}

/// Commits on HEAD that are not on `remote_branch`, oldest first.
pub fn pending_commits<B: GitBackend + ?Sized>(
    backend: &B,
    remote_branch: &str,
) -> Result<Vec<CommitRecord>, GitError> {
    let log = backend.log(&format!("{}..HEAD", remote_branch))?;
    Ok(log.chronological())
}
