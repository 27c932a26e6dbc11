//! Command orchestrators: collect → prompt → generate → parse → encode.
//!
//! Each command takes its dependencies (backend, config, generator) as
//! parameters so it can run against mocks in tests.

pub mod analyze;
pub mod clipboard;
pub mod commit;
pub mod config;
pub mod display;
pub mod push;
pub mod review;

use dialoguer::Confirm;
use tracing::debug;

use crate::changes::{collect_range, ChangeSet};
use crate::config::{ConfigStore, ValidatedConfig};
use crate::error::{CommandError, GitError};
use crate::git::{pending_commits, resolve_remote_branch, CommitRecord, GitBackend, RemoteBranch};
use crate::llm::GenerationClient;

/// What is waiting to be pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingState {
    /// No `origin`, or none of the candidate remote branches exist.
    NoRemote,
    /// Nothing on HEAD that the remote branch lacks.
    UpToDate { remote_branch: String },
    Pending {
        remote_branch: String,
        /// Oldest first.
        commits: Vec<CommitRecord>,
        changes: ChangeSet,
    },
}

/// Resolve the remote branch and gather commits and changes not yet on it.
pub fn inspect_pending<B: GitBackend + ?Sized>(backend: &B) -> Result<PendingState, CommandError> {
    let remote_branch = match resolve_remote_branch(backend) {
        RemoteBranch::Resolved(name) => name,
        RemoteBranch::Unresolved => return Ok(PendingState::NoRemote),
    };

    let commits = pending_commits(backend, &remote_branch)?;
    if commits.is_empty() {
        return Ok(PendingState::UpToDate { remote_branch });
    }

    let changes = collect_range(backend, &remote_branch)?;
    debug!(
        "{} pending commits, {} changed files against {}",
        commits.len(),
        changes.files().len(),
        remote_branch
    );

    Ok(PendingState::Pending {
        remote_branch,
        commits,
        changes,
    })
}

/// Fail early when not inside a repository.
pub fn require_repository<B: GitBackend + ?Sized>(backend: &B) -> Result<(), CommandError> {
    if backend.is_repository() {
        Ok(())
    } else {
        Err(CommandError::Git(GitError::NotARepository))
    }
}

/// Validate the stored configuration and build a generation client from it.
pub fn generation_setup<S: ConfigStore + ?Sized>(
    store: &S,
) -> Result<(ValidatedConfig, GenerationClient), CommandError> {
    let config = store.validate()?;
    let client = GenerationClient::new(config.credentials.clone(), config.model.clone())
        .map_err(|e| CommandError::Generation(e.to_string()))?;
    Ok((config, client))
}

/// Ask a yes/no question, unless `assume_yes` is set.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CommandError> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|_| CommandError::Cancelled)
}
