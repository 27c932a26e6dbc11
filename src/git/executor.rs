//! Push via the system `git` binary.
//!
//! Pushing shells out instead of using git2 so that the user's existing git
//! config, SSH agent, and credential store are inherited.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Check that a `git` executable is on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::GitNotInstalled)
}

/// Run `git push <args>` inside `workdir`.
pub fn push(workdir: &Path, args: &[String]) -> Result<(), GitError> {
    check_git_installed()?;

    let mut full_args = vec!["push".to_string()];
    full_args.extend(args.iter().cloned());

    debug!("Running git {:?} in {}", full_args, workdir.display());

    let output = Command::new("git")
        .args(&full_args)
        .current_dir(workdir)
        .output()
        .map_err(|e| GitError::PushFailed(format!("Failed to run git push: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::PushFailed(stderr.trim().to_string()));
    }

    Ok(())
}
