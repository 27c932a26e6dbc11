//! `gromit push`: push pending commits, then draft a pull request.

use tracing::{info, warn};

use crate::changes::ChangeSet;
use crate::config::ValidatedConfig;
use crate::error::CommandError;
use crate::git::remote::{target_branch_name, ORIGIN};
use crate::git::{CommitRecord, GitBackend};
use crate::llm::{CallProfile, GenerationResult, TextGenerator};
use crate::pr::PrArtifact;
use crate::prompt::{build_pr_prompt, load_pr_template, PrPromptInput};

use super::analyze::print_no_remote;
use super::display::{
    format_commits, format_diff_preview, format_file_list, format_status_entries, format_totals,
    print_lines, DIFF_PREVIEW_LINES, FILE_LIST_LIMIT,
};
use super::{confirm, inspect_pending, require_repository, PendingState};

#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Push even with uncommitted changes in the working tree.
    pub force: bool,
    /// Include a preview of the combined diff.
    pub show_diff: bool,
    /// Skip the confirmation prompt.
    pub yes: bool,
    /// Do not draft a pull request after pushing.
    pub no_pr: bool,
}

/// How a push run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    NoRemote,
    UpToDate,
    /// Uncommitted changes and no `--force`.
    Blocked,
    Pushed {
        /// `None` when drafting was skipped or failed.
        pr: Option<PrArtifact>,
    },
}

/// Run `push`. `pr` carries the validated configuration and generator used
/// to draft the pull request; `None` skips drafting.
pub async fn run<B, G>(
    backend: &B,
    pr: Option<(&ValidatedConfig, &G)>,
    options: &PushOptions,
) -> Result<PushOutcome, CommandError>
where
    B: GitBackend + ?Sized,
    G: TextGenerator + ?Sized,
{
    require_repository(backend)?;

    // ── Stage 1: Preflight ──
    let status = backend.status()?;
    if !status.is_empty() {
        if !options.force {
            println!("Uncommitted changes detected:");
            print_lines(&format_status_entries(&status, None));
            println!();
            println!("Commit them first:");
            println!("  gromit commit");
            println!("Or use:");
            println!("  gromit push --force   # ignore them (not recommended)");
            return Ok(PushOutcome::Blocked);
        }
        println!("Uncommitted changes will not be pushed:");
        print_lines(&format_status_entries(&status, Some("(ignored)")));
        println!();
    }

    let (remote_branch, commits, changes) = match inspect_pending(backend)? {
        PendingState::NoRemote => {
            print_no_remote();
            return Ok(PushOutcome::NoRemote);
        }
        PendingState::UpToDate { remote_branch } => {
            println!("Nothing to push. {} is up to date.", remote_branch);
            return Ok(PushOutcome::UpToDate);
        }
        PendingState::Pending {
            remote_branch,
            commits,
            changes,
        } => (remote_branch, commits, changes),
    };

    // ── Stage 2: Summary ──
    println!("Commits to push to {} ({}):", remote_branch, commits.len());
    print_lines(&format_commits(&commits));
    println!();
    println!("Summary:");
    print_lines(&format_totals(&changes));
    println!();
    println!("Changed files:");
    print_lines(&format_file_list(&changes, Some(FILE_LIST_LIMIT)));

    if options.show_diff && !changes.diff_text().is_empty() {
        println!();
        println!("Diff:");
        println!("{}", format_diff_preview(changes.diff_text(), DIFF_PREVIEW_LINES));
    }
    println!();

    // ── Stage 3: Confirm ──
    let prompt = format!("Push {} commit(s) to {}?", commits.len(), ORIGIN);
    if !confirm(&prompt, options.yes)? {
        return Err(CommandError::Cancelled);
    }

    // ── Stage 4: Push ──
    let current_branch = backend.current_branch()?;
    let args = vec![ORIGIN.to_string(), current_branch.clone()];
    if let Err(e) = backend.push(&args) {
        println!("Push failed. Try:");
        println!("  git pull        # integrate remote changes first");
        println!("  git push -f     # force push (careful!)");
        println!("  git status      # inspect the repository state");
        return Err(CommandError::PushFailed(e));
    }
    info!("Pushed {} commits to {}/{}", commits.len(), ORIGIN, current_branch);
    println!("  [DONE] Pushed to {}/{}", ORIGIN, current_branch);

    // ── Stage 5: Pull request ──
    let Some((config, generator)) = pr.filter(|_| !options.no_pr) else {
        return Ok(PushOutcome::Pushed { pr: None });
    };

    let draft = DraftInput {
        commits: &commits,
        changes: &changes,
        current_branch: &current_branch,
        target_branch: target_branch_name(&remote_branch),
    };
    let artifact = draft_pull_request(backend, config, generator, &draft).await;
    if let Some(artifact) = &artifact {
        print_artifact(artifact, &current_branch);
    }

    Ok(PushOutcome::Pushed { pr: artifact })
}

struct DraftInput<'a> {
    commits: &'a [CommitRecord],
    changes: &'a ChangeSet,
    current_branch: &'a str,
    target_branch: &'a str,
}

/// Generate and parse the PR draft. Failures are warnings: the push
/// already succeeded.
async fn draft_pull_request<B, G>(
    backend: &B,
    config: &ValidatedConfig,
    generator: &G,
    input: &DraftInput<'_>,
) -> Option<PrArtifact>
where
    B: GitBackend + ?Sized,
    G: TextGenerator + ?Sized,
{
    let template = match backend.workdir() {
        Ok(root) => load_pr_template(&root),
        Err(e) => {
            warn!("Could not locate the working directory: {}", e);
            None
        }
    };

    let prompt = build_pr_prompt(
        &PrPromptInput {
            changes: input.changes,
            commits: Some(input.commits),
            template: template.as_deref(),
            current_branch: input.current_branch,
            target_branch: input.target_branch,
            include_diff: false,
        },
        config.locale,
    );

    println!();
    println!("Generating pull request with {}...", config.model);
    let text = match generator.generate(&prompt, CallProfile::PullRequest).await {
        GenerationResult::Success { text } => text,
        GenerationResult::Failure { reason } => {
            warn!("Pull request generation failed: {}", reason);
            println!("Could not generate the pull request: {}", reason);
            println!("The commits were pushed; open the pull request manually.");
            return None;
        }
    };

    let remote_url = match backend.remotes() {
        Ok(remotes) => remotes
            .into_iter()
            .find(|r| r.name == ORIGIN)
            .and_then(|r| r.url().map(str::to_string)),
        Err(e) => {
            warn!("Could not read remotes: {}", e);
            None
        }
    };

    Some(PrArtifact::from_response(
        &text,
        remote_url.as_deref(),
        input.current_branch,
    ))
}

fn print_artifact(artifact: &PrArtifact, branch: &str) {
    println!("  [DONE] Pull request drafted");
    println!();
    println!("Title:");
    println!("  {}", artifact.title);
    println!();
    println!("Description:");
    println!("{}", artifact.description);
    println!();

    match &artifact.url {
        Some(url) => {
            println!("Open this link to create the pull request:");
            println!("  {}", url);
            if artifact.truncated {
                println!();
                println!("The description was shortened in the link.");
                println!("Paste the full description shown above into the form.");
            }
        }
        None => {
            println!("Unrecognized host. Create the pull request manually:");
            println!("  1. Open your repository's web page");
            println!("  2. Start a new pull request from {}", branch);
            println!("  3. Use the title and description above");
        }
    }
}
