//! `gromit analyze`: summarize pending changes and build the prompt.

use tracing::info;

use crate::changes::collect_changes;
use crate::config::ConfigStore;
use crate::error::CommandError;
use crate::git::remote::target_branch_name;
use crate::git::GitBackend;
use crate::prompt::{build_commit_prompt, build_pr_prompt, load_pr_template, PrPromptInput};

use super::display::{
    format_commits, format_diff_preview, format_file_list, format_status_entries, format_totals,
    print_lines, DIFF_PREVIEW_LINES,
};
use super::clipboard::copy_prompt;
use super::{inspect_pending, require_repository, PendingState};

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Print the generated prompt.
    pub show_prompt: bool,
    /// Analyze commits pending push and build a PR prompt instead.
    pub push: bool,
    /// Copy the built prompt to the clipboard.
    pub copy: bool,
}

/// Run `analyze`. Returns the built prompt, or `None` when there was
/// nothing to analyze.
pub fn run<B, S>(backend: &B, store: &S, options: &AnalyzeOptions) -> Result<Option<String>, CommandError>
where
    B: GitBackend + ?Sized,
    S: ConfigStore + ?Sized,
{
    if options.push {
        return analyze_for_push(backend, store, options);
    }

    let config = store.validate()?;
    require_repository(backend)?;

    if backend.status()?.is_empty() {
        println!("No changes to analyze.");
        return Ok(None);
    }

    let changes = collect_changes(backend, None)?;
    info!("Analyzing {} changes", changes.scope());

    println!("Changed files ({}):", changes.scope());
    print_lines(&format_file_list(&changes, None));
    println!();
    println!("Summary:");
    print_lines(&format_totals(&changes));

    if !changes.diff_text().is_empty() {
        println!();
        println!("Diff preview:");
        println!("{}", format_diff_preview(changes.diff_text(), DIFF_PREVIEW_LINES));
    }

    let prompt = build_commit_prompt(&changes, config.locale);

    println!();
    if options.copy {
        copy_prompt(&prompt);
    }
    if options.show_prompt {
        println!("--- Prompt ---");
        println!("{}", prompt);
        println!("--- End prompt ---");
    } else {
        println!(
            "Commit prompt ready ({} characters). Paste it into your AI tool, run with --show-prompt to print it, or run `gromit commit` to generate the message.",
            prompt.chars().count()
        );
    }

    Ok(Some(prompt))
}

/// Build the PR prompt for commits pending push.
fn analyze_for_push<B, S>(
    backend: &B,
    store: &S,
    options: &AnalyzeOptions,
) -> Result<Option<String>, CommandError>
where
    B: GitBackend + ?Sized,
    S: ConfigStore + ?Sized,
{
    require_repository(backend)?;

    let locale = store.load().locale();

    let status = backend.status()?;
    if !status.is_empty() {
        println!("Uncommitted changes detected:");
        print_lines(&format_status_entries(&status, None));
        println!();
        println!("Commit them first:");
        println!("  gromit commit                          # AI-generated commit");
        println!("  git add . && git commit -m \"message\"   # manual commit");
        return Ok(None);
    }

    let (remote_branch, commits, changes) = match inspect_pending(backend)? {
        PendingState::NoRemote => {
            print_no_remote();
            return Ok(None);
        }
        PendingState::UpToDate { remote_branch } => {
            println!("No commits pending push to {}.", remote_branch);
            return Ok(None);
        }
        PendingState::Pending {
            remote_branch,
            commits,
            changes,
        } => (remote_branch, commits, changes),
    };

    let current_branch = backend.current_branch()?;
    let target_branch = target_branch_name(&remote_branch);
    let template = load_pr_template(&backend.workdir()?);

    let prompt = build_pr_prompt(
        &PrPromptInput {
            changes: &changes,
            commits: Some(&commits),
            template: template.as_deref(),
            current_branch: &current_branch,
            target_branch,
            include_diff: true,
        },
        locale,
    );

    if options.copy {
        copy_prompt(&prompt);
        println!();
    }

    let totals = changes.totals();
    println!("Pull request analysis:");
    println!("  Current branch:  {}", current_branch);
    println!("  Target branch:   {}", target_branch);
    println!("  Pending commits: {}", commits.len());
    println!("  Files changed:   {}", changes.files().len());
    println!("  Lines added:     {}", totals.insertions);
    println!("  Lines removed:   {}", totals.deletions);
    println!(
        "  Template:        {}",
        if template.is_some() { "repository" } else { "built-in" }
    );
    println!();
    println!("Commits:");
    print_lines(&format_commits(&commits));
    println!();
    println!("--- Prompt ---");
    println!("{}", prompt);
    println!("--- End prompt ---");
    println!();
    println!("Paste the prompt into your AI tool to get the PR title and description,");
    println!("or run `gromit push` to push and generate them automatically.");

    Ok(Some(prompt))
}

pub(crate) fn print_no_remote() {
    println!("No remote branch available.");
    println!("This repository has no 'origin' remote, or none of origin/<branch>, origin/master, origin/main exist.");
    println!();
    println!("To add a remote:");
    println!("  git remote add origin <repository-url>");
}
