//! `gromit commit`: generate a commit message, confirm, stage and commit.

use tracing::{debug, info};

use crate::changes::collect_changes;
use crate::config::ValidatedConfig;
use crate::error::CommandError;
use crate::git::GitBackend;
use crate::llm::{CallProfile, GenerationResult, TextGenerator};
use crate::prompt::build_commit_prompt;

use super::display::{format_file_list, format_totals, print_lines};
use super::{confirm, require_repository};

#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Skip the confirmation prompt.
    pub yes: bool,
}

/// Run `commit`. Returns the short id of the new commit, or `None` when
/// there was nothing to commit.
///
/// Generation failures are reported before the index is touched.
pub async fn run<B, G>(
    backend: &B,
    config: &ValidatedConfig,
    generator: &G,
    options: &CommitOptions,
) -> Result<Option<String>, CommandError>
where
    B: GitBackend + ?Sized,
    G: TextGenerator + ?Sized,
{
    require_repository(backend)?;

    if backend.status()?.is_empty() {
        println!("No changes to commit.");
        return Ok(None);
    }

    // ── Stage 1: Collect changes ──
    let changes = collect_changes(backend, None)?;
    println!("Changed files ({}):", changes.scope());
    print_lines(&format_file_list(&changes, None));
    print_lines(&format_totals(&changes));
    println!();

    // ── Stage 2: Generate message ──
    println!("Generating commit message with {}...", config.model);
    let prompt = build_commit_prompt(&changes, config.locale);
    debug!("Commit prompt is {} characters", prompt.chars().count());

    let message = match generator.generate(&prompt, CallProfile::CommitMessage).await {
        GenerationResult::Success { text } => text,
        GenerationResult::Failure { reason } => return Err(CommandError::Generation(reason)),
    };

    println!("  [DONE] Commit message generated");
    println!();
    println!("Commit message:");
    println!("  {}", message);
    println!();

    // ── Stage 3: Confirm ──
    if !confirm("Create this commit?", options.yes)? {
        return Err(CommandError::Cancelled);
    }

    // ── Stage 4: Stage and commit ──
    backend.add(".").map_err(CommandError::CommitFailed)?;
    let short_id = backend.commit(&message).map_err(CommandError::CommitFailed)?;
    info!("Created commit {}", short_id);

    println!("  [DONE] Committed {}", short_id);
    println!();
    println!("Next: `gromit push` to push and open a pull request.");

    Ok(Some(short_id))
}
