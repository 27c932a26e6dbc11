//! Pull request title/description prompt.

use tracing::debug;

use crate::changes::ChangeSet;
use crate::git::CommitRecord;

use super::{truncate_lines, Locale, PromptConfig};

/// Input for a PR prompt.
#[derive(Debug, Clone)]
pub struct PrPromptInput<'a> {
    pub changes: &'a ChangeSet,
    /// Pending commits, oldest first.
    pub commits: Option<&'a [CommitRecord]>,
    /// Raw PR template text. `None` selects the Scenario / Problem / Solution shape.
    pub template: Option<&'a str>,
    pub current_branch: &'a str,
    pub target_branch: &'a str,
    /// Embed the diff in a fenced block with an omitted-lines marker.
    pub include_diff: bool,
}

/// Build the PR prompt for `input` in `locale`.
pub fn build_pr_prompt(input: &PrPromptInput<'_>, locale: Locale) -> String {
    render_pr_prompt(input, &PromptConfig::pull_request(locale, input.include_diff))
}

pub(crate) fn render_pr_prompt(input: &PrPromptInput<'_>, config: &PromptConfig) -> String {
    let locale = config.locale;
    let bundle = locale.bundle();
    let changes = input.changes;
    let totals = changes.totals();

    let mut prompt = String::new();
    prompt.push_str(bundle.pr_opening);
    prompt.push_str("\n\n");

    // Branch and size summary
    prompt.push_str(bundle.pr_info_heading);
    prompt.push_str(&format!(
        "\n- {}: {}",
        bundle.current_branch_label, input.current_branch
    ));
    prompt.push_str(&format!(
        "\n- {}: {}",
        bundle.target_branch_label, input.target_branch
    ));
    if let Some(commits) = input.commits {
        prompt.push_str(&format!(
            "\n- {}: {}",
            bundle.total_commits_label,
            commits.len()
        ));
    }
    prompt.push_str(&format!(
        "\n- {}: {}",
        bundle.files_label,
        changes.files().len()
    ));
    prompt.push_str(&format!(
        "\n- {}: {}",
        bundle.added_lines_label, totals.insertions
    ));
    prompt.push_str(&format!(
        "\n- {}: {}\n\n",
        bundle.removed_lines_label, totals.deletions
    ));

    if let Some(commits) = input.commits {
        prompt.push_str(bundle.commits_heading);
        for (i, commit) in commits.iter().take(config.max_commit_entries).enumerate() {
            prompt.push('\n');
            prompt.push_str(&locale.commit_line(i + 1, commit));
        }
        if commits.len() > config.max_commit_entries {
            prompt.push('\n');
            prompt.push_str(&locale.more_commits(commits.len() - config.max_commit_entries));
        }
        prompt.push_str("\n\n");
    }

    prompt.push_str(bundle.pr_files_heading);
    for file in changes.files() {
        prompt.push_str(&format!(
            "\n- {} (+{} -{} {})",
            file.path, file.insertions, file.deletions, bundle.lines_word
        ));
    }
    prompt.push_str("\n\n");

    let diff = changes.diff_text();
    if !diff.is_empty() {
        let (kept, omitted) = truncate_lines(diff, config.max_diff_lines);
        prompt.push_str(bundle.pr_diff_heading);
        if input.include_diff {
            prompt.push_str("\n```diff\n");
            prompt.push_str(&kept);
            if omitted > 0 {
                prompt.push('\n');
                prompt.push_str(&locale.omitted_marker(omitted));
            }
            prompt.push_str("\n```\n\n");
        } else {
            prompt.push('\n');
            prompt.push_str(&kept);
            prompt.push_str("\n\n");
        }
    }

    // Template mode is chosen only by whether the caller supplied a template.
    let shape_instruction = match input.template {
        Some(template) => {
            prompt.push_str(bundle.template_heading);
            prompt.push('\n');
            prompt.push_str(template);
            prompt.push_str("\n\n");
            bundle.template_instruction
        }
        None => {
            prompt.push_str(bundle.default_sections_heading);
            prompt.push('\n');
            prompt.push_str(bundle.default_sections);
            prompt.push_str("\n\n");
            bundle.sections_instruction
        }
    };

    prompt.push_str(bundle.instructions_heading);
    let instructions = [bundle.title_instruction, shape_instruction]
        .into_iter()
        .chain(bundle.pr_instructions.lines());
    for (i, line) in instructions.enumerate() {
        prompt.push_str(&format!("\n{}. {}", i + 1, line));
    }
    prompt.push_str("\n\n");

    prompt.push_str(bundle.response_format_heading);
    prompt.push('\n');
    prompt.push_str(bundle.response_format);

    debug!(
        "Built PR prompt: {} chars, template: {}, include_diff: {}",
        prompt.len(),
        input.template.is_some(),
        input.include_diff
    );

    prompt
}
