//! Prompt construction for commit messages and pull requests.
//!
//! Everything here is a pure transformation of a `ChangeSet` (plus commits
//! and template text) into a prompt string, except `template`, which reads
//! the PR template from disk for the caller.

pub mod commit;
pub mod locale;
pub mod pr;
pub mod template;

pub use commit::build_commit_prompt;
pub use locale::{Locale, LocaleBundle};
pub use pr::{build_pr_prompt, PrPromptInput};
pub use template::load_pr_template;

/// Diff line budget for commit prompts.
pub const COMMIT_DIFF_LINES: usize = 100;

/// Diff line budget for PR prompts that include the diff with an omitted marker.
pub const PR_DIFF_LINES_WITH_DIFF: usize = 100;

/// Diff line budget for PR prompts without explicit diff inclusion.
pub const PR_DIFF_LINES: usize = 150;

/// Maximum number of commits listed in a PR prompt.
pub const MAX_COMMIT_ENTRIES: usize = 50;

/// Size limits and language for one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptConfig {
    pub locale: Locale,
    pub max_diff_lines: usize,
    pub max_commit_entries: usize,
}

impl PromptConfig {
    pub fn commit(locale: Locale) -> Self {
        Self {
            locale,
            max_diff_lines: COMMIT_DIFF_LINES,
            max_commit_entries: MAX_COMMIT_ENTRIES,
        }
    }

    pub fn pull_request(locale: Locale, include_diff: bool) -> Self {
        let max_diff_lines = if include_diff {
            PR_DIFF_LINES_WITH_DIFF
        } else {
            PR_DIFF_LINES
        };
        Self {
            locale,
            max_diff_lines,
            max_commit_entries: MAX_COMMIT_ENTRIES,
        }
    }
}

/// Keep the first `max_lines` lines of `text`.
///
/// Lines are split on `\n`, so a trailing newline counts as a final empty
/// line. Returns the kept text and the number of dropped lines.
pub fn truncate_lines(text: &str, max_lines: usize) -> (String, usize) {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return (text.to_string(), 0);
    }
    let omitted = lines.len() - max_lines;
    (lines[..max_lines].join("\n"), omitted)
}
