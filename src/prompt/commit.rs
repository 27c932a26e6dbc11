//! Commit message prompt.

use tracing::debug;

use crate::changes::ChangeSet;

use super::{truncate_lines, Locale, PromptConfig};

/// Build the commit-message prompt for `changes` in `locale`.
///
/// The diff is capped at 100 lines with no truncation marker.
pub fn build_commit_prompt(changes: &ChangeSet, locale: Locale) -> String {
    render_commit_prompt(changes, &PromptConfig::commit(locale))
}

pub(crate) fn render_commit_prompt(changes: &ChangeSet, config: &PromptConfig) -> String {
    let bundle = config.locale.bundle();
    let totals = changes.totals();
    let (diff_preview, omitted) = truncate_lines(changes.diff_text(), config.max_diff_lines);

    let files_list = changes
        .files()
        .iter()
        .map(|f| format!("- {} (+{}/-{})", f.path, f.insertions, f.deletions))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "{opening}\n\n\
{summary}\n\
- {files_label}: {files}\n\
- {ins_label}: {insertions}\n\
- {del_label}: {deletions}\n\n\
{files_heading}\n\
{files_list}\n\n\
{diff_heading}\n\
{diff_preview}\n\n\
{instructions}\n\n\
{closing}",
        opening = bundle.commit_opening,
        summary = bundle.summary_heading,
        files_label = bundle.files_label,
        files = changes.files().len(),
        ins_label = bundle.insertions_label,
        insertions = totals.insertions,
        del_label = bundle.deletions_label,
        deletions = totals.deletions,
        files_heading = bundle.changed_files_heading,
        files_list = files_list,
        diff_heading = bundle.commit_diff_heading,
        diff_preview = diff_preview,
        instructions = bundle.commit_instructions,
        closing = bundle.commit_closing,
    );

    debug!(
        "Built commit prompt: {} chars, {} diff lines dropped",
        prompt.len(),
        omitted
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::{ChangeType, FileChange};
    use crate::git::DiffScope;

    fn two_file_changes(diff: &str) -> ChangeSet {
        ChangeSet::new(
            vec![
                FileChange {
                    path: "src/main.rs".into(),
                    insertions: 10,
                    deletions: 2,
                    change_type: ChangeType::Modified,
                },
                FileChange {
                    path: "README.md".into(),
                    insertions: 1,
                    deletions: 0,
                    change_type: ChangeType::Added,
                },
            ],
            diff.to_string(),
            DiffScope::Staged,
        )
    }

    #[test]
    fn test_pt_br_commit_prompt_summary() {
        let prompt = build_commit_prompt(&two_file_changes("+fn main() {}"), Locale::PtBr);

        assert!(prompt.contains("Arquivos modificados: 2"));
        assert!(prompt.contains("Linhas inseridas: 11"));
        assert!(prompt.contains("Linhas removidas: 2"));
        assert!(prompt.contains("- src/main.rs (+10/-2)"));
        assert!(prompt.contains("- README.md (+1/-0)"));
        assert!(prompt.ends_with(
            "Responda APENAS com a mensagem de commit, sem explicações adicionais."
        ));
    }

    #[test]
    fn test_english_commit_prompt() {
        let prompt = build_commit_prompt(&two_file_changes(""), Locale::En);
        assert!(prompt.contains("Files changed: 2"));
        assert!(prompt.contains("imperative mood"));
        assert!(prompt.ends_with("without additional explanations."));
    }

    #[test]
    fn test_commit_prompt_diff_is_capped_without_marker() {
        let diff = (1..=101)
            .map(|i| format!("+line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = build_commit_prompt(&two_file_changes(&diff), Locale::En);

        assert!(prompt.contains("+line 100\n"));
        assert!(!prompt.contains("+line 101"));
        assert!(!prompt.contains("omitted"));
    }

    #[test]
    fn test_commit_prompt_is_deterministic() {
        let changes = two_file_changes("+a\n-b");
        assert_eq!(
            build_commit_prompt(&changes, Locale::Es),
            build_commit_prompt(&changes, Locale::Es)
        );
    }
}
