//! `gromit review`: list commits and changes waiting to be pushed.

use crate::error::CommandError;
use crate::git::GitBackend;

use super::analyze::print_no_remote;
use super::display::{
    format_commits, format_diff_preview, format_file_list, format_totals, print_lines,
    DIFF_PREVIEW_LINES,
};
use super::{inspect_pending, require_repository, PendingState};

#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// Include a preview of the combined diff.
    pub show_diff: bool,
}

pub fn run<B: GitBackend + ?Sized>(
    backend: &B,
    options: &ReviewOptions,
) -> Result<PendingState, CommandError> {
    require_repository(backend)?;

    let state = inspect_pending(backend)?;
    match &state {
        PendingState::NoRemote => print_no_remote(),
        PendingState::UpToDate { remote_branch } => {
            println!("Everything is pushed. No commits pending for {}.", remote_branch);
        }
        PendingState::Pending {
            remote_branch,
            commits,
            changes,
        } => {
            println!("Commits pending push to {} ({}):", remote_branch, commits.len());
            print_lines(&format_commits(commits));
            println!();
            println!("Summary:");
            print_lines(&format_totals(changes));
            println!();
            println!("Changed files:");
            print_lines(&format_file_list(changes, None));

            if options.show_diff && !changes.diff_text().is_empty() {
                println!();
                println!("Diff:");
                println!("{}", format_diff_preview(changes.diff_text(), DIFF_PREVIEW_LINES));
            }

            println!();
            println!("Next steps:");
            for line in next_steps(commits.len(), options.show_diff) {
                println!("  {}", line);
            }
        }
    }

    Ok(state)
}

fn next_steps(pending: usize, showing_diff: bool) -> Vec<String> {
    let mut steps = vec!["git push                      # push the commits".to_string()];
    if !showing_diff {
        steps.push("gromit review --show-diff     # include the diff".to_string());
    }
    steps.push(format!(
        "git log --oneline -{:<20}# inspect the commits",
        pending
    ));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{origin_remote, record};
    use crate::git::backend::{CommitLog, DiffSummary, FileStat, MockGitBackend};

    #[test]
    fn test_next_steps_hide_diff_hint_when_showing_diff() {
        let steps = next_steps(3, true);
        assert_eq!(steps.len(), 2);
        assert!(steps[1].starts_with("git log --oneline -3"));

        let steps = next_steps(3, false);
        assert!(steps[1].starts_with("gromit review --show-diff"));
    }

    #[test]
    fn test_review_without_remote_is_not_an_error() {
        let mut mock = MockGitBackend::new();
        mock.expect_is_repository().returning(|| true);
        mock.expect_remotes().returning(|| Ok(Vec::new()));

        let state = run(&mock, &ReviewOptions::default()).unwrap();
        assert_eq!(state, PendingState::NoRemote);
    }

    #[test]
    fn test_review_lists_pending_commits() {
        let mut mock = MockGitBackend::new();
        mock.expect_is_repository().returning(|| true);
        mock.expect_remotes().returning(|| Ok(origin_remote()));
        mock.expect_current_branch().returning(|| Ok("main".into()));
        mock.expect_rev_parse().returning(|_| Ok("abc".into()));
        mock.expect_log()
            .returning(|_| Ok(CommitLog::new(vec![record("c1", "fix: typo")])));
        mock.expect_diff().returning(|_| Ok("-teh\n+the\n".into()));
        mock.expect_diff_summary().returning(|_| {
            Ok(DiffSummary::from_files(vec![FileStat {
                path: "README.md".into(),
                insertions: 1,
                deletions: 1,
                status: 'M',
            }]))
        });

        let state = run(&mock, &ReviewOptions { show_diff: true }).unwrap();
        match state {
            PendingState::Pending { commits, changes, .. } => {
                assert_eq!(commits.len(), 1);
                assert_eq!(changes.totals().changes, 2);
            }
            other => panic!("Expected Pending, got {:?}", other),
        }
    }
}
