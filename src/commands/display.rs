//! Terminal formatting shared by the commands.

use crate::changes::{ChangeSet, ChangeType};
use crate::git::{CommitRecord, StatusEntry};

/// Lines of diff shown in previews.
pub const DIFF_PREVIEW_LINES: usize = 50;

/// Files listed before collapsing into "... and N more files".
pub const FILE_LIST_LIMIT: usize = 10;

fn change_tag(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::Modified => "[M]",
        ChangeType::Added => "[A]",
        ChangeType::Deleted => "[D]",
        ChangeType::Renamed => "[R]",
        ChangeType::Unknown => "[?]",
    }
}

/// One line per file, with line counts when the file has any.
pub fn format_file_list(changes: &ChangeSet, limit: Option<usize>) -> Vec<String> {
    let files = changes.files();
    let shown = limit.unwrap_or(files.len()).min(files.len());

    let mut lines: Vec<String> = files[..shown]
        .iter()
        .map(|f| {
            if f.changes() > 0 {
                format!(
                    "  {} {}  +{} -{}",
                    change_tag(f.change_type),
                    f.path,
                    f.insertions,
                    f.deletions
                )
            } else {
                format!("  {} {}", change_tag(f.change_type), f.path)
            }
        })
        .collect();

    if files.len() > shown {
        lines.push(format!("  ... and {} more files", files.len() - shown));
    }
    lines
}

pub fn format_totals(changes: &ChangeSet) -> Vec<String> {
    let totals = changes.totals();
    vec![
        format!("  Files changed:   {}", changes.files().len()),
        format!("  Lines added:     {}", totals.insertions),
        format!("  Lines removed:   {}", totals.deletions),
        format!("  Total changes:   {}", totals.changes),
    ]
}

/// First `max_lines` lines of a diff, with a note about the rest.
pub fn format_diff_preview(diff: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = diff.split('\n').collect();
    if lines.len() <= max_lines {
        return diff.to_string();
    }
    format!(
        "{}\n... and {} more lines",
        lines[..max_lines].join("\n"),
        lines.len() - max_lines
    )
}

/// Numbered commit list, oldest first.
pub fn format_commits(commits: &[CommitRecord]) -> Vec<String> {
    commits
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            [
                format!("  {}. {} {}", i + 1, c.short_id, c.subject),
                format!("     by {} on {}", c.author, c.date.format("%Y-%m-%d")),
            ]
        })
        .collect()
}

/// Working-tree entries, optionally suffixed (e.g. "(ignored)").
pub fn format_status_entries(entries: &[StatusEntry], suffix: Option<&str>) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            let tag = change_tag(ChangeType::from_letter(e.letter()));
            match suffix {
                Some(s) => format!("  {} {} {}", tag, e.path, s),
                None => format!("  {} {}", tag, e.path),
            }
        })
        .collect()
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::FileChange;
    use crate::git::DiffScope;
    use chrono::NaiveDate;

    fn changes(n: usize) -> ChangeSet {
        let files = (0..n)
            .map(|i| FileChange {
                path: format!("f{}.rs", i),
                insertions: i as u32,
                deletions: 0,
                change_type: ChangeType::Modified,
            })
            .collect();
        ChangeSet::new(files, String::new(), DiffScope::WorkingTree)
    }

    #[test]
    fn test_file_list_omits_counts_for_unchanged_lines() {
        let lines = format_file_list(&changes(2), None);
        assert_eq!(lines, vec!["  [M] f0.rs", "  [M] f1.rs  +1 -0"]);
    }

    #[test]
    fn test_file_list_limit() {
        let lines = format_file_list(&changes(12), Some(FILE_LIST_LIMIT));
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[10], "  ... and 2 more files");
    }

    #[test]
    fn test_diff_preview_truncates() {
        let diff = (1..=52).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let preview = format_diff_preview(&diff, DIFF_PREVIEW_LINES);
        assert!(preview.starts_with("1\n2\n"));
        assert!(preview.ends_with("50\n... and 2 more lines"));
    }

    #[test]
    fn test_diff_preview_short_diff_unchanged() {
        assert_eq!(format_diff_preview("+a\n-b", DIFF_PREVIEW_LINES), "+a\n-b");
    }

    #[test]
    fn test_commits_numbered() {
        let commits = vec![CommitRecord {
            short_id: "abc1234".into(),
            subject: "feat: x".into(),
            author: "Ada".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }];
        assert_eq!(
            format_commits(&commits),
            vec!["  1. abc1234 feat: x", "     by Ada on 2024-01-02"]
        );
    }

    #[test]
    fn test_status_entries_with_suffix() {
        let entries = vec![StatusEntry {
            path: "notes.txt".into(),
            index: '?',
            working_dir: '?',
        }];
        assert_eq!(
            format_status_entries(&entries, Some("(ignored)")),
            vec!["  [?] notes.txt (ignored)"]
        );
    }
}
