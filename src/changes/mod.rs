//! Canonical description of pending changes, independent of the backend.

pub mod collector;

pub use collector::{collect_changes, collect_range};

use std::collections::HashSet;

use crate::git::DiffScope;

/// How a file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Modified,
    Added,
    Deleted,
    Renamed,
    Unknown,
}

impl ChangeType {
    /// Classify a porcelain status letter. Untracked (`?`) and anything else
    /// unrecognized is `Unknown`.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'M' => ChangeType::Modified,
            'A' => ChangeType::Added,
            'D' => ChangeType::Deleted,
            'R' => ChangeType::Renamed,
            _ => ChangeType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Modified => "modified",
            ChangeType::Added => "added",
            ChangeType::Deleted => "deleted",
            ChangeType::Renamed => "renamed",
            ChangeType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub insertions: u32,
    pub deletions: u32,
    pub change_type: ChangeType,
}

impl FileChange {
    pub fn changes(&self) -> u32 {
        self.insertions.saturating_add(self.deletions)
    }
}

/// Totals derived from the file list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub insertions: u32,
    pub deletions: u32,
    /// Always `insertions + deletions`, saturating at `u32::MAX`.
    pub changes: u32,
}

/// Pending changes for one command invocation.
///
/// Immutable once built. Totals are computed from `files` on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    files: Vec<FileChange>,
    diff_text: String,
    scope: DiffScope,
}

impl ChangeSet {
    /// Build a change set. Later entries for an already-seen path are dropped.
    pub fn new(files: Vec<FileChange>, diff_text: String, scope: DiffScope) -> Self {
        let mut seen = HashSet::new();
        let files = files
            .into_iter()
            .filter(|f| seen.insert(f.path.clone()))
            .collect();
        Self {
            files,
            diff_text,
            scope,
        }
    }

    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    pub fn diff_text(&self) -> &str {
        &self.diff_text
    }

    /// The scope the diff text and line counts were taken from.
    pub fn scope(&self) -> &DiffScope {
        &self.scope
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn totals(&self) -> Totals {
        let insertions = self
            .files
            .iter()
            .fold(0u32, |acc, f| acc.saturating_add(f.insertions));
        let deletions = self
            .files
            .iter()
            .fold(0u32, |acc, f| acc.saturating_add(f.deletions));
        Totals {
            insertions,
            deletions,
            changes: insertions.saturating_add(deletions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, insertions: u32, deletions: u32) -> FileChange {
        FileChange {
            path: path.to_string(),
            insertions,
            deletions,
            change_type: ChangeType::Modified,
        }
    }

    #[test]
    fn test_totals_sum_files() {
        let set = ChangeSet::new(
            vec![file("a.rs", 10, 2), file("b.rs", 1, 0)],
            String::new(),
            DiffScope::Staged,
        );
        let totals = set.totals();
        assert_eq!(totals.insertions, 11);
        assert_eq!(totals.deletions, 2);
        assert_eq!(totals.changes, 13);
    }

    #[test]
    fn test_totals_match_file_sums_across_sizes() {
        // Deterministic pseudo-random counts over a range of set sizes.
        let mut seed: u32 = 0x2545_f491;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed % 500
        };

        for size in [0usize, 1, 2, 7, 32, 150] {
            let files: Vec<FileChange> = (0..size)
                .map(|i| file(&format!("src/f{}.rs", i), next(), next()))
                .collect();
            let expected_ins: u32 = files.iter().map(|f| f.insertions).sum();
            let expected_del: u32 = files.iter().map(|f| f.deletions).sum();

            let set = ChangeSet::new(files, String::new(), DiffScope::Staged);
            let totals = set.totals();
            assert_eq!(totals.insertions, expected_ins, "size {}", size);
            assert_eq!(totals.deletions, expected_del, "size {}", size);
            assert_eq!(totals.changes, totals.insertions + totals.deletions);
            assert_eq!(
                totals.changes,
                set.files().iter().map(|f| f.changes()).sum::<u32>()
            );
        }
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let set = ChangeSet::new(
            vec![file("a.rs", u32::MAX, 1), file("b.rs", 5, u32::MAX)],
            String::new(),
            DiffScope::Staged,
        );
        let totals = set.totals();
        assert_eq!(totals.insertions, u32::MAX);
        assert_eq!(totals.deletions, u32::MAX);
        assert_eq!(totals.changes, u32::MAX);
        assert_eq!(set.files()[0].changes(), u32::MAX);
    }

    #[test]
    fn test_totals_of_empty_set() {
        let set = ChangeSet::new(Vec::new(), String::new(), DiffScope::WorkingTree);
        assert!(set.is_empty());
        assert_eq!(set.totals(), Totals::default());
    }

    #[test]
    fn test_duplicate_paths_keep_first() {
        let set = ChangeSet::new(
            vec![file("a.rs", 1, 0), file("b.rs", 2, 0), file("a.rs", 5, 5)],
            String::new(),
            DiffScope::Staged,
        );
        let paths: Vec<_> = set.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.rs", "b.rs"]);
        assert_eq!(set.totals().insertions, 3);
    }

    #[test]
    fn test_change_type_from_letter() {
        assert_eq!(ChangeType::from_letter('M'), ChangeType::Modified);
        assert_eq!(ChangeType::from_letter('A'), ChangeType::Added);
        assert_eq!(ChangeType::from_letter('D'), ChangeType::Deleted);
        assert_eq!(ChangeType::from_letter('R'), ChangeType::Renamed);
        assert_eq!(ChangeType::from_letter('?'), ChangeType::Unknown);
        assert_eq!(ChangeType::from_letter('T'), ChangeType::Unknown);
    }
}
