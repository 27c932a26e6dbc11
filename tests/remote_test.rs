//! Integration tests for remote branch resolution and pending commits.

mod common;

use common::TestRepo;
use gromit::git::{pending_commits, resolve_remote_branch, RemoteBranch};
use gromit::GitBackend;

#[test]
fn test_no_origin_is_unresolved() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "one\n", "chore: init");

    assert_eq!(
        resolve_remote_branch(&test_repo.backend()),
        RemoteBranch::Unresolved
    );
}

#[test]
fn test_origin_without_branches_is_unresolved() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "one\n", "chore: init");
    test_repo.add_origin("git@github.com:acme/app.git");

    assert_eq!(
        resolve_remote_branch(&test_repo.backend()),
        RemoteBranch::Unresolved
    );
}

#[test]
fn test_current_branch_preferred_over_fallbacks() {
    let test_repo = TestRepo::new();
    let oid = test_repo.commit_file("a.txt", "one\n", "chore: init");
    test_repo.add_origin("git@github.com:acme/app.git");

    let current = test_repo.head_branch();
    test_repo.set_remote_branch("main", oid);
    test_repo.set_remote_branch(&current, oid);

    assert_eq!(
        resolve_remote_branch(&test_repo.backend()),
        RemoteBranch::Resolved(format!("origin/{}", current))
    );
}

#[test]
fn test_falls_back_to_origin_main() {
    let test_repo = TestRepo::new();
    let oid = test_repo.commit_file("a.txt", "one\n", "chore: init");
    test_repo.add_origin("https://gitlab.com/acme/app.git");

    // A branch name that exists nowhere on the remote.
    let commit = test_repo.repo.find_commit(oid).unwrap();
    test_repo.repo.branch("topic", &commit, false).unwrap();
    test_repo.repo.set_head("refs/heads/topic").unwrap();
    test_repo.set_remote_branch("main", oid);

    assert_eq!(
        resolve_remote_branch(&test_repo.backend()).as_deref(),
        Some("origin/main")
    );
}

#[test]
fn test_pending_commits_are_oldest_first() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit_file("a.txt", "one\n", "chore: init");
    test_repo.add_origin("git@github.com:acme/app.git");
    test_repo.set_remote_branch("main", base);

    test_repo.commit_file("a.txt", "two\n", "feat: first");
    test_repo.commit_file("a.txt", "three\n", "feat: second");

    let commits =
        pending_commits(&test_repo.backend(), "origin/main").expect("Failed to list commits");

    let subjects: Vec<_> = commits.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects, vec!["feat: first", "feat: second"]);
    assert!(commits.iter().all(|c| c.short_id.len() == 7));
    assert!(commits.iter().all(|c| c.author == "Test User"));
}

#[test]
fn test_up_to_date_has_no_pending_commits() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit_file("a.txt", "one\n", "chore: init");
    test_repo.set_remote_branch("main", base);

    let commits =
        pending_commits(&test_repo.backend(), "origin/main").expect("Failed to list commits");
    assert!(commits.is_empty());
}

#[test]
fn test_backend_commit_stages_everything() {
    let test_repo = TestRepo::new();
    test_repo.commit_file("a.txt", "one\n", "chore: init");
    test_repo.write_file("b.txt", "new\n");

    let backend = test_repo.backend();
    backend.add(".").expect("Failed to stage");
    let short_id = backend.commit("feat: add b").expect("Failed to commit");

    assert_eq!(short_id.len(), 7);
    assert!(backend.status().unwrap().is_empty());
    let log = backend.log("HEAD").unwrap();
    assert_eq!(log.commits[0].subject, "feat: add b");
}
