// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for status-context-git
//!
//! These tests build throwaway repositories with `git2` and check what the
//! collaborator reads back from them.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};
use similar_asserts::assert_eq;
use status_context_core::{ReporterConfig, StatusReporter};
use status_context_git::{GitError, GitRepo, RecentCommit, SnapshotOptions};
use tempfile::TempDir;

/// Create an empty repository whose initial branch is `main`
fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("create temp dir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).expect("init repo");
    (dir, repo)
}

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write file");
}

/// Stage everything in the working tree and commit it on HEAD
fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("open index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("stage files");
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let signature = Signature::now("Test Author", "test@example.com").expect("signature");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("commit")
}

fn stage(repo: &Repository, relative: &str) {
    let mut index = repo.index().expect("open index");
    index.add_path(Path::new(relative)).expect("stage file");
    index.write().expect("write index");
}

fn status_lines(repo: &GitRepo) -> Vec<String> {
    repo.status_entries()
        .expect("read status")
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_discover_from_subdirectory() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "src/lib.rs", "pub fn f() {}\n");
    commit_all(&repo, "initial");

    let discovered = GitRepo::discover(dir.path().join("src")).expect("discover");
    assert!(!discovered.is_bare());
    assert!(discovered.workdir().is_some());
}

#[test]
fn test_discover_outside_repository() {
    let dir = TempDir::new().expect("create temp dir");
    let result = GitRepo::open(dir.path());
    assert!(matches!(result, Err(GitError::RepositoryNotFound { .. })));
}

#[test]
fn test_clean_working_tree() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "README.md", "hello\n");
    commit_all(&repo, "initial");

    let git = GitRepo::open(dir.path()).expect("open");
    assert!(status_lines(&git).is_empty());
}

#[test]
fn test_modified_staged_and_untracked() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "src/main.rs", "fn main() {}\n");
    write_file(dir.path(), "src/lib.rs", "pub fn f() {}\n");
    commit_all(&repo, "initial");

    write_file(dir.path(), "src/main.rs", "fn main() { println!(\"hi\"); }\n");
    write_file(dir.path(), "src/new.rs", "pub fn g() {}\n");
    stage(&repo, "src/new.rs");
    write_file(dir.path(), "notes.txt", "todo\n");

    let git = GitRepo::open(dir.path()).expect("open");
    assert_eq!(
        status_lines(&git),
        vec![
            " M src/main.rs".to_string(),
            "A  src/new.rs".to_string(),
            "?? notes.txt".to_string(),
        ]
    );
}

#[test]
fn test_untracked_directories_are_collapsed() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "package.json", "{}\n");
    commit_all(&repo, "initial");

    for i in 0..25 {
        write_file(
            dir.path(),
            &format!("node_modules/pkg{i}/index.js"),
            "module.exports = {};\n",
        );
    }

    let git = GitRepo::open(dir.path()).expect("open");
    let entries = git.status_entries().expect("read status");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].to_line(), "?? node_modules/");
    assert!(!entries[0].tracked);
}

#[test]
fn test_staged_rename_reports_both_paths() {
    let (dir, repo) = init_repo();
    write_file(
        dir.path(),
        "old_name.txt",
        "some content that is long enough to be recognised as the same file\n",
    );
    commit_all(&repo, "initial");

    fs::rename(dir.path().join("old_name.txt"), dir.path().join("new_name.txt"))
        .expect("rename");
    let mut index = repo.index().expect("open index");
    index
        .remove_path(Path::new("old_name.txt"))
        .expect("unstage old path");
    index
        .add_path(Path::new("new_name.txt"))
        .expect("stage new path");
    index.write().expect("write index");

    let git = GitRepo::open(dir.path()).expect("open");
    let entries = git.status_entries().expect("read status");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].code, "R ");
    assert_eq!(entries[0].path, "new_name.txt");
    assert_eq!(entries[0].orig_path.as_deref(), Some("old_name.txt"));
}

#[test]
fn test_deleted_file() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "gone.txt", "bye\n");
    write_file(dir.path(), "kept.txt", "hi\n");
    commit_all(&repo, "initial");
    fs::remove_file(dir.path().join("gone.txt")).expect("delete");

    let git = GitRepo::open(dir.path()).expect("open");
    assert_eq!(status_lines(&git), vec![" D gone.txt".to_string()]);
}

#[test]
fn test_current_and_main_branch() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "a.txt", "a\n");
    let head = commit_all(&repo, "initial");

    let git = GitRepo::open(dir.path()).expect("open");
    assert_eq!(git.current_branch().expect("branch").as_deref(), Some("main"));
    assert_eq!(git.main_branch().as_deref(), Some("main"));

    let commit = repo.find_commit(head).expect("find commit");
    repo.branch("feature/status", &commit, false)
        .expect("create branch");
    repo.set_head("refs/heads/feature/status").expect("switch");
    assert_eq!(
        git.current_branch().expect("branch").as_deref(),
        Some("feature/status")
    );
    assert_eq!(git.main_branch().as_deref(), Some("main"));
}

#[test]
fn test_master_is_main_branch_fallback() {
    let dir = TempDir::new().expect("create temp dir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("master");
    let repo = Repository::init_opts(dir.path(), &opts).expect("init repo");
    write_file(dir.path(), "a.txt", "a\n");
    commit_all(&repo, "initial");

    let git = GitRepo::open(dir.path()).expect("open");
    assert_eq!(git.main_branch().as_deref(), Some("master"));
}

#[test]
fn test_detached_head_has_no_branch() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "a.txt", "a\n");
    let head = commit_all(&repo, "initial");
    repo.set_head_detached(head).expect("detach");

    let git = GitRepo::open(dir.path()).expect("open");
    assert_eq!(git.current_branch().expect("branch"), None);
}

#[test]
fn test_unborn_branch_is_named() {
    let (dir, _repo) = init_repo();
    let git = GitRepo::open(dir.path()).expect("open");

    assert_eq!(git.current_branch().expect("branch").as_deref(), Some("main"));
    assert_eq!(git.main_branch(), None);
    assert!(git.recent_commits(5).expect("commits").is_empty());
}

#[test]
fn test_recent_commits_newest_first() {
    let (dir, repo) = init_repo();
    for i in 0..4 {
        write_file(dir.path(), "counter.txt", &format!("{i}\n"));
        commit_all(&repo, &format!("commit {i}\n\nbody {i}"));
    }

    let git = GitRepo::open(dir.path()).expect("open");
    let commits = git.recent_commits(3).expect("commits");
    let subjects: Vec<&str> = commits.iter().map(RecentCommit::subject).collect();
    assert_eq!(subjects, vec!["commit 3", "commit 2", "commit 1"]);
    assert!(commits.iter().all(|c| c.sha.len() == 40 && c.short_sha().len() == 7));
    assert!(git.recent_commits(0).expect("commits").is_empty());
}

#[test]
fn test_bare_repository_has_no_status() {
    let dir = TempDir::new().expect("create temp dir");
    Repository::init_bare(dir.path()).expect("init bare");

    let git = GitRepo::open(dir.path()).expect("open");
    assert!(git.is_bare());
    assert!(matches!(
        git.status_entries(),
        Err(GitError::BareRepository { .. })
    ));
}

#[test]
fn test_snapshot_respects_options() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "a.txt", "a\n");
    commit_all(&repo, "first");
    write_file(dir.path(), "a.txt", "b\n");

    let git = GitRepo::open(dir.path()).expect("open");
    let full = git.snapshot(&SnapshotOptions::default());
    assert_eq!(full.branch.as_deref(), Some("main"));
    assert_eq!(full.main_branch.as_deref(), Some("main"));
    assert_eq!(full.status.as_ref().map(Vec::len), Some(1));
    assert_eq!(full.commits.len(), 1);
    assert_eq!(full.commits[0].subject, "first");

    let status_only = git.snapshot(&SnapshotOptions {
        include_branch: false,
        include_main_branch: false,
        include_status: true,
        commit_count: 0,
    });
    assert_eq!(status_only.branch, None);
    assert_eq!(status_only.main_branch, None);
    assert!(status_only.commits.is_empty());
    assert!(status_only.status.is_some());
}

#[test]
fn test_snapshot_renders_bounded_report() {
    let (dir, repo) = init_repo();
    write_file(dir.path(), "src/main.rs", "fn main() {}\n");
    commit_all(&repo, "feat: initial");

    write_file(dir.path(), "src/main.rs", "fn main() { todo!() }\n");
    for i in 0..30 {
        write_file(dir.path(), &format!("node_modules/p{i}/index.js"), "x\n");
        write_file(dir.path(), &format!("scratch/file{i}.txt"), "x\n");
    }

    let git = GitRepo::open(dir.path()).expect("open");
    let snapshot = git.snapshot(&SnapshotOptions::default());
    let report = StatusReporter::new(&ReporterConfig::default())
        .report(&snapshot)
        .expect("report")
        .to_text();

    assert!(report.contains("Current branch: main"));
    assert!(report.contains(
        "\nStatus:\n M src/main.rs\n?? scratch/\n[Filtered: 1 untracked files in ignored paths]"
    ));
    assert!(!report.contains("node_modules/p0"));
    assert!(report.ends_with(&format!(
        "Recent commits:\n{} feat: initial",
        &snapshot.commits[0].short_hash
    )));
}
