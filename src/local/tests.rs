//! Unit tests for local repository discovery.

use git2::Repository;
use rstest::rstest;
use tempfile::TempDir;

use super::discovery::{current_repository, discover_repository};
use super::error::LocalDiscoveryError;

/// Initialises a repository with the given `(name, url)` remotes.
fn repo_with_remotes(remotes: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("should create temp directory");
    let repo = Repository::init(temp_dir.path()).expect("should init repository");
    for (name, url) in remotes {
        repo.remote(name, url).expect("should add remote");
    }
    temp_dir
}

#[rstest]
fn reads_slug_from_origin() {
    let dir = repo_with_remotes(&[("origin", "git@github.com:octo/repo.git")]);

    let local = discover_repository(dir.path()).expect("should discover repository");

    assert_eq!(local.slug(), "octo/repo");
    assert_eq!(local.remote_name(), "origin");
    assert!(local.remote().is_github_com());
}

#[rstest]
fn prefers_upstream_over_origin() {
    let dir = repo_with_remotes(&[
        ("origin", "https://github.com/fork-owner/repo.git"),
        ("upstream", "https://github.com/octo/repo.git"),
    ]);

    let local = discover_repository(dir.path()).expect("should discover repository");

    assert_eq!(local.slug(), "octo/repo");
    assert_eq!(local.remote_name(), "upstream");
}

#[rstest]
fn falls_back_to_any_parseable_remote() {
    let dir = repo_with_remotes(&[
        ("backup", "/srv/git/repo.git"),
        ("mirror", "https://ghe.example.com/team/service"),
    ]);

    let local = discover_repository(dir.path()).expect("should discover repository");

    assert_eq!(local.slug(), "team/service");
    assert_eq!(local.remote_name(), "mirror");
}

#[rstest]
fn discovers_from_nested_directory() {
    let dir = repo_with_remotes(&[("origin", "https://github.com/octo/repo")]);
    let nested = dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).expect("should create nested directory");

    let local = discover_repository(&nested).expect("should discover repository");

    assert_eq!(local.slug(), "octo/repo");
}

#[rstest]
fn reports_missing_remotes() {
    let dir = repo_with_remotes(&[]);

    let result = discover_repository(dir.path());

    assert_eq!(result, Err(LocalDiscoveryError::NoRemotes));
}

#[rstest]
fn reports_unusable_remotes() {
    let dir = repo_with_remotes(&[("origin", "/srv/git/repo.git")]);

    let result = discover_repository(dir.path());

    assert_eq!(
        result,
        Err(LocalDiscoveryError::NoUsableRemote {
            checked: "origin".to_owned()
        })
    );
}

#[rstest]
fn reports_directories_outside_a_checkout() {
    let dir = TempDir::new().expect("should create temp directory");

    let result = discover_repository(dir.path());

    assert_eq!(result, Err(LocalDiscoveryError::NotARepository));
}

#[rstest]
fn override_variable_wins() {
    let _guard = env_lock::lock_env([("GH_REPO", Some(" octo/override "))]);

    let slug = current_repository().expect("override should be used");

    assert_eq!(slug, "octo/override");
}

#[rstest]
fn discovery_errors_convert_into_ping_errors() {
    let error = crate::error::PingError::from(LocalDiscoveryError::NoRemotes);

    assert_eq!(
        error.to_string(),
        "could not detect repository: repository has no remotes configured. \
         Please specify a repository using the --repository flag"
    );
}
