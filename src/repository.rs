//! # Version-Control Seam
//!
//! Everything `clone-repos` asks of the version-control engine goes through
//! the `GitOperations` trait: cloning, opening an existing working copy, and
//! managing its remotes. The batch orchestrator and the target prober only
//! ever see the trait.
//!
//! In the main application `SystemGitOperations` is used, which wraps the
//! system `git` command (see [`crate::git`]). In tests it is replaced with
//! mock implementations that record calls and simulate failures without
//! touching the network.

use std::path::Path;

use crate::config::Credentials;
use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Plain clone of `url` into `target_dir`, creating parent directories.
    fn clone_repo(
        &self,
        url: &str,
        target_dir: &Path,
        credentials: Option<&Credentials>,
    ) -> Result<()>;

    /// Succeeds when `repo_dir` is itself a repository's working tree.
    fn open(&self, repo_dir: &Path) -> Result<()>;

    /// Names of the remotes configured in `repo_dir`.
    fn remotes(&self, repo_dir: &Path) -> Result<Vec<String>>;

    /// Register remote `name` pointing at `url`.
    fn create_remote(&self, repo_dir: &Path, name: &str, url: &str) -> Result<()>;

    /// Delete remote `name`.
    fn delete_remote(&self, repo_dir: &Path, name: &str) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGitOperations;

impl GitOperations for SystemGitOperations {
    fn clone_repo(
        &self,
        url: &str,
        target_dir: &Path,
        credentials: Option<&Credentials>,
    ) -> Result<()> {
        crate::git::clone(url, target_dir, credentials)
    }

    fn open(&self, repo_dir: &Path) -> Result<()> {
        crate::git::open(repo_dir)
    }

    fn remotes(&self, repo_dir: &Path) -> Result<Vec<String>> {
        crate::git::list_remotes(repo_dir)
    }

    fn create_remote(&self, repo_dir: &Path, name: &str, url: &str) -> Result<()> {
        crate::git::add_remote(repo_dir, name, url)
    }

    fn delete_remote(&self, repo_dir: &Path, name: &str) -> Result<()> {
        crate::git::remove_remote(repo_dir, name)
    }
}

/// Point remote `name` at `url`, deleting any remote of the same name first.
///
/// Running it twice leaves exactly one remote called `name`.
pub fn replace_remote(
    git: &dyn GitOperations,
    repo_dir: &Path,
    name: &str,
    url: &str,
) -> Result<()> {
    let remotes = git.remotes(repo_dir)?;
    if remotes.iter().any(|remote| remote == name) {
        git.delete_remote(repo_dir, name)?;
    }
    git.create_remote(repo_dir, name, url)
}
