//! # clone-repos
//!
//! Clone every repository listed in a plain-text file into one output
//! directory, optionally registering an extra SSH remote on each clone.
//!
//! ## Quick Example
//!
//! ```
//! use clone_repos::remote_url::{repo_dir_name, ssh_remote_url};
//! use clone_repos::repo_list::parse_repo_list;
//!
//! let entries = parse_repo_list("# team repos\nhttps://github.com/vnnv/go-epay.git\n");
//! let url = &entries[0].url;
//!
//! assert_eq!(repo_dir_name(url).unwrap(), "go-epay");
//! assert_eq!(ssh_remote_url(url, "git"), "git@github.com:vnnv/go-epay.git");
//! ```
//!
//! ## Execution Flow
//!
//! 1. **Configuration (`config`)**: options are validated once into an
//!    immutable `CloneConfig`.
//! 2. **Reading (`repo_list`)**: the list file becomes ordered `RepoEntry`
//!    values.
//! 3. **Batch (`batch`)**: for each entry, in order, derive the directory name
//!    (`remote_url`), probe the target (`probe`), clone or reuse it, and
//!    replace the SSH remote.
//!
//! The transfer itself is done by the system `git` (`git`), reached only
//! through the `GitOperations` trait (`repository`).

pub mod batch;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod output;
pub mod probe;
pub mod remote_url;
pub mod repo_list;
pub mod repository;

#[cfg(test)]
mod remote_url_proptest;
