//! # Clone Configuration
//!
//! `CloneConfig` is the immutable, validated form of the `clone` command's
//! options. It is built once from raw option values with
//! [`CloneConfig::from_options`] and then borrowed by the batch orchestrator
//! for the whole run.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Username and optional password passed through to HTTP(S)/FTP clones.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

// Keep passwords out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// The additional SSH remote registered on every repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshRemote {
    /// User in front of the `@`, usually `git`.
    pub user: String,
    /// Remote name, e.g. `github` or `upstream`.
    pub name: String,
}

/// What the batch does after a clone or remote operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure and move on to the next entry.
    #[default]
    Continue,
    /// Stop processing the remaining entries.
    Abort,
}

/// Validated configuration for one batch run.
#[derive(Debug, Clone)]
pub struct CloneConfig {
    pub repo_list: PathBuf,
    pub output_dir: PathBuf,
    pub ssh_remote: Option<SshRemote>,
    pub credentials: Option<Credentials>,
    pub error_policy: ErrorPolicy,
    pub dry_run: bool,
}

/// Raw option values as they come from the command line.
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    pub repo_list: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub add_ssh_remote: bool,
    pub ssh_user: String,
    pub ssh_remote_name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub fail_fast: bool,
    pub dry_run: bool,
}

impl CloneConfig {
    /// Validate raw options and build the configuration.
    pub fn from_options(options: CloneOptions) -> Result<Self> {
        let repo_list = non_empty_path(options.repo_list)
            .ok_or_else(|| config_error("You did not supply an input file name (--in)"))?;
        let output_dir = non_empty_path(options.output_dir)
            .ok_or_else(|| config_error("You did not supply an output directory (--out)"))?;

        let ssh_remote = if options.add_ssh_remote {
            if options.ssh_user.is_empty() {
                return Err(config_error(
                    "Please specify a username for ssh access (--ssh-user)",
                ));
            }
            let name = non_empty(options.ssh_remote_name).ok_or_else(|| {
                config_error(
                    "Please specify a name for the ssh remote, e.g. 'github' or 'upstream' (--ssh-remote-name)",
                )
            })?;
            Some(SshRemote {
                user: options.ssh_user,
                name,
            })
        } else {
            None
        };

        let credentials = match (non_empty(options.user), options.password) {
            (Some(user), password) => Some(Credentials { user, password }),
            (None, Some(_)) => {
                return Err(config_error("A password (--pass) requires a user (--user)"))
            }
            (None, None) => None,
        };

        Ok(Self {
            repo_list,
            output_dir,
            ssh_remote,
            credentials,
            error_policy: if options.fail_fast {
                ErrorPolicy::Abort
            } else {
                ErrorPolicy::Continue
            },
            dry_run: options.dry_run,
        })
    }
}

fn config_error(message: &str) -> Error {
    Error::Config {
        message: message.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}
