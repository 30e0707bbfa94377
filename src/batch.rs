//! # Batch Clone Orchestrator
//!
//! `BatchCloner` walks the repo list strictly in order. For each entry it
//! derives the target directory, probes it, clones when needed and, if
//! configured, points the SSH remote at the rewritten URL.
//!
//! Low-level helpers only return errors. Severity is decided here:
//!
//! - a malformed URL or an occupied target directory skips the entry;
//! - a clone or remote failure marks the entry failed, and with
//!   [`ErrorPolicy::Abort`] also stops the batch.
//!
//! Nothing is retried. Every entry produces one [`EntryReport`] so the caller
//! can print a summary and choose the exit code.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::config::{CloneConfig, ErrorPolicy};
use crate::error::Result;
use crate::exit_codes;
use crate::probe::probe_target;
use crate::remote_url::{repo_dir_name, ssh_remote_url};
use crate::repo_list::RepoEntry;
use crate::repository::{replace_remote, GitOperations};

/// Which step of a failed entry went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Clone,
    Remote,
}

/// What happened to a single repo list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Freshly cloned. `ssh_remote` is the registered SSH URL, if any.
    Cloned {
        path: PathBuf,
        ssh_remote: Option<String>,
    },
    /// The target already held the repository; no clone was attempted.
    AlreadyPresent {
        path: PathBuf,
        ssh_remote: Option<String>,
    },
    /// Dry run: what a real run would do.
    Planned {
        path: PathBuf,
        clone: bool,
        ssh_remote: Option<String>,
    },
    /// Malformed URL or unusable target directory.
    Skipped { reason: String },
    /// Clone or remote registration failed.
    Failed { stage: FailureStage, message: String },
    /// The batch was aborted before reaching this entry.
    NotAttempted,
}

impl EntryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, EntryOutcome::Failed { .. })
    }
}

/// An entry together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub entry: RepoEntry,
    pub outcome: EntryOutcome,
}

/// Outcome counts for a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub cloned: usize,
    pub present: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

/// Per-entry results of one batch run, in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<EntryReport>,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for report in &self.entries {
            match report.outcome {
                EntryOutcome::Cloned { .. } => summary.cloned += 1,
                EntryOutcome::AlreadyPresent { .. } => summary.present += 1,
                EntryOutcome::Planned { .. } => summary.planned += 1,
                EntryOutcome::Skipped { .. } => summary.skipped += 1,
                EntryOutcome::Failed { .. } => summary.failed += 1,
                EntryOutcome::NotAttempted => summary.not_attempted += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|report| report.outcome.is_failure())
    }

    /// Exit code for the process: skipped entries do not count as failures.
    pub fn exit_code(&self) -> u8 {
        if self.has_failures() {
            exit_codes::PARTIAL_FAILURE
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// Runs a batch of clones against one configuration.
pub struct BatchCloner<'a> {
    config: &'a CloneConfig,
    git: &'a dyn GitOperations,
}

impl<'a> BatchCloner<'a> {
    pub fn new(config: &'a CloneConfig, git: &'a dyn GitOperations) -> Self {
        Self { config, git }
    }

    /// Process every entry in order and report the outcome of each.
    pub fn run(&self, entries: &[RepoEntry]) -> BatchReport {
        let mut reports = Vec::with_capacity(entries.len());
        let mut aborted = false;

        for (index, entry) in entries.iter().enumerate() {
            let outcome = if aborted {
                EntryOutcome::NotAttempted
            } else {
                self.process(entry)
            };

            if outcome.is_failure() && self.config.error_policy == ErrorPolicy::Abort {
                let remaining = entries.len() - index - 1;
                if remaining > 0 {
                    error!("Aborting batch, {} repo(s) not attempted", remaining);
                }
                aborted = true;
            }

            reports.push(EntryReport {
                entry: entry.clone(),
                outcome,
            });
        }

        BatchReport { entries: reports }
    }

    fn process(&self, entry: &RepoEntry) -> EntryOutcome {
        let url = entry.url.as_str();
        info!("git clone {}", url);

        let name = match repo_dir_name(url) {
            Ok(name) => name,
            Err(e) => {
                warn!("Skipping line {}: {}", entry.line, e);
                return EntryOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };
        let target = self.config.output_dir.join(name);

        let state = match probe_target(self.git, &target) {
            Ok(state) => state,
            Err(e) => {
                error!("Can not clone repo {}: {}", url, e);
                return EntryOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        if self.config.dry_run {
            return self.plan(url, target, state.needs_clone());
        }

        if state.needs_clone() {
            info!("Cloning in {}", target.display());
            if let Err(e) = self
                .git
                .clone_repo(url, &target, self.config.credentials.as_ref())
            {
                error!("{}", e);
                return EntryOutcome::Failed {
                    stage: FailureStage::Clone,
                    message: e.to_string(),
                };
            }
            info!("Cloned {}", url);
        } else {
            info!("Repo {} is already cloned in {}", url, target.display());
        }

        let ssh_remote = match self.register_ssh_remote(&target, url) {
            Ok(ssh_remote) => ssh_remote,
            Err(e) => {
                error!("Can not set ssh remote for {}: {}", url, e);
                return EntryOutcome::Failed {
                    stage: FailureStage::Remote,
                    message: e.to_string(),
                };
            }
        };

        if state.needs_clone() {
            EntryOutcome::Cloned {
                path: target,
                ssh_remote,
            }
        } else {
            EntryOutcome::AlreadyPresent {
                path: target,
                ssh_remote,
            }
        }
    }

    fn plan(&self, url: &str, target: PathBuf, clone: bool) -> EntryOutcome {
        if clone {
            info!("Would clone {} into {}", url, target.display());
        } else {
            info!("Repo {} is already cloned in {}", url, target.display());
        }

        let ssh_remote = self.config.ssh_remote.as_ref().map(|ssh| {
            let ssh_url = ssh_remote_url(url, &ssh.user);
            info!("Would set remote {} to {}", ssh.name, ssh_url);
            ssh_url
        });

        EntryOutcome::Planned {
            path: target,
            clone,
            ssh_remote,
        }
    }

    /// Replace the configured SSH remote on `repo_dir`, if one is configured.
    fn register_ssh_remote(&self, repo_dir: &Path, url: &str) -> Result<Option<String>> {
        let Some(ssh) = &self.config.ssh_remote else {
            return Ok(None);
        };

        let ssh_url = ssh_remote_url(url, &ssh.user);
        replace_remote(self.git, repo_dir, &ssh.name, &ssh_url)?;
        info!("Remote {} -> {}", ssh.name, ssh_url);
        Ok(Some(ssh_url))
    }
}
