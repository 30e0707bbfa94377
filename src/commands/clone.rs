//! Clone command implementation
//!
//! The clone command:
//! 1. Validates options into a `CloneConfig`
//! 2. Reads the repo list (an empty list is an error)
//! 3. Runs the batch sequentially through the system `git`
//! 4. Prints a summary and picks the exit code

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};
use log::info;

use clone_repos::batch::BatchCloner;
use clone_repos::config::{CloneConfig, CloneOptions};
use clone_repos::git;
use clone_repos::output::{render_summary, OutputConfig};
use clone_repos::repo_list::read_repo_list;
use clone_repos::repository::SystemGitOperations;

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Input file with one repository URL per line ('#' starts a comment)
    #[arg(long = "in", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output directory for the repos
    #[arg(long = "out", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Add an ssh remote along with the http(s) origin
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub add_ssh_remote: bool,

    /// Ssh user to access the repo
    #[arg(long, value_name = "NAME", default_value = "git")]
    pub ssh_user: String,

    /// Remote name for ssh access, e.g. 'github' or 'upstream'
    #[arg(long, value_name = "NAME")]
    pub ssh_remote_name: Option<String>,

    /// Auth: repo user
    #[arg(long, value_name = "USER", env = "CLONE_REPOS_USER")]
    pub user: Option<String>,

    /// Auth: repo password or token
    #[arg(
        long,
        value_name = "PASSWORD",
        env = "CLONE_REPOS_PASS",
        hide_env_values = true
    )]
    pub pass: Option<String>,

    /// Stop the batch at the first clone or remote failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Show what would be done without cloning or touching remotes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress the summary (log lines still go to stderr)
    #[arg(short, long)]
    pub quiet: bool,
}

impl CloneArgs {
    fn options(&self) -> CloneOptions {
        CloneOptions {
            repo_list: self.input.clone(),
            output_dir: self.output.clone(),
            add_ssh_remote: self.add_ssh_remote,
            ssh_user: self.ssh_user.clone(),
            ssh_remote_name: self.ssh_remote_name.clone(),
            user: self.user.clone(),
            password: self.pass.clone(),
            fail_fast: self.fail_fast,
            dry_run: self.dry_run,
        }
    }
}

/// Execute the clone command, returning the process exit code.
pub fn execute(args: CloneArgs, output: &OutputConfig) -> Result<u8> {
    let config = CloneConfig::from_options(args.options())?;
    info!(
        "Using {} file for incoming repos",
        config.repo_list.display()
    );
    info!(
        "Using {} output directory for the repos",
        config.output_dir.display()
    );

    let entries = read_repo_list(&config.repo_list)?;
    if entries.is_empty() {
        bail!(
            "No repos defined for cloning in {}",
            config.repo_list.display()
        );
    }

    if !config.dry_run && !git::is_available() {
        bail!("git executable not found on PATH");
    }

    info!("----------------------------------------------------");

    let git_ops = SystemGitOperations;
    let report = BatchCloner::new(&config, &git_ops).run(&entries);

    if !args.quiet {
        print!("{}", render_summary(output, &report));
    }

    Ok(report.exit_code())
}
