use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::Credentials;
use crate::error::Error;
use crate::remote_url::with_username;

/// Build a `git` command that never prompts on the terminal.
fn git() -> Command {
    let mut command = Command::new("git");
    command.env("GIT_TERMINAL_PROMPT", "0");
    command
}

/// Environment variable the credential helper reads the password from.
const PASSWORD_ENV: &str = "CLONE_REPOS_GIT_PASSWORD";

/// Credential helper answering `get` with the password from [`PASSWORD_ENV`].
const PASSWORD_HELPER: &str =
    "!f() { test \"$1\" = get || return 0; echo \"password=$CLONE_REPOS_GIT_PASSWORD\"; }; f";

/// Markers git prints when a transfer was refused for lack of credentials.
const AUTH_FAILURE_MARKERS: [&str; 4] = [
    "Authentication failed",
    "could not read Username",
    "could not read Password",
    "Permission denied (publickey",
];

/// Collapse git's stderr into a single line.
fn one_line(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run `git -C <repo_dir> <args>` and return its stdout.
fn run_in(repo_dir: &Path, args: &[&str]) -> Result<String, Error> {
    let command_label = args.join(" ");
    let output = git()
        .arg("-C")
        .arg(repo_dir)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command_label.clone(),
            path: repo_dir.to_path_buf(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command: command_label,
            path: repo_dir.to_path_buf(),
            stderr: one_line(&String::from_utf8_lossy(&output.stderr)),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Build the `git clone` command for `transfer_url`.
///
/// A password is handed over through the child's environment and an inline
/// credential helper, so it never shows up in the argument list.
fn clone_command(transfer_url: &str, target_dir: &Path, credentials: Option<&Credentials>) -> Command {
    let mut command = git();
    if let Some(password) = credentials.and_then(|c| c.password.as_deref()) {
        command
            .args(["-c", "credential.helper="])
            .arg("-c")
            .arg(format!("credential.helper={}", PASSWORD_HELPER))
            .env(PASSWORD_ENV, password);
    }
    command
        .args(["clone", "--quiet", "--", transfer_url])
        .arg(target_dir);
    command
}

/// Clone a repository into `target_dir` as a full, non-bare working copy
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
///
/// With explicit `credentials` the user name goes into the transfer URL and
/// the password through a credential helper. `origin` is reset to the plain
/// URL once the clone succeeds.
pub fn clone(url: &str, target_dir: &Path, credentials: Option<&Credentials>) -> Result<(), Error> {
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let transfer_url = match credentials {
        Some(credentials) => with_username(url, credentials)?,
        None => url.to_string(),
    };

    let output = clone_command(&transfer_url, target_dir, credentials)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: None,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).replace(&transfer_url, url);
        return Err(clone_failure(url, &stderr));
    }

    if transfer_url != url {
        set_remote_url(target_dir, "origin", url)?;
    }

    Ok(())
}

fn clone_failure(url: &str, stderr: &str) -> Error {
    // Provide helpful error message for common auth failures
    let hint = if AUTH_FAILURE_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker))
    {
        Some(
            "Make sure you have access to the repository. For private repos pass \
            --user/--pass, configure a git credential helper, or add your SSH key \
            to ssh-agent"
                .to_string(),
        )
    } else {
        None
    };

    Error::GitClone {
        url: url.to_string(),
        message: one_line(stderr),
        hint,
    }
}

/// Check that `repo_dir` is the top level of a git working tree.
///
/// A directory nested inside some other repository is rejected even though
/// git itself would happily operate on it.
pub fn open(repo_dir: &Path) -> Result<(), Error> {
    let toplevel = run_in(repo_dir, &["rev-parse", "--show-toplevel"])?;
    let toplevel = toplevel.trim();

    let expected = fs::canonicalize(repo_dir)?;
    let actual = fs::canonicalize(toplevel)?;
    if expected != actual {
        return Err(Error::GitCommand {
            command: "rev-parse --show-toplevel".to_string(),
            path: repo_dir.to_path_buf(),
            stderr: format!("directory belongs to the repository at {}", toplevel),
        });
    }

    Ok(())
}

/// List the names of the remotes configured in `repo_dir`.
pub fn list_remotes(repo_dir: &Path) -> Result<Vec<String>, Error> {
    let stdout = run_in(repo_dir, &["remote"])?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Add a remote called `name` pointing at `url`.
pub fn add_remote(repo_dir: &Path, name: &str, url: &str) -> Result<(), Error> {
    run_in(repo_dir, &["remote", "add", name, url]).map(|_| ())
}

/// Remove the remote called `name`.
pub fn remove_remote(repo_dir: &Path, name: &str) -> Result<(), Error> {
    run_in(repo_dir, &["remote", "remove", name]).map(|_| ())
}

/// Point an existing remote at a different URL.
pub fn set_remote_url(repo_dir: &Path, name: &str, url: &str) -> Result<(), Error> {
    run_in(repo_dir, &["remote", "set-url", name, url]).map(|_| ())
}

/// Whether a usable `git` executable is on the PATH.
pub fn is_available() -> bool {
    git()
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
