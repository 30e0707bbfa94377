//! # Output Configuration
//!
//! Colour detection for the CLI and the end-of-batch summary printed to
//! stdout.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::fmt::Write;

use crate::batch::{BatchReport, EntryOutcome, FailureStage};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` and `never` win over the environment; anything else means
    /// auto-detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain alternative otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn describe(config: &OutputConfig, outcome: &EntryOutcome) -> String {
    match outcome {
        EntryOutcome::Cloned { path, ssh_remote } => format!(
            "{} cloned into {}{}",
            emoji(config, "✅", "[OK]"),
            path.display(),
            remote_suffix(ssh_remote.as_deref())
        ),
        EntryOutcome::AlreadyPresent { path, ssh_remote } => format!(
            "{} already present in {}{}",
            emoji(config, "📁", "[PRESENT]"),
            path.display(),
            remote_suffix(ssh_remote.as_deref())
        ),
        EntryOutcome::Planned {
            path,
            clone,
            ssh_remote,
        } => format!(
            "{} {} {}{}",
            emoji(config, "🔎", "[PLAN]"),
            if *clone {
                "would clone into"
            } else {
                "already present in"
            },
            path.display(),
            remote_suffix(ssh_remote.as_deref())
        ),
        EntryOutcome::Skipped { reason } => {
            format!("{} skipped: {}", emoji(config, "⏭️", "[SKIP]"), reason)
        }
        EntryOutcome::Failed { stage, message } => format!(
            "{} {} failed: {}",
            emoji(config, "❌", "[FAIL]"),
            match stage {
                FailureStage::Clone => "clone",
                FailureStage::Remote => "remote",
            },
            message
        ),
        EntryOutcome::NotAttempted => {
            format!("{} not attempted", emoji(config, "⏸️", "[NOT RUN]"))
        }
    }
}

fn remote_suffix(ssh_remote: Option<&str>) -> String {
    ssh_remote
        .map(|url| format!(" (ssh remote: {})", url))
        .unwrap_or_default()
}

/// Render the per-entry lines and the totals line for a finished batch.
pub fn render_summary(config: &OutputConfig, report: &BatchReport) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{}  {}",
            entry.entry.url,
            describe(config, &entry.outcome)
        );
    }

    let summary = report.summary();
    let mut totals = vec![
        format!("{} cloned", summary.cloned),
        format!("{} present", summary.present),
    ];
    if summary.planned > 0 {
        totals.push(format!("{} planned", summary.planned));
    }
    totals.push(format!("{} skipped", summary.skipped));
    totals.push(format!("{} failed", summary.failed));
    if summary.not_attempted > 0 {
        totals.push(format!("{} not attempted", summary.not_attempted));
    }
    let _ = writeln!(out, "{}", totals.join(", "));
    out
}
