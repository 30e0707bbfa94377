//! CLI argument parsing and command dispatch

use std::ffi::OsString;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, warn, LevelFilter};

use clone_repos::exit_codes;
use clone_repos::logging;
use clone_repos::output::OutputConfig;

use crate::commands;

/// Long flags that may also be written with a single dash (`-in`, `-out`, ...).
const SINGLE_DASH_FLAGS: [&str; 7] = [
    "in",
    "out",
    "add-ssh-remote",
    "ssh-user",
    "ssh-remote-name",
    "user",
    "pass",
];

/// Clone Repos - Clone a list of git repositories
#[derive(Parser, Debug)]
#[command(name = "clone-repos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        env = "CLONE_REPOS_LOG",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone every repository listed in the input file
    Clone(commands::clone::CloneArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// Execute the CLI command
    pub fn execute(self) -> ExitCode {
        let output = OutputConfig::from_env_and_flag(&self.color);
        let level = self.log_level.parse().unwrap_or(LevelFilter::Info);
        logging::init(level, output.use_color);

        let result = match self.command {
            Some(Commands::Clone(args)) => commands::clone::execute(args, &output),
            Some(Commands::Completions(args)) => {
                commands::completions::execute(args).map(|()| exit_codes::SUCCESS)
            }
            None => {
                warn!("sub command is required, e.g. clone");
                Ok(exit_codes::ERROR)
            }
        };

        match result {
            Ok(code) => ExitCode::from(code),
            Err(e) => {
                error!("{:#}", e);
                ExitCode::from(exit_codes::ERROR)
            }
        }
    }
}

/// Rewrite `-in`-style flags to `--in` so both spellings parse.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-') else {
                return arg;
            };
            if flag.starts_with('-') {
                return arg;
            }
            let name = flag.split('=').next().unwrap_or(flag);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}
