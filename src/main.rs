//! # clone-repos CLI
//!
//! This is the binary entry point for the `clone-repos` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`, including the single-dash
//!   long flags (`-in`, `-out`) of older invocations.
//! - Executing the appropriate command based on the parsed arguments.
//! - Turning the outcome into a process exit code.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::Cli::parse_args().execute()
}
