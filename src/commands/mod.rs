//! # CLI Command Implementations
//!
//! Each subcommand of `clone-repos` lives in its own file with:
//! - an `Args` struct derived using `clap`;
//! - an `execute` function that takes the parsed `Args` and calls into the
//!   `clone_repos` library.

pub mod clone;
pub mod completions;
