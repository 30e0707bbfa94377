//! # Repository List Reader
//!
//! Parses the plain-text input file of `clone-repos`: one URL per line, with
//! blank lines and `#` comments ignored.
//!
//! ```
//! use clone_repos::repo_list::parse_repo_list;
//!
//! let entries = parse_repo_list("# mirrors\nhttps://github.com/org/a.git\n\n  https://github.com/org/b.git  \n");
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[1].url, "https://github.com/org/b.git");
//! assert_eq!(entries[1].line, 4);
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// A single repository to clone, as read from the list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Source URL, whitespace-trimmed.
    pub url: String,
    /// 1-based line number in the list file.
    pub line: usize,
}

/// Parse list contents into entries, preserving file order.
pub fn parse_repo_list(contents: &str) -> Vec<RepoEntry> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(RepoEntry {
                url: line.to_string(),
                line: index + 1,
            })
        })
        .collect()
}

/// Read and parse the list file at `path`.
///
/// An unreadable file is an error. An empty result is not; the caller decides
/// what "nothing to do" means.
pub fn read_repo_list(path: &Path) -> Result<Vec<RepoEntry>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_repo_list(&contents);
    debug!("Read {} repo(s) from {}", entries.len(), path.display());
    Ok(entries)
}
