//! Decide whether a clone target is free, already holds the repository, or is
//! occupied by something else.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::repository::GitOperations;

/// State of a clone target on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// Nothing at the path.
    Absent,
    /// An empty directory; cloning into it is allowed.
    EmptyDirectory,
    /// A non-empty directory that opens as a repository.
    Repository,
}

impl TargetState {
    /// Whether a clone is still needed.
    pub fn needs_clone(self) -> bool {
        !matches!(self, TargetState::Repository)
    }
}

/// Probe `path` without modifying it.
///
/// A non-empty directory that is not a repository, or a path that is not a
/// directory at all, is an `Error::Probe`.
pub fn probe_target(git: &dyn GitOperations, path: &Path) -> Result<TargetState> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TargetState::Absent),
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_dir() {
        return Err(Error::Probe {
            path: path.to_path_buf(),
            message: "path exists and is not a directory".to_string(),
        });
    }

    if fs::read_dir(path)?.next().is_none() {
        return Ok(TargetState::EmptyDirectory);
    }

    git.open(path).map_err(|e| Error::Probe {
        path: path.to_path_buf(),
        message: format!("directory is not empty and is not a repository ({})", e),
    })?;

    Ok(TargetState::Repository)
}
