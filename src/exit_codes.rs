//! Process exit codes used by the `clone-repos` binary.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Batch finished without clone or remote failures |
//! | 1 | Configuration or input error, nothing was cloned |
//! | 2 | Invalid command-line usage (reported by clap) |
//! | 3 | Batch finished, but at least one clone or remote operation failed |

/// Every entry was cloned, already present, or skipped.
pub const SUCCESS: u8 = 0;

/// Missing or invalid options, unreadable input, or an empty repo list.
pub const ERROR: u8 = 1;

/// Unknown flags or malformed values. clap exits with this code itself.
pub const USAGE: u8 = 2;

/// At least one clone or remote registration failed.
pub const PARTIAL_FAILURE: u8 = 3;
