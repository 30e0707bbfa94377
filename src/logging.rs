//! Logger setup for the `clone-repos` binary.
//!
//! The library only uses the `log` macros. The binary installs `env_logger`
//! once, writing to stderr, with the level from `--log-level` and any extra
//! `RUST_LOG` directives layered on top.

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// Build (but do not install) the logger.
pub fn builder(level: LevelFilter, use_color: bool) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .write_style(if use_color {
            WriteStyle::Always
        } else {
            WriteStyle::Never
        });
    builder
}

/// Install the logger. A second call is a no-op.
pub fn init(level: LevelFilter, use_color: bool) {
    let _ = builder(level, use_color).try_init();
}
