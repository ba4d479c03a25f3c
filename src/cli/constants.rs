//! Display-level global and logging macros.
//!
//! Corresponds to `salzcli.c`'s `log_lvl` global and the `log`/`log_crit`/
//! `log_err`/`log_info` macros: each message names a level, and it is
//! printed only when that level is at or below the current verbosity.
//! Ported to an atomic (following this lineage's `cli::constants`) since
//! Rust has no file-scoped mutable globals without one.

use std::sync::atomic::{AtomicU32, Ordering};

pub const LOG_LVL_NONE: u32 = 0;
pub const LOG_LVL_CRITICAL: u32 = 1;
pub const LOG_LVL_ERROR: u32 = 2;
pub const LOG_LVL_INFO: u32 = 3;

/// Current verbosity. Defaults to [`LOG_LVL_INFO`], matching the reference
/// CLI's `log_lvl` initial value; each `-q` lowers it by one.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(LOG_LVL_INFO);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

#[inline]
pub fn lower_display_level() {
    let mut level = display_level();
    if level > LOG_LVL_NONE {
        level -= 1;
    }
    set_display_level(level);
}

/// Print to stderr at or above [`LOG_LVL_CRITICAL`] — equivalent to
/// `log_crit(...)`.
#[macro_export]
macro_rules! log_crit {
    ($($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $crate::cli::constants::LOG_LVL_CRITICAL {
            eprintln!($($arg)*);
        }
    };
}

/// Print to stderr at or above [`LOG_LVL_ERROR`] — equivalent to
/// `log_err(...)`.
#[macro_export]
macro_rules! log_err {
    ($($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $crate::cli::constants::LOG_LVL_ERROR {
            eprintln!($($arg)*);
        }
    };
}

/// Print to stderr at or above [`LOG_LVL_INFO`] — equivalent to
/// `log_info(...)`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $crate::cli::constants::LOG_LVL_INFO {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_info() {
        assert_eq!(display_level(), LOG_LVL_INFO);
    }

    #[test]
    fn lower_display_level_decrements_then_floors_at_none() {
        set_display_level(LOG_LVL_INFO);
        lower_display_level();
        assert_eq!(display_level(), LOG_LVL_ERROR);
        lower_display_level();
        lower_display_level();
        lower_display_level();
        assert_eq!(display_level(), LOG_LVL_NONE);
        set_display_level(LOG_LVL_INFO);
    }
}
