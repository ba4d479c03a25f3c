//! Compile-time / environment-tunable configuration constants.
//!
//! Corresponds to the handful of constants and the `compression_level`
//! global at the top of `salzcli.c`.

/// Default compression level, selecting the default block size. Can be
/// overridden by the `SALZ_LEVEL` environment variable or the CLI's
/// `-0`..`-9`/`--fast`/`--best` flags.
pub const CLEVEL_DEFAULT: u32 = 5;

/// Highest selectable compression level.
pub const CLEVEL_MAX: u32 = 9;

/// File extension appended on compress, stripped on decompress.
pub const SUFFIX: &str = ".salz";

/// Magic number at the start of every salz file. Serialized with
/// [`u32::to_be_bytes`] so the on-disk bytes read `0x53 0x41 0x4C 0x5A`
/// ("SALZ" in ASCII) regardless of host endianness — unlike the reference
/// CLI, which `memcpy`s the native-endian representation and so writes the
/// bytes reversed on little-endian hosts.
pub const MAGIC: u32 = 0x53414C5A;

/// Per-block input chunk size ("`plain_len`") for a given compression
/// level: `1 << (15 + level)`, giving 32 KiB at level 0 up to 16 MiB at
/// level 9. Mirrors the reference CLI's `compress()`.
pub fn block_size_for_level(level: u32) -> u32 {
    1u32 << (15 + level.min(CLEVEL_MAX))
}

/// Reads the compression level from the `SALZ_LEVEL` environment variable,
/// falling back to [`CLEVEL_DEFAULT`] if unset or not a valid level.
pub fn level_from_env() -> u32 {
    const ENV_LEVEL: &str = "SALZ_LEVEL";
    match std::env::var(ENV_LEVEL) {
        Ok(val) => val.parse::<u32>().unwrap_or(CLEVEL_DEFAULT).min(CLEVEL_MAX),
        Err(_) => CLEVEL_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_matches_reference_formula() {
        assert_eq!(block_size_for_level(0), 1 << 15);
        assert_eq!(block_size_for_level(5), 1 << 20);
        assert_eq!(block_size_for_level(9), 1 << 24);
    }

    #[test]
    fn block_size_clamps_above_max() {
        assert_eq!(block_size_for_level(20), block_size_for_level(CLEVEL_MAX));
    }

    #[test]
    fn level_from_env_reads_variable() {
        std::env::set_var("SALZ_LEVEL", "3");
        let lvl = level_from_env();
        std::env::remove_var("SALZ_LEVEL");
        assert_eq!(lvl, 3);
    }

    #[test]
    fn level_from_env_falls_back_to_default() {
        std::env::remove_var("SALZ_LEVEL");
        assert_eq!(level_from_env(), CLEVEL_DEFAULT);
    }

    #[test]
    fn level_from_env_ignores_non_numeric() {
        std::env::set_var("SALZ_LEVEL", "fast");
        let lvl = level_from_env();
        std::env::remove_var("SALZ_LEVEL");
        assert_eq!(lvl, CLEVEL_DEFAULT);
    }
}
