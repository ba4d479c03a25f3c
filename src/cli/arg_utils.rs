//! Small string helpers used for executable-name alias detection.
//!
//! Ported from `lastNameFromPath`/`exeNameMatch` in this lineage's
//! `cli::arg_utils`, itself adapted from the reference CLI's
//! `get_filename`.

/// Returns the last path component of `path`, handling both `/` and `\`
/// separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `exe_name` is `name`, optionally followed by a file
/// extension (e.g. `unsalz.exe` matches `unsalz`).
pub fn exe_name_match(exe_name: &str, name: &str) -> bool {
    match exe_name.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
