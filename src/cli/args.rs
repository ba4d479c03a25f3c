//! Command-line argument surface, ported from `salzcli.c`'s `getopt_long`
//! table. Uses `clap`'s derive API in place of the reference's hand-rolled
//! `getopt_long` loop — the option surface and defaults are unchanged.

use clap::Parser;

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::config;

const UNSALZ: &str = "unsalz";
const SALZCAT: &str = "salzcat";

/// Raw flags as parsed from `argv`, one field per `salzcli.c` option.
#[derive(Parser, Debug)]
#[command(
    name = "salz",
    about = "salz, a Suffix Array-based Lempel-Ziv data compressor",
    after_help = "Default action is to compress.\n\
                  If invoked as \"unsalz\", default action is to decompress.\n\
                  \"salzcat\", default action is to decompress to stdout."
)]
pub struct RawArgs {
    /// Write to standard output, keep input file.
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Force decompression mode.
    #[arg(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Force overwrite of output file.
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Keep input file.
    #[arg(short = 'k', long = "keep")]
    pub keep: bool,

    /// Print information about a salz-compressed file (not supported, matches the reference CLI's stub).
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Suppress output; specify twice to silence all but critical errors.
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Alias of "-1".
    #[arg(long = "fast")]
    pub fast: bool,

    /// Alias of "-9".
    #[arg(long = "best")]
    pub best: bool,

    #[arg(short = '0', hide = true, action = clap::ArgAction::SetTrue)]
    pub l0: bool,
    #[arg(short = '1', hide = true, action = clap::ArgAction::SetTrue)]
    pub l1: bool,
    #[arg(short = '2', hide = true, action = clap::ArgAction::SetTrue)]
    pub l2: bool,
    #[arg(short = '3', hide = true, action = clap::ArgAction::SetTrue)]
    pub l3: bool,
    #[arg(short = '4', hide = true, action = clap::ArgAction::SetTrue)]
    pub l4: bool,
    #[arg(short = '5', hide = true, action = clap::ArgAction::SetTrue)]
    pub l5: bool,
    #[arg(short = '6', hide = true, action = clap::ArgAction::SetTrue)]
    pub l6: bool,
    #[arg(short = '7', hide = true, action = clap::ArgAction::SetTrue)]
    pub l7: bool,
    #[arg(short = '8', hide = true, action = clap::ArgAction::SetTrue)]
    pub l8: bool,
    #[arg(short = '9', hide = true, action = clap::ArgAction::SetTrue)]
    pub l9: bool,

    /// Input files. "salz compresses from stdin" is not supported by this port.
    pub files: Vec<String>,
}

/// What `process_path` should do with a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
}

/// Fully-resolved CLI options: flags plus alias detection plus the
/// compression level's effect on block size.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: OpMode,
    pub write_to_stdout: bool,
    pub force_overwrite: bool,
    pub keep_input: bool,
    pub list_requested: bool,
    pub level: u32,
    pub files: Vec<String>,
}

impl Options {
    /// Resolves `raw` against the process's `argv[0]` for alias detection
    /// and applies the `-0`..`-9`/`--fast`/`--best` precedence (highest
    /// explicit level wins; `--best` then `--fast` take priority over the
    /// numeric flags, mirroring the reference's last-flag-wins `getopt`
    /// loop closely enough for a derive-based parser that doesn't track
    /// argument order).
    pub fn resolve(raw: RawArgs, argv0: &str) -> Options {
        let exe_name = last_name_from_path(argv0);

        let mut mode = if raw.decompress {
            OpMode::Decompress
        } else {
            OpMode::Compress
        };
        let mut write_to_stdout = raw.stdout;

        if exe_name_match(exe_name, UNSALZ) {
            mode = OpMode::Decompress;
        }
        if exe_name_match(exe_name, SALZCAT) {
            mode = OpMode::Decompress;
            write_to_stdout = true;
        }

        let numeric_levels: [bool; 10] = [
            raw.l0, raw.l1, raw.l2, raw.l3, raw.l4, raw.l5, raw.l6, raw.l7, raw.l8, raw.l9,
        ];
        let mut level = config::level_from_env();
        if let Some(l) = numeric_levels.iter().rposition(|&set| set) {
            level = l as u32;
        }
        if raw.fast {
            level = 1;
        }
        if raw.best {
            level = 9;
        }

        Options {
            mode,
            write_to_stdout,
            force_overwrite: raw.force,
            keep_input: raw.keep,
            list_requested: raw.list,
            level,
            files: raw.files,
        }
    }
}
