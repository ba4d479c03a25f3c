//! Binary entry point for the `salz` command-line tool.
//!
//! Parses arguments, resolves executable-name aliases (`unsalz`, `salzcat`),
//! then processes each input path: suffix validation, overwrite protection,
//! compress or decompress, and a timed summary line. Corresponds to
//! `process_path` and `main` in `salzcli.c`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, Context};

use salz::cli::args::{OpMode, Options, RawArgs};
use salz::cli::constants::{lower_display_level, set_display_level, LOG_LVL_INFO};
use salz::config;
use salz::file::{compress_stream, decompress_stream};
use salz::timefn::{clock_span_ns, get_time};
use salz::{log_crit, log_err, log_info};

use clap::Parser;

/// Computes the output path for `path` under `mode`, mirroring
/// `fill_outpath`: append [`config::SUFFIX`] on compress, strip it on
/// decompress.
fn fill_outpath(path: &str, mode: OpMode) -> anyhow::Result<String> {
    match mode {
        OpMode::Compress => Ok(format!("{path}{}", config::SUFFIX)),
        OpMode::Decompress => path
            .strip_suffix(config::SUFFIX)
            .map(|s| s.to_owned())
            .ok_or_else(|| anyhow!("\"{path}\" path has unknown suffix")),
    }
}

/// Processes a single input path: validates its suffix, opens source and
/// destination, dispatches to [`compress_stream`]/[`decompress_stream`], and
/// logs a summary. On failure, the partial output file (if any) is removed.
///
/// Every fallible step is wrapped in `anyhow::Error` via `.context(...)`, the
/// way this lineage's `cli::args` wraps argument-parsing failures; the caller
/// logs the full chain with `{:#}`.
fn process_path(path: &str, opts: &Options) -> anyhow::Result<()> {
    let has_suffix = path.contains(config::SUFFIX);
    if has_suffix && opts.mode == OpMode::Compress {
        return Err(anyhow!(
            "\"{path}\" path already has \"{}\" suffix",
            config::SUFFIX
        ));
    }
    if !has_suffix && opts.mode == OpMode::Decompress {
        return Err(anyhow!("\"{path}\" path has unknown suffix"));
    }

    let metadata =
        std::fs::metadata(path).with_context(|| format!("couldn't stat \"{path}\" path"))?;
    if !metadata.is_file() {
        return Err(anyhow!("\"{path}\" path is not a regular file"));
    }
    let in_size = metadata.len();

    let mut in_file =
        File::open(path).with_context(|| format!("couldn't open \"{path}\" path"))?;

    if opts.write_to_stdout {
        let stdout = io::stdout();
        let result = match opts.mode {
            OpMode::Compress => compress_stream(&mut in_file, stdout.lock(), opts.level),
            OpMode::Decompress => decompress_stream(&mut in_file, stdout.lock()),
        };
        result
            .map(|_| ())
            .context("streaming to stdout failed")?;
        return Ok(());
    }

    let out_path = fill_outpath(path, opts.mode)?;

    if !opts.force_overwrite && Path::new(&out_path).exists() {
        return Err(anyhow!("\"{out_path}\" path already exists"));
    }

    let mut out_file =
        File::create(&out_path).with_context(|| format!("couldn't open \"{out_path}\" path"))?;

    let time_start = get_time();
    let result = match opts.mode {
        OpMode::Compress => compress_stream(&mut in_file, &mut out_file, opts.level),
        OpMode::Decompress => decompress_stream(&mut in_file, &mut out_file),
    };
    let elapsed_ns = clock_span_ns(time_start);

    drop(out_file);
    drop(in_file);

    if let Err(e) = result {
        let _ = std::fs::remove_file(&out_path);
        return Err(e).context("operation failed");
    }
    if !opts.keep_input {
        let _ = std::fs::remove_file(path);
    }

    let out_size = std::fs::metadata(&out_path)
        .with_context(|| format!("couldn't stat \"{out_path}\" path"))?
        .len();

    let elapsed_s = elapsed_ns as f64 / 1_000_000_000.0;
    match opts.mode {
        OpMode::Compress => log_info!(
            "{path}: compressed {in_size} bytes to {out_size} bytes (ratio: {:.3}) in {elapsed_s:.3} seconds",
            in_size as f64 / out_size as f64
        ),
        OpMode::Decompress => log_info!(
            "{path}: decompressed {in_size} bytes in {elapsed_s:.3} seconds"
        ),
    }

    Ok(())
}

fn run(opts: Options) -> i32 {
    if opts.list_requested {
        log_crit!("listing info not supported");
        return 1;
    }

    if opts.files.is_empty() {
        log_crit!("compressing or decompressing from stdin not supported");
        return 1;
    }

    let mut had_error = false;
    for path in &opts.files {
        if let Err(e) = process_path(path, &opts) {
            log_err!("{e:#}");
            had_error = true;
        }
    }

    if had_error {
        1
    } else {
        0
    }
}

fn main() {
    let raw = RawArgs::parse();
    let quiet = raw.quiet;
    let argv0 = std::env::args().next().unwrap_or_else(|| "salz".to_owned());
    let opts = Options::resolve(raw, &argv0);

    set_display_level(LOG_LVL_INFO);
    for _ in 0..quiet {
        lower_display_level();
    }

    let exit_code = run(opts);
    io::stdout().flush().ok();
    std::process::exit(exit_code);
}
