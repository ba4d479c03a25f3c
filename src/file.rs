//! On-disk file framing.
//!
//! A salz file is an 8-byte file header followed by a sequence of
//! length-prefixed records, one per block, terminated by EOF. Corresponds to
//! the `compress`/`decompress` loops in `salzcli.c`.
//!
//! ```text
//! file header:  4-byte magic (big-endian) | 4-byte block_size (little-endian)
//! record:       4-byte encoded_len (little-endian) | encoded_len bytes
//! ```
//!
//! The magic is serialized big-endian so the on-disk bytes read
//! `0x53 0x41 0x4C 0x5A` regardless of host endianness; `block_size` stays
//! little-endian to match the reference CLI's native-endian write on the
//! little-endian hosts it actually ships on.

use std::io::{self, Read, Write};

use crate::block::decode::decode;
use crate::block::encode::encode;
use crate::block::errors::{DecodeError, EncodeError};
use crate::block::stream::{self, encoded_len_max};
use crate::config;

const FILE_HEADER_LEN: usize = 8;
const RECORD_LEN_PREFIX: usize = 4;

/// Errors from [`compress_stream`]/[`decompress_stream`] that don't fit
/// `io::Error` (a malformed file, or the core codec rejecting a block).
#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    BadMagic,
    Truncated,
    Encode(EncodeError),
    Decode(DecodeError),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "{e}"),
            FileError::BadMagic => write!(f, "not a salz file (bad magic)"),
            FileError::Truncated => write!(f, "truncated salz file"),
            FileError::Encode(e) => write!(f, "{e}"),
            FileError::Decode(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

/// Statistics from a successful whole-file compress or decompress run.
/// Equivalent to the byte counts `process_path` logs via `log_info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Reads `src` block by block and writes a framed, compressed stream to
/// `dst`. `level` selects the per-block chunk size via
/// [`config::block_size_for_level`].
///
/// Reuses one input buffer (sized to the block) and one output buffer
/// (sized to [`encoded_len_max`] of the block) across every block in the
/// file, matching the reference CLI's resource policy of allocating once
/// per file rather than once per block.
pub fn compress_stream<R: Read, W: Write>(
    mut src: R,
    mut dst: W,
    level: u32,
) -> Result<FileStats, FileError> {
    let block_size = config::block_size_for_level(level) as usize;

    let mut file_hdr = [0u8; FILE_HEADER_LEN];
    file_hdr[..4].copy_from_slice(&config::MAGIC.to_be_bytes());
    file_hdr[4..].copy_from_slice(&(block_size as u32).to_le_bytes());
    dst.write_all(&file_hdr)?;

    let mut stats = FileStats::default();
    let mut in_buf = vec![0u8; block_size];
    let mut out_buf = vec![0u8; encoded_len_max(block_size)];

    loop {
        let n = read_fill(&mut src, &mut in_buf)?;
        if n == 0 {
            break;
        }

        // `encode` reserves its last 8 bytes as forced literals, so it
        // cannot take a segment shorter than that; such a segment (only
        // possible on the file's final, partial block) is stored verbatim
        // instead, same as the encoder's own oversized-output fallback.
        let encoded_len = if n < 8 {
            stream::write_header(&mut out_buf, stream::STREAM_TYPE_PLAIN, n);
            out_buf[stream::HEADER_LEN..stream::HEADER_LEN + n].copy_from_slice(&in_buf[..n]);
            stream::HEADER_LEN + n
        } else {
            encode(&in_buf[..n], &mut out_buf).map_err(FileError::Encode)?
        };

        dst.write_all(&(encoded_len as u32).to_le_bytes())?;
        dst.write_all(&out_buf[..encoded_len])?;

        stats.bytes_in += n as u64;
        stats.bytes_out += (RECORD_LEN_PREFIX + encoded_len) as u64;

        if n < block_size {
            break;
        }
    }

    stats.bytes_out += FILE_HEADER_LEN as u64;
    Ok(stats)
}

/// Reads a framed, compressed stream from `src` and writes the decompressed
/// bytes to `dst`.
pub fn decompress_stream<R: Read, W: Write>(
    mut src: R,
    mut dst: W,
) -> Result<FileStats, FileError> {
    let mut file_hdr = [0u8; FILE_HEADER_LEN];
    src.read_exact(&mut file_hdr)?;

    let magic = u32::from_be_bytes(file_hdr[..4].try_into().unwrap());
    if magic != config::MAGIC {
        return Err(FileError::BadMagic);
    }
    let block_size = u32::from_le_bytes(file_hdr[4..].try_into().unwrap()) as usize;

    let mut stats = FileStats::default();
    let mut in_buf = vec![0u8; encoded_len_max(block_size)];
    let mut out_buf = vec![0u8; block_size];

    loop {
        let mut len_buf = [0u8; RECORD_LEN_PREFIX];
        if !read_exact_or_eof(&mut src, &mut len_buf)? {
            break;
        }
        let encoded_len = u32::from_le_bytes(len_buf) as usize;
        if encoded_len > in_buf.len() {
            return Err(FileError::Truncated);
        }

        src.read_exact(&mut in_buf[..encoded_len])?;
        let plain_len =
            decode(&in_buf[..encoded_len], &mut out_buf).map_err(FileError::Decode)?;

        dst.write_all(&out_buf[..plain_len])?;

        stats.bytes_in += (RECORD_LEN_PREFIX + encoded_len) as u64;
        stats.bytes_out += plain_len as u64;
    }

    stats.bytes_in += FILE_HEADER_LEN as u64;
    Ok(stats)
}

/// Fills `buf` from `src`, returning fewer bytes than `buf.len()` only at EOF.
fn read_fill<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Like `Read::read_exact`, but returns `Ok(false)` instead of erroring when
/// zero bytes are available before the first byte of `buf` is filled (a
/// clean EOF between records), and still errors on a partial record.
fn read_exact_or_eof<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..])? {
            0 => {
                if filled == 0 {
                    return Ok(false);
                }
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "truncated record length prefix",
                ));
            }
            n => filled += n,
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_multi_block_file() {
        // Force a tiny block size so a few KB of input spans several blocks.
        let level = 0; // 32 KiB blocks
        let mut src = vec![0u8; 100_000];
        for (i, b) in src.iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }

        let mut compressed = Vec::new();
        let stats_c = compress_stream(&src[..], &mut compressed, level).unwrap();
        assert_eq!(stats_c.bytes_in, src.len() as u64);

        let mut decompressed = Vec::new();
        let stats_d = decompress_stream(&compressed[..], &mut decompressed).unwrap();
        assert_eq!(decompressed, src);
        assert_eq!(stats_d.bytes_out, src.len() as u64);
    }

    #[test]
    fn round_trips_a_final_block_shorter_than_tail_reservation() {
        // 3 full 32 KiB blocks plus a 5-byte remainder, which is too short
        // for `encode`'s 8-byte tail reservation and must fall back to a
        // plain segment.
        let level = 0;
        let mut src = vec![0u8; 32768 * 3 + 5];
        for (i, b) in src.iter_mut().enumerate() {
            *b = (i % 197) as u8;
        }

        let mut compressed = Vec::new();
        compress_stream(&src[..], &mut compressed, level).unwrap();

        let mut decompressed = Vec::new();
        decompress_stream(&compressed[..], &mut decompressed).unwrap();
        assert_eq!(decompressed, src);
    }

    #[test]
    fn round_trips_empty_input() {
        let src: Vec<u8> = Vec::new();
        let mut compressed = Vec::new();
        compress_stream(&src[..], &mut compressed, config::CLEVEL_DEFAULT).unwrap();

        let mut decompressed = Vec::new();
        decompress_stream(&compressed[..], &mut decompressed).unwrap();
        assert_eq!(decompressed, src);
    }

    #[test]
    fn rejects_bad_magic() {
        let junk = vec![0u8; 16];
        let mut out = Vec::new();
        let err = decompress_stream(&junk[..], &mut out).unwrap_err();
        assert!(matches!(err, FileError::BadMagic));
    }

    #[test]
    fn file_header_bytes_spell_salz() {
        let mut compressed = Vec::new();
        compress_stream(&b"abcdefgh"[..], &mut compressed, config::CLEVEL_DEFAULT).unwrap();
        assert_eq!(&compressed[..4], &[0x53, 0x41, 0x4C, 0x5A]);
    }
}
