//! One-shot block decoder.
//!
//! Mirrors [`super::encode`]: reads the segment header, then either copies
//! the plain fallback verbatim or runs the token loop, expanding literals
//! and factors into `dst`. Grounded on `salz_decode_safe`, `decode_ctx_create`
//! and `decode` in `salz.c`.

use super::bitstream::BitReader;
use super::errors::DecodeError;
use super::stream;
use crate::{FACTOR_LENGTH_MIN, FACTOR_OFFSET_MIN};

const TOKEN_LITERAL: u8 = 0;

/// First-chunk fixup table for offsets `0..8`, read directly after the
/// four scalar forward-propagating bytes. See [`cpy_factor`].
const INC1: [usize; 8] = [0, 1, 2, 1, 4, 4, 4, 4];
const INC2: [usize; 8] = [0, 1, 2, 2, 4, 3, 2, 1];

fn read_factor_offs(reader: &mut BitReader) -> Result<u32, DecodeError> {
    let hi = reader.read_vnibble()?;
    let lo = reader.read_u8()? as u32;
    Ok(((hi << 8) | lo) + FACTOR_OFFSET_MIN)
}

fn read_factor_len(reader: &mut BitReader) -> Result<u32, DecodeError> {
    Ok(reader.read_gr3()? + FACTOR_LENGTH_MIN)
}

/// Expands a single factor (offset/length already decoded) into `dst` at
/// `*dst_pos`, advancing it past the copy.
///
/// `factor_offset` may be smaller than `factor_len`, in which case the
/// source range overlaps the destination range being written — the copy
/// must run forward one step at a time (or in chunks too narrow to read
/// past the write frontier) so that a repeating pattern propagates, unlike
/// a `memmove`, which would not give that result.
///
/// The fast path below replicates the reference's unrolled form: four
/// scalar forward stores, then a lookup-driven 4-byte block that by
/// construction never reads past what the scalar stores just wrote, then
/// plain non-overlapping 8-byte chunks for the remainder. It only runs
/// when there are 8 bytes of slack past the factor's end, which the
/// encoder always provides by never placing a factor in the reserved
/// literal tail; near the end of a (possibly malformed) buffer, a slower
/// byte-at-a-time path keeps the same semantics without overshooting.
fn cpy_factor(
    dst: &mut [u8],
    dst_pos: &mut usize,
    factor_offset: u32,
    factor_len: u32,
) -> Result<(), DecodeError> {
    let factor_offset = factor_offset as usize;
    let factor_len = factor_len as usize;

    if factor_offset > *dst_pos {
        return Err(DecodeError::MalformedStream);
    }
    let end = dst_pos
        .checked_add(factor_len)
        .ok_or(DecodeError::MalformedStream)?;
    if end > dst.len() {
        return Err(DecodeError::InsufficientDestination);
    }

    let src_start = *dst_pos - factor_offset;

    if factor_offset < 8 && end + 8 <= dst.len() {
        let mut src_idx = src_start;
        let mut dst_idx = *dst_pos;

        for i in 0..4 {
            dst[dst_idx + i] = dst[src_idx + i];
        }
        let inc1 = INC1[factor_offset];
        let mut tmp4 = [0u8; 4];
        for i in 0..4 {
            tmp4[i] = dst[src_idx + inc1 + i];
        }
        dst[dst_idx + 4..dst_idx + 8].copy_from_slice(&tmp4);
        src_idx += INC2[factor_offset];
        dst_idx += 8;

        while dst_idx < end {
            let mut tmp8 = [0u8; 8];
            tmp8.copy_from_slice(&dst[src_idx..src_idx + 8]);
            dst[dst_idx..dst_idx + 8].copy_from_slice(&tmp8);
            dst_idx += 8;
            src_idx += 8;
        }
    } else {
        for i in 0..factor_len {
            dst[*dst_pos + i] = dst[src_start + i];
        }
    }

    *dst_pos = end;
    Ok(())
}

fn run_token_loop(body: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let mut reader = BitReader::new(body);
    let mut dst_pos = 0usize;

    while reader.pos() < body.len() {
        let token = reader.read_bit()?;
        if token == TOKEN_LITERAL {
            let byte = reader.read_u8()?;
            if dst_pos >= dst.len() {
                return Err(DecodeError::InsufficientDestination);
            }
            dst[dst_pos] = byte;
            dst_pos += 1;
        } else {
            let factor_offset = read_factor_offs(&mut reader)?;
            let factor_len = read_factor_len(&mut reader)?;
            cpy_factor(dst, &mut dst_pos, factor_offset, factor_len)?;
        }
    }

    Ok(dst_pos)
}

/// Decodes `src` into `dst`, returning the number of plain bytes written.
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let hdr = stream::read_header(src)?;
    let body = &src[stream::HEADER_LEN..];

    match hdr.stream_type {
        stream::STREAM_TYPE_PLAIN => {
            if hdr.length > body.len() {
                return Err(DecodeError::MalformedStream);
            }
            if hdr.length > dst.len() {
                return Err(DecodeError::InsufficientDestination);
            }
            dst[..hdr.length].copy_from_slice(&body[..hdr.length]);
            Ok(hdr.length)
        }
        stream::STREAM_TYPE_SALZ => {
            if hdr.length > body.len() {
                return Err(DecodeError::MalformedStream);
            }
            run_token_loop(&body[..hdr.length], dst)
        }
        _ => Err(DecodeError::MalformedStream),
    }
}
