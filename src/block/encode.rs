//! One-shot block encoder.
//!
//! Ties the suffix array builder, PSV/NSV construction, factorizer and
//! parse optimizer together and walks the chosen parse, emitting tokens
//! through the bit-interleaved writer. Grounded on `salz_encode_safe`,
//! `emit_encoding` and `finalize_encoding` in `salz.c`.

use crate::{FACTOR_LENGTH_MIN, FACTOR_OFFSET_MIN};

use super::bitstream::BitWriter;
use super::errors::EncodeError;
use super::{factorize, optimize, psvnsv, stream};
use crate::sa;

const TOKEN_LITERAL: u8 = 0;
const TOKEN_FACTOR: u8 = 1;

fn write_factor(writer: &mut BitWriter, offset: u32, len: u32) -> Result<(), EncodeError> {
    let rel = offset - FACTOR_OFFSET_MIN;
    writer.write_vnibble(rel >> 8)?;
    writer.write_u8((rel & 0xff) as u8)?;
    writer.write_gr3(len - FACTOR_LENGTH_MIN)
}

/// Encodes `src` into `dst`, returning the number of bytes written.
///
/// The final 8 bytes of `src` are always reserved as forced literals,
/// guaranteeing that every factor copy in the matching decoder has enough
/// trailing slack to use unconditional 8-byte chunk writes. Callers must
/// therefore pass at least 8 bytes.
pub fn encode(src: &[u8], dst: &mut [u8]) -> Result<usize, EncodeError> {
    if src.len() < 8 {
        return Err(EncodeError::InsufficientDestination);
    }
    if src.len() > stream::MAX_PLAIN_LEN {
        return Err(EncodeError::InsufficientDestination);
    }
    if dst.len() < stream::HEADER_LEN {
        return Err(EncodeError::InsufficientDestination);
    }

    let body_len = src.len() - 8;
    let body = &src[..body_len];

    let suffix_array = sa::build(body).map_err(|_| EncodeError::SuffixArrayFailed)?;
    let (psv, nsv) = psvnsv::build_psv_nsv(&suffix_array, body_len);
    let candidates = factorize::factorize(body, &psv, &nsv);
    let parse = optimize::optimize(body_len, &candidates);

    let mut writer = BitWriter::new(dst, stream::HEADER_LEN)?;

    let mut pos = 0usize;
    while pos < body_len {
        let len = parse.factor_len[pos] as usize;
        if len == 1 {
            writer.write_bit(TOKEN_LITERAL)?;
            writer.write_u8(src[pos])?;
            pos += 1;
        } else {
            writer.write_bit(TOKEN_FACTOR)?;
            write_factor(&mut writer, parse.factor_offset[pos], len as u32)?;
            pos += len;
        }
    }

    // Emit the forced-literal tail.
    for &byte in &src[body_len..] {
        writer.write_bit(TOKEN_LITERAL)?;
        writer.write_u8(byte)?;
    }

    writer.finalize();
    let body_written = writer.dst_pos();

    if body_written > src.len() + stream::HEADER_LEN {
        // The salz encoding grew past the original size; fall back to
        // storing the plain bytes.
        let plain_end = stream::HEADER_LEN + src.len();
        if plain_end > dst.len() {
            return Err(EncodeError::InsufficientDestination);
        }
        dst[stream::HEADER_LEN..plain_end].copy_from_slice(src);
        stream::write_header(dst, stream::STREAM_TYPE_PLAIN, src.len());
        Ok(plain_end)
    } else {
        stream::write_header(
            dst,
            stream::STREAM_TYPE_SALZ,
            body_written - stream::HEADER_LEN,
        );
        Ok(body_written)
    }
}
