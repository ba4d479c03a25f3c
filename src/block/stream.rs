//! Encoded-segment framing: the 4-byte stream header and worst-case size math.
//!
//! Corresponds to `finalize_encoding`, `decode_ctx_create` and
//! `salz_encoded_len_max` in the reference implementation. The header packs
//! a 1-byte stream type and a 24-bit plain length into a single little-endian
//! `u32`:
//!
//! ```text
//! bits 31..24   stream type (0 = plain fallback, 1 = salz-encoded)
//! bits 23..0    plain_len
//! ```

use super::errors::DecodeError;

/// The segment is stored verbatim; the decoder copies `plain_len` bytes.
pub const STREAM_TYPE_PLAIN: u8 = 0;
/// The segment is salz-encoded; the decoder runs the token loop.
pub const STREAM_TYPE_SALZ: u8 = 1;

/// Number of bytes occupied by the segment header.
pub const HEADER_LEN: usize = 4;

/// Largest plain length a header can carry (24-bit field).
pub const MAX_PLAIN_LEN: usize = 0x00FF_FFFF;

/// Worst-case encoded length for a plain segment of `plain_len` bytes.
///
/// Equivalent to `salz_encoded_len_max`: header, plus the plain bytes
/// themselves (the plain-fallback path), plus one reserved 8-byte bit
/// accumulator slot for every 64 bytes of input (rounded up).
pub fn encoded_len_max(plain_len: usize) -> usize {
    HEADER_LEN + plain_len + div_round_up(plain_len, 64) * 8
}

fn div_round_up(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}

/// Decoded view of a 4-byte segment header.
///
/// `length`'s meaning depends on `stream_type`: for [`STREAM_TYPE_PLAIN`] it
/// is the number of verbatim bytes that follow; for [`STREAM_TYPE_SALZ`] it
/// is the number of encoded bytes that follow (the token loop runs until
/// that many bytes have been consumed, however many plain bytes that
/// produces).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub stream_type: u8,
    pub length: usize,
}

/// Packs `stream_type` and `length` into the 4-byte header encoding.
///
/// `length` must fit in 24 bits; callers are expected to have already
/// rejected oversized segments before reaching this point.
pub fn write_header(dst: &mut [u8], stream_type: u8, length: usize) {
    debug_assert!(length <= MAX_PLAIN_LEN);
    let word = ((stream_type as u32) << 24) | (length as u32 & 0x00FF_FFFF);
    dst[..HEADER_LEN].copy_from_slice(&word.to_le_bytes());
}

/// Unpacks a 4-byte segment header.
pub fn read_header(src: &[u8]) -> Result<Header, DecodeError> {
    if src.len() < HEADER_LEN {
        return Err(DecodeError::MalformedStream);
    }
    let word = u32::from_le_bytes(src[..HEADER_LEN].try_into().unwrap());
    Ok(Header {
        stream_type: (word >> 24) as u8,
        length: (word & 0x00FF_FFFF) as usize,
    })
}
