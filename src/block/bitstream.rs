//! Bit-interleaved I/O stream.
//!
//! A 64-bit accumulator is reserved as an 8-byte slot within the linear
//! destination buffer; once filled it is stored MSB-first (the earliest
//! written bit lands in the highest bit of the word) and a new slot is
//! reserved at the writer's current byte cursor. On disk the accumulator
//! itself is serialized little-endian, via [`u64::to_le_bytes`] /
//! [`u64::from_le_bytes`] — this mirrors the raw `memcpy` in
//! `write_u64_raw` / `read_u64_raw`, which is little-endian on every
//! target this crate is built for.
//!
//! Byte-aligned writes (`write_u8` / `read_u8`, used for the low byte of a
//! factor offset) bypass the accumulator entirely: they land directly at
//! the writer's/reader's linear byte cursor without touching `bits` or
//! `bits_avail`.
//!
//! Corresponds to the `salz_io_ctx` bit-manipulation functions in
//! `salz.c`: `write_bit`, `write_bits`, `write_zeros`, `write_unary`,
//! `write_gr3`, `write_u8`, `flush_bits` on the encode side, and
//! `read_bit`, `read_bits`, `read_unary`, `read_gr3`, `read_nibble`,
//! `read_vnibble`, `read_u8`, `queue_bits` on the decode side.

use super::errors::{DecodeError, EncodeError};
use super::vlc::{self, VnibbleAccumulator};

#[inline]
fn shl64(val: u64, n: u32) -> u64 {
    if n >= 64 {
        0
    } else {
        val << n
    }
}

#[inline]
fn shr64(val: u64, n: u32) -> u64 {
    if n >= 64 {
        0
    } else {
        val >> n
    }
}

#[inline]
fn mask64(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Writes a bit-interleaved stream into a fixed destination buffer.
pub struct BitWriter<'a> {
    dst: &'a mut [u8],
    dst_pos: usize,
    bits: u64,
    bits_avail: u32,
    bits_pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Begins writing at byte offset `start`, reserving the first 8-byte
    /// accumulator slot there.
    pub fn new(dst: &'a mut [u8], start: usize) -> Result<Self, EncodeError> {
        if start + 8 > dst.len() {
            return Err(EncodeError::InsufficientDestination);
        }
        Ok(BitWriter {
            dst,
            dst_pos: start + 8,
            bits: 0,
            bits_avail: 64,
            bits_pos: start,
        })
    }

    fn store(&mut self, pos: usize, bits: u64) {
        self.dst[pos..pos + 8].copy_from_slice(&bits.to_le_bytes());
    }

    fn flush_bits(&mut self) -> Result<(), EncodeError> {
        self.store(self.bits_pos, self.bits);
        if self.dst_pos + 8 > self.dst.len() {
            return Err(EncodeError::InsufficientDestination);
        }
        self.bits = 0;
        self.bits_avail = 64;
        self.bits_pos = self.dst_pos;
        self.dst_pos += 8;
        Ok(())
    }

    /// Writes one raw byte, bypassing the accumulator.
    pub fn write_u8(&mut self, val: u8) -> Result<(), EncodeError> {
        if self.dst_pos >= self.dst.len() {
            return Err(EncodeError::InsufficientDestination);
        }
        self.dst[self.dst_pos] = val;
        self.dst_pos += 1;
        Ok(())
    }

    pub fn write_bit(&mut self, val: u8) -> Result<(), EncodeError> {
        if self.bits_avail == 0 {
            self.flush_bits()?;
        }
        self.bits = (self.bits << 1) | (val & 1) as u64;
        self.bits_avail -= 1;
        Ok(())
    }

    /// Writes the low `count` bits of `bits` (0..=64), most significant
    /// first.
    pub fn write_bits(&mut self, bits: u64, count: u32) -> Result<(), EncodeError> {
        debug_assert!(count <= 64);
        if count == 0 {
            return Ok(());
        }
        if self.bits_avail == 0 {
            self.flush_bits()?;
        }
        let mut count = count;
        if count > self.bits_avail {
            let take = self.bits_avail;
            self.bits = (self.bits << take) | (shr64(bits, count - take) & mask64(take));
            count -= take;
            self.flush_bits()?;
        }
        self.bits = shl64(self.bits, count) | (bits & mask64(count));
        self.bits_avail -= count;
        Ok(())
    }

    pub fn write_zeros(&mut self, mut count: u32) -> Result<(), EncodeError> {
        while count > 0 {
            if self.bits_avail == 0 {
                self.flush_bits()?;
            }
            let take = count.min(self.bits_avail);
            self.bits = shl64(self.bits, take);
            self.bits_avail -= take;
            count -= take;
        }
        Ok(())
    }

    pub fn write_unary(&mut self, val: u32) -> Result<(), EncodeError> {
        self.write_zeros(val)?;
        self.write_bit(1)
    }

    /// Golomb-Rice with fixed remainder width 3: unary quotient, then 3
    /// fixed remainder bits.
    pub fn write_gr3(&mut self, val: u32) -> Result<(), EncodeError> {
        self.write_unary(val >> 3)?;
        self.write_bits((val & 0x7) as u64, 3)
    }

    pub fn write_vnibble(&mut self, val: u32) -> Result<(), EncodeError> {
        let (digits, len) = vlc::vnibble_digits(val);
        for &d in &digits[..len] {
            self.write_bits(d as u64, 4)?;
        }
        Ok(())
    }

    /// Current linear write cursor, in bytes.
    pub fn dst_pos(&self) -> usize {
        self.dst_pos
    }

    /// Flushes the pending accumulator slot. Must be called exactly once,
    /// after the last write.
    pub fn finalize(&mut self) {
        self.bits = shl64(self.bits, self.bits_avail);
        self.store(self.bits_pos, self.bits);
    }
}

/// Reads a bit-interleaved stream from a source buffer.
pub struct BitReader<'a> {
    src: &'a [u8],
    src_pos: usize,
    bits: u64,
    bits_avail: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        BitReader {
            src,
            src_pos: 0,
            bits: 0,
            bits_avail: 0,
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        if self.src_pos >= self.src.len() {
            return Err(DecodeError::MalformedStream);
        }
        let val = self.src[self.src_pos];
        self.src_pos += 1;
        Ok(val)
    }

    fn queue_bits(&mut self) -> Result<(), DecodeError> {
        if self.src_pos + 8 > self.src.len() {
            return Err(DecodeError::MalformedStream);
        }
        let bytes: [u8; 8] = self.src[self.src_pos..self.src_pos + 8]
            .try_into()
            .unwrap();
        self.bits = u64::from_le_bytes(bytes);
        self.bits_avail = 64;
        self.src_pos += 8;
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<u8, DecodeError> {
        if self.bits_avail == 0 {
            self.queue_bits()?;
        }
        let res = ((self.bits >> 63) & 1) as u8;
        self.bits <<= 1;
        self.bits_avail -= 1;
        Ok(res)
    }

    pub fn read_bits(&mut self, count: u32) -> Result<u64, DecodeError> {
        debug_assert!(count <= 64);
        if count == 0 {
            return Ok(0);
        }
        if self.bits_avail == 0 {
            self.queue_bits()?;
        }
        if count <= self.bits_avail {
            let res = shr64(self.bits, 64 - count);
            self.bits = shl64(self.bits, count);
            self.bits_avail -= count;
            return Ok(res);
        }
        let res = shr64(self.bits, 64 - self.bits_avail);
        let remaining = count - self.bits_avail;
        self.queue_bits()?;
        let res = shl64(res, remaining) | shr64(self.bits, 64 - remaining);
        self.bits = shl64(self.bits, remaining);
        self.bits_avail -= remaining;
        Ok(res)
    }

    pub fn read_unary(&mut self) -> Result<u32, DecodeError> {
        if self.bits_avail == 0 {
            self.queue_bits()?;
        }
        let mut res: u32 = 0;
        while self.bits == 0 {
            res += self.bits_avail;
            self.queue_bits()?;
        }
        let last_zeros = self.bits.leading_zeros();
        self.bits = shl64(self.bits, last_zeros + 1);
        self.bits_avail -= last_zeros + 1;
        res += last_zeros;
        Ok(res)
    }

    pub fn read_gr3(&mut self) -> Result<u32, DecodeError> {
        let quotient = self.read_unary()?;
        let remainder = self.read_bits(3)?;
        Ok((quotient << 3) | remainder as u32)
    }

    fn read_nibble(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bits(4)? as u8)
    }

    pub fn read_vnibble(&mut self) -> Result<u32, DecodeError> {
        let mut acc = VnibbleAccumulator::new();
        for _ in 0..11 {
            let nibble = self.read_nibble()?;
            if acc.push(nibble) {
                return Ok(acc.value());
            }
        }
        Err(DecodeError::MalformedStream)
    }

    /// Linear byte cursor: how many source bytes have been consumed into
    /// either a queued accumulator or a direct `read_u8`. Used to detect
    /// when a salz-encoded segment has been fully consumed.
    pub fn pos(&self) -> usize {
        self.src_pos
    }
}
