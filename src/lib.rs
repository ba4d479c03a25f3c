// SALZ — Rust port of the suffix array based Lempel-Ziv compressor.

pub mod block;
pub mod cli;
pub mod config;
pub mod file;
pub mod sa;
pub mod timefn;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the block-level API.
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot block encode. Equivalent to `salz_encode_safe`.
pub use block::encode::encode;
/// One-shot block decode. Equivalent to `salz_decode_safe`.
pub use block::decode::decode;

/// Error type for [`encode`].
pub use block::errors::EncodeError;
/// Error type for [`decode`].
pub use block::errors::DecodeError;

/// Worst-case encoded length for a plain segment of `plain_len` bytes.
/// Equivalent to `salz_encoded_len_max`.
pub use block::stream::encoded_len_max;

/// Minimum number of trailing bytes the encoder reserves as forced literals.
/// Equivalent to the `src_len -= 8` tail reservation in `encode_ctx_create`.
pub const TAIL_LITERALS: usize = 8;

/// Minimum factor offset (`FACTOR_OFFSET_MIN`).
pub const FACTOR_OFFSET_MIN: u32 = 1;

/// Minimum factor length (`FACTOR_LENGTH_MIN`).
pub const FACTOR_LENGTH_MIN: u32 = 3;
