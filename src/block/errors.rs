//! Error types returned by the block-level encode/decode API.

use std::fmt;

/// Errors returned by [`crate::block::encode::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The destination buffer is too small to hold the worst-case output.
    InsufficientDestination,
    /// A scratch allocation (suffix array, rank arrays, cost table) failed.
    AllocationFailure,
    /// The suffix array builder rejected the input.
    SuffixArrayFailed,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EncodeError::InsufficientDestination => "destination buffer too small",
            EncodeError::AllocationFailure => "scratch allocation failed",
            EncodeError::SuffixArrayFailed => "suffix array construction failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for EncodeError {}

/// Errors returned by [`crate::block::decode::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The encoded stream is truncated, carries an unknown stream type, or
    /// contains a factor offset/length the decoder cannot satisfy.
    MalformedStream,
    /// The destination buffer is smaller than the plain length recorded in
    /// the stream header.
    InsufficientDestination,
    /// A scratch allocation failed.
    AllocationFailure,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DecodeError::MalformedStream => "malformed or truncated encoded stream",
            DecodeError::InsufficientDestination => "destination buffer too small",
            DecodeError::AllocationFailure => "scratch allocation failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DecodeError {}
