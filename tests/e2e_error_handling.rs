//! End-to-end scenarios from the testable-properties table: concrete inputs
//! with a specific expected encoding shape or failure mode.

use salz::block::stream::{read_header, STREAM_TYPE_PLAIN, STREAM_TYPE_SALZ};
use salz::{decode, encode, encoded_len_max, DecodeError, EncodeError};

fn encode_to_vec(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; encoded_len_max(src.len())];
    let n = encode(src, &mut dst).unwrap();
    dst.truncate(n);
    dst
}

#[test]
fn scenario_1_very_short_block_round_trips() {
    let mut src = b"abracadabra".to_vec();
    src.extend_from_slice(&[0u8; 8]);
    let enc = encode_to_vec(&src);

    let hdr = read_header(&enc).unwrap();
    assert_eq!(hdr.stream_type, STREAM_TYPE_SALZ);

    let mut plain = vec![0u8; src.len()];
    let n = decode(&enc, &mut plain).unwrap();
    assert_eq!(&plain[..n], &src[..]);
}

#[test]
fn scenario_2_long_run_of_one_byte_compresses_well() {
    let src = vec![b'A'; 4096];
    let enc = encode_to_vec(&src);
    assert!(enc.len() < src.len() / 4, "a 4 KiB run of one byte should compress heavily");

    let mut plain = vec![0u8; src.len()];
    let n = decode(&enc, &mut plain).unwrap();
    assert_eq!(&plain[..n], &src[..]);
}

#[test]
fn scenario_3_uniform_random_input_falls_back_to_plain() {
    // xorshift32: deterministic, no external `rand` dependency needed for a
    // stream indistinguishable from uniform random by LZ matching.
    let mut state: u32 = 0xC0FF_EE11;
    let mut src = vec![0u8; 4096];
    for b in src.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *b = (state & 0xff) as u8;
    }

    let enc = encode_to_vec(&src);
    let hdr = read_header(&enc).unwrap();
    assert_eq!(hdr.stream_type, STREAM_TYPE_PLAIN);

    let mut plain = vec![0u8; src.len()];
    let n = decode(&enc, &mut plain).unwrap();
    assert_eq!(&plain[..n], &src[..]);
}

#[test]
fn scenario_4_tiled_sentence_round_trips() {
    let src = b"the quick brown fox jumps over the lazy dog".repeat(10);
    assert_eq!(src.len(), 430);
    let enc = encode_to_vec(&src);

    let mut plain = vec![0u8; src.len()];
    let n = decode(&enc, &mut plain).unwrap();
    assert_eq!(&plain[..n], &src[..]);
    assert!(enc.len() < src.len());
}

#[test]
fn scenario_5_repeated_half_block_round_trips() {
    let mut state: u32 = 0x1357_9BDF;
    let mut half = vec![0u8; 32768];
    for b in half.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *b = (state & 0xff) as u8;
    }
    let mut src = half.clone();
    src.extend_from_slice(&half);

    let enc = encode_to_vec(&src);
    let mut plain = vec![0u8; src.len()];
    let n = decode(&enc, &mut plain).unwrap();
    assert_eq!(&plain[..n], &src[..]);
    assert!(
        enc.len() < src.len() * 3 / 4,
        "the second half should mostly resolve to one long back-reference"
    );
}

#[test]
fn scenario_6_truncated_salz_body_is_rejected() {
    let src = b"the quick brown fox jumps over the lazy dog".repeat(10);
    let enc = encode_to_vec(&src);
    let hdr = read_header(&enc).unwrap();
    assert_eq!(hdr.stream_type, STREAM_TYPE_SALZ);

    let truncated = &enc[..enc.len() - 1];
    let mut plain = vec![0u8; src.len()];
    let err = decode(truncated, &mut plain).unwrap_err();
    assert_eq!(err, DecodeError::MalformedStream);
}

#[test]
fn inputs_shorter_than_tail_reservation_are_rejected_fast() {
    let mut dst = vec![0u8; 64];
    for len in 0..8 {
        let src = vec![0u8; len];
        let err = encode(&src, &mut dst).unwrap_err();
        assert_eq!(err, EncodeError::InsufficientDestination);
    }
}
