//! Black-box round-trip coverage for the block codec and file framing.

use salz::{decode, encode, encoded_len_max};

fn round_trip_block(src: &[u8]) {
    let mut dst = vec![0u8; encoded_len_max(src.len())];
    let encoded_len = encode(src, &mut dst).unwrap();
    let mut plain = vec![0u8; src.len()];
    let decoded_len = decode(&dst[..encoded_len], &mut plain).unwrap();
    assert_eq!(decoded_len, src.len());
    assert_eq!(&plain[..], src);
}

#[test]
fn round_trips_minimum_size_input() {
    round_trip_block(b"12345678");
}

#[test]
fn round_trips_highly_repetitive_text() {
    let src = "the quick brown fox jumps over the lazy dog. ".repeat(200);
    round_trip_block(src.as_bytes());
}

#[test]
fn round_trips_single_byte_repeated() {
    round_trip_block(&vec![b'Z'; 10_000]);
}

#[test]
fn round_trips_binary_data_with_all_byte_values() {
    let src: Vec<u8> = (0..=255u8).cycle().take(50_000).collect();
    round_trip_block(&src);
}

#[test]
fn round_trips_a_silesia_like_mixed_corpus() {
    // A mix of English prose, numbers and repeated whitespace, approximating
    // the kind of input a general-purpose corpus exercises.
    let mut src = Vec::new();
    for i in 0..5000 {
        src.extend_from_slice(format!("line {i}: the quick brown fox\n").as_bytes());
    }
    round_trip_block(&src);
}

#[test]
fn file_level_round_trip_across_several_blocks() {
    use salz::file::{compress_stream, decompress_stream};

    let mut src = vec![0u8; 10 * 32 * 1024 + 777];
    for (i, b) in src.iter_mut().enumerate() {
        *b = (i % 113) as u8;
    }

    let mut compressed = Vec::new();
    compress_stream(&src[..], &mut compressed, 0).unwrap();

    let mut decompressed = Vec::new();
    decompress_stream(&compressed[..], &mut decompressed).unwrap();
    assert_eq!(decompressed, src);
    assert!(
        compressed.len() < src.len(),
        "compressed output should shrink a compressible corpus"
    );
}
