//! Library-level end-to-end round-trip tests exercising the full
//! optimize → compress → decompress pipeline through the public API,
//! across file sizes, alphabets, and `skip` values.

use zx0r::config::{OFFSET_LIMIT_FULL, OFFSET_LIMIT_QUICK};
use zx0r::{compress, decompress, optimize};

fn roundtrip(input: &[u8], skip: usize, offset_limit: usize, backwards_mode: bool, threads: usize) {
    let terminal = optimize(input, skip, offset_limit, threads, false);
    let compressed = compress(&terminal, input, skip, backwards_mode);
    let restored = decompress(&compressed, backwards_mode).expect("decode should succeed");
    assert_eq!(restored, input[skip..]);
}

#[test]
fn roundtrip_small_text() {
    roundtrip(b"hello, world!", 0, OFFSET_LIMIT_FULL, true, 1);
    roundtrip(b"hello, world!", 0, OFFSET_LIMIT_FULL, false, 1);
}

#[test]
fn roundtrip_quick_mode() {
    let input: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    roundtrip(&input, 0, OFFSET_LIMIT_QUICK, true, 1);
}

#[test]
fn roundtrip_large_repetitive_file() {
    let input = "the quick brown fox jumps over the lazy dog "
        .repeat(2000)
        .into_bytes();
    roundtrip(&input, 0, OFFSET_LIMIT_FULL, true, 4);
}

#[test]
fn roundtrip_binary_alphabet() {
    let mut input = Vec::new();
    for i in 0..5000usize {
        input.push(if i % 7 == 0 { 0xFF } else { 0x00 });
    }
    roundtrip(&input, 0, OFFSET_LIMIT_FULL, true, 2);
}

#[test]
fn roundtrip_full_byte_range() {
    let input: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
    roundtrip(&input, 0, OFFSET_LIMIT_FULL, false, 1);
}

#[test]
fn roundtrip_with_skip_prefix() {
    let input: Vec<u8> = (0..500u32).map(|i| (i % 97) as u8).collect();
    roundtrip(&input, 50, OFFSET_LIMIT_FULL, true, 1);
}

#[test]
fn roundtrip_single_byte() {
    roundtrip(b"x", 0, OFFSET_LIMIT_FULL, true, 1);
}

#[test]
fn roundtrip_determinism_across_thread_counts_produces_same_plaintext() {
    let input = "abcabcabcabcxyzxyzxyz123123123".repeat(50).into_bytes();
    for threads in [1usize, 2, 4, 8] {
        roundtrip(&input, 0, OFFSET_LIMIT_FULL, true, threads);
    }
}
