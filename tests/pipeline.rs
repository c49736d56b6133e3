use std::fs;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use jpack::compression::compressor::{compress, uncompress, vitter_compress, vitter_uncompress};
use jpack::compression::BLOCK_SIZE;

/// Compress then decompress `text` through the primary pipeline and return
/// the restored text.
fn pipeline_round_trip(text: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("source.txt");
    let packed = dir.path().join("source.pck");
    let restored = dir.path().join("source-R.txt");
    fs::write(&src, text).unwrap();

    compress(&src, &packed).unwrap();
    uncompress(&packed, &restored).unwrap();
    fs::read_to_string(&restored).unwrap()
}

#[test]
fn abracadabra() {
    assert_eq!(pipeline_round_trip("abracadabra"), "abracadabra");
}

#[test]
fn empty_file() {
    assert_eq!(pipeline_round_trip(""), "");
}

#[test]
fn single_repeated_character() {
    assert_eq!(pipeline_round_trip("aaaa"), "aaaa");
}

#[test]
fn exact_block_boundary() {
    // 8192 units fill exactly two blocks in stage one
    let text = "ab".repeat(BLOCK_SIZE);
    assert_eq!(pipeline_round_trip(&text), text);
}

#[test]
fn plain_english_paragraph() {
    let text = "The Burrows-Wheeler transform rearranges a character string into \
                runs of similar characters. This is useful for compression, since \
                it tends to be easy to compress a string that has runs of repeated \
                characters.\n";
    assert_eq!(pipeline_round_trip(text), text);
}

#[test]
fn accents_and_supplementary_characters() {
    let text = "déjà vu, naïveté, \u{1F600}\u{1F680} and back to ascii";
    assert_eq!(pipeline_round_trip(text), text);
}

#[test]
fn random_ascii_files() {
    let mut rng = StdRng::seed_from_u64(0x6A7061636B);
    for len in [1_usize, 17, 255, 4095, 4096, 4097, 10_000] {
        let text: String = (0..len)
            .map(|_| (rng.gen_range(0x20_u8..0x7F)) as char)
            .collect();
        assert_eq!(pipeline_round_trip(&text), text, "failed at length {len}");
    }
}

#[test]
fn random_unicode_files() {
    let mut rng = StdRng::seed_from_u64(42);
    for len in [10_usize, 500, 5000] {
        let text: String = (0..len)
            .map(|_| loop {
                if let Some(c) = char::from_u32(rng.gen_range(0..0x11000)) {
                    break c;
                }
            })
            .collect();
        assert_eq!(pipeline_round_trip(&text), text, "failed at length {len}");
    }
}

#[test]
fn vitter_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("source.txt");
    let packed = dir.path().join("source.vit");
    let restored = dir.path().join("source-R.txt");
    let text = "sing, o muse, of the wrath of achilles";
    fs::write(&src, text).unwrap();

    vitter_compress(&src, &packed).unwrap();
    vitter_uncompress(&packed, &restored).unwrap();
    assert_eq!(fs::read_to_string(&restored).unwrap(), text);
}

#[test]
fn compressed_text_is_smaller() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("source.txt");
    let packed = dir.path().join("source.pck");
    let text = "the quick brown fox jumps over the lazy dog. ".repeat(500);
    fs::write(&src, &text).unwrap();

    compress(&src, &packed).unwrap();
    let original = fs::metadata(&src).unwrap().len();
    let compressed = fs::metadata(&packed).unwrap().len();
    assert!(
        compressed < original / 2,
        "expected a real ratio, got {compressed} of {original}"
    );
}
