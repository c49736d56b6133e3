use std::cmp::Ordering;

use log::trace;
use rayon::prelude::*;

use super::BwtBlock;

/// Sort rotation offsets in parallel above this block length.
const PAR_SORT_THRESHOLD: usize = 40_000;

/// Burrows-Wheeler transform of a block of code units.
///
/// Each rotation of the block is represented by its offset; the offsets are
/// sorted by comparing the rotations lexicographically, then the last column
/// is read off along with the position of offset 0 (the source rotation).
pub fn bwt_encode(block: &[u16]) -> BwtBlock {
    let n = block.len();
    if n == 0 {
        // Not produced by the pipeline, but harmless to accept.
        return BwtBlock {
            content: Vec::new(),
            index: 0,
        };
    }

    // Create the rotation index into the block. u32 is plenty for any block.
    let mut rotations = (0_u32..n as u32).collect::<Vec<u32>>();

    // Sort the rotations
    if n > PAR_SORT_THRESHOLD {
        rotations[..]
            .par_sort_unstable_by(|a, b| rotation_compare(*a as usize, *b as usize, block));
    } else {
        rotations[..].sort_unstable_by(|a, b| rotation_compare(*a as usize, *b as usize, block));
    }

    // Get the primary index and the last column of the sorted matrix
    let mut index = 0;
    let mut content = Vec::with_capacity(n);
    for (row, &rot) in rotations.iter().enumerate() {
        if rot == 0 {
            index = row;
        }
        content.push(block[(rot as usize + n - 1) % n]);
    }
    trace!("bwt: {} units, primary index {}", n, index);
    BwtBlock { content, index }
}

/// Compare two rotations of the block to decide which sorts first.
fn rotation_compare(a: usize, b: usize, block: &[u16]) -> Ordering {
    let n = block.len();
    for i in 0..n {
        let ca = block[(a + i) % n];
        let cb = block[(b + i) % n];
        match ca.cmp(&cb) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    // Identical content: the rotations are equal.
    Ordering::Equal
}

#[cfg(test)]
fn units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

#[test]
fn bwt_encode_abracadabra() {
    let out = bwt_encode(&units("abracadabra"));
    assert_eq!(out.content, units("rdarcaaaabb"));
    assert_eq!(out.index, 2);
}

#[test]
fn bwt_encode_single_unit() {
    let out = bwt_encode(&units("x"));
    assert_eq!(out.content, units("x"));
    assert_eq!(out.index, 0);
}

#[test]
fn bwt_encode_empty() {
    let out = bwt_encode(&[]);
    assert!(out.content.is_empty());
    assert_eq!(out.index, 0);
}

#[test]
fn bwt_encode_all_equal() {
    // every rotation compares equal; the output is still a permutation
    let out = bwt_encode(&units("aaaa"));
    assert_eq!(out.content, units("aaaa"));
    assert!(out.index < 4);
}
