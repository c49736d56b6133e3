//! Code unit frequency counting for a block of data.
//!
//! Builds a table of 65536 u32 counters holding the frequency of each code
//! unit in the block given to the freqs function.
//!
//! NOTE: This will use multi-threading when the data is over 64k in length.

use rayon::prelude::*;

use crate::ALPHABET_SIZE;

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u16]) -> Vec<u32> {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u32; ALPHABET_SIZE],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u32; ALPHABET_SIZE],
                |mut acc, f| {
                    acc.iter_mut().zip(&f).for_each(|(a, b)| *a += b);
                    acc
                },
            )
    } else {
        let mut freqs = vec![0_u32; ALPHABET_SIZE];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn counts_small_block() {
        let data: Vec<u16> = "abracadabra".encode_utf16().collect();
        let f = freqs(&data);
        assert_eq!(f['a' as usize], 5);
        assert_eq!(f['b' as usize], 2);
        assert_eq!(f['r' as usize], 2);
        assert_eq!(f['c' as usize], 1);
        assert_eq!(f['d' as usize], 1);
        assert_eq!(f.iter().map(|&c| c as usize).sum::<usize>(), data.len());
    }
}
