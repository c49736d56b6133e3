use crate::error::{Error, Result};
use crate::tools::freq_count::freqs;

use super::BwtBlock;

/// Reverse a Burrows-Wheeler transformed block.
///
/// Two statistics tables are built from the transformed content:
/// - `prev_match[i]`: how many positions before `i` hold the same code unit,
/// - `nb_less_than[c]`: how many code units in the block sort strictly below
///   `c` (a cumulative frequency table).
///
/// Iterating the LF-mapping from the primary index then yields the source
/// block in reverse order.
pub fn bwt_decode(block: &BwtBlock) -> Result<Vec<u16>> {
    let content = &block.content;
    let n = content.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if block.index >= n {
        return Err(Error::malformed(format!(
            "primary index {} out of range for a {} unit block",
            block.index, n
        )));
    }

    // Cumulative count of units sorting strictly below each unit
    let freq = freqs(content);
    let mut nb_less_than = vec![0_u32; freq.len()];
    let mut sum = 0_u32;
    for (c, &f) in freq.iter().enumerate() {
        nb_less_than[c] = sum;
        sum += f;
    }

    // Rank of each position among equal units seen so far
    let mut running = vec![0_u32; freq.len()];
    let mut prev_match = vec![0_u32; n];
    for (i, &c) in content.iter().enumerate() {
        prev_match[i] = running[c as usize];
        running[c as usize] += 1;
    }

    // Walk the LF-mapping; the source comes out back to front
    let mut out = Vec::with_capacity(n);
    let mut pos = block.index;
    for _ in 0..n {
        let c = content[pos];
        out.push(c);
        pos = (nb_less_than[c as usize] + prev_match[pos]) as usize;
    }
    out.reverse();
    Ok(out)
}
