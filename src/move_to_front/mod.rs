//! The move_to_front module implements the Move-to-Front transform over the
//! full 16-bit code unit alphabet.
//!
//! MTF replaces each code unit by its rank in a recency-ordered list, then
//! promotes the unit to rank 0. After a Burrows-Wheeler transform the input
//! is full of local runs, so the ranks cluster near zero and the downstream
//! Huffman stage sees a heavily skewed distribution.
//!
//! All code units of one message have to go through the same codec instance;
//! the list must be reset (or a fresh codec created) between the encoding
//! and decoding phases.
//!
//! The transform exists in two forms:
//! - the raw form outputs the rank itself;
//! - the adapted form rotates the rank by [`char_shift::SHIFT_START`] so the
//!   frequent low ranks land on printable characters, keeping the
//!   intermediate stream inspectable.

pub mod char_shift;
pub mod recency_list;

use recency_list::MtfList;

/// A Move-to-Front encoder or decoder over the 16-bit alphabet.
pub struct MoveToFront {
    list: MtfList,
}

impl MoveToFront {
    /// Creates a new codec with the list in lexicographic order.
    pub fn new() -> Self {
        Self {
            list: MtfList::new(),
        }
    }

    /// Restores the lexicographic order. Call between two encoding or
    /// decoding operations.
    pub fn reset(&mut self) {
        self.list.reset();
    }

    /// Transforms a single code unit into its rank in the list.
    pub fn raw_transform(&mut self, c: u16) -> u16 {
        self.list.rank_and_promote(c)
    }

    /// Retrieves the code unit at the given rank.
    pub fn raw_reverse(&mut self, index: u16) -> u16 {
        self.list.at_and_promote(index)
    }

    /// Transforms a single code unit into the shifted form of its rank.
    pub fn encode(&mut self, c: u16) -> u16 {
        char_shift::int_to_char(self.list.rank_and_promote(c))
    }

    /// Retrieves the code unit encoded as a shifted rank.
    pub fn decode(&mut self, shifted: u16) -> u16 {
        self.list.at_and_promote(char_shift::char_to_int(shifted))
    }

    /// Transforms a block of code units, left to right, sharing the list
    /// across the whole block.
    pub fn encode_block(&mut self, block: &[u16]) -> Vec<u16> {
        block.iter().map(|&c| self.encode(c)).collect()
    }

    /// Reverses a block of shifted ranks, left to right.
    pub fn decode_block(&mut self, block: &[u16]) -> Vec<u16> {
        block.iter().map(|&u| self.decode(u)).collect()
    }
}

impl Default for MoveToFront {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::MoveToFront;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn first_occurrence_rank_is_code_point() {
        let mut mtf = MoveToFront::new();
        // fresh list is lexicographic, so 'a' sits at index 0x61
        assert_eq!(mtf.raw_transform(0x61), 0x61);
        // now it is at the front
        assert_eq!(mtf.raw_transform(0x61), 0);
    }

    #[test]
    fn raw_round_trip() {
        let input = units("abracadabra");
        let mut enc = MoveToFront::new();
        let ranks: Vec<u16> = input.iter().map(|&c| enc.raw_transform(c)).collect();
        let mut dec = MoveToFront::new();
        let output: Vec<u16> = ranks.iter().map(|&i| dec.raw_reverse(i)).collect();
        assert_eq!(output, input);
    }

    #[test]
    fn adapted_block_round_trip() {
        let input = units("this, that and the other! \u{263A}");
        let mut enc = MoveToFront::new();
        let encoded = enc.encode_block(&input);
        let mut dec = MoveToFront::new();
        assert_eq!(dec.decode_block(&encoded), input);
    }

    #[test]
    fn reset_restores_fresh_ranks() {
        let mut mtf = MoveToFront::new();
        mtf.encode_block(&units("zebra"));
        mtf.reset();
        assert_eq!(mtf.raw_transform(0x61), 0x61);
    }

    #[test]
    fn runs_collapse_to_zero_ranks() {
        let mut mtf = MoveToFront::new();
        let ranks = mtf.encode_block(&units("aaaa"));
        let mut dec = MoveToFront::new();
        assert_eq!(dec.raw_reverse(super::char_shift::char_to_int(ranks[0])), 0x61);
        // after the first unit, every repeat is rank 0
        for &r in &ranks[1..] {
            assert_eq!(super::char_shift::char_to_int(r), 0);
        }
    }
}
