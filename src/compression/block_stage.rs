//! Stage one of the primary codec: block transforms.
//!
//! The source is read in blocks of [`BLOCK_SIZE`](super::BLOCK_SIZE) code
//! units (a short final block keeps its actual length). Each block is
//! Burrows-Wheeler transformed, then the last column goes through the
//! adapted Move-to-Front transform. The emitted form is
//! `header || content`, where the header is the primary index rendered as
//! exactly three uppercase hex digits. The index always fits: it is below
//! the block size, which is at most 0xFFF + 1.
//!
//! One Move-to-Front list is shared across all blocks of a stream and reset
//! at the start of each direction.

use std::io::{Read, Write};

use log::{info, trace};

use crate::bwt_algorithms::{bwt_decode, bwt_encode, BwtBlock};
use crate::error::{Error, Result};
use crate::move_to_front::MoveToFront;
use crate::tools::unicode::{CodeUnitReader, CodeUnitWriter};

use super::{BLOCK_HEADER_SIZE, BLOCK_SIZE};

/// The block transform stage. Owns the Move-to-Front state shared by the
/// blocks of one stream.
pub struct BlockStage {
    mtf: MoveToFront,
}

impl BlockStage {
    pub fn new() -> Self {
        Self {
            mtf: MoveToFront::new(),
        }
    }

    /// Transform a text stream block by block into the intermediate stream.
    pub fn compress<R: Read, W: Write>(&mut self, source: R, sink: W) -> Result<W> {
        self.mtf.reset();
        let mut reader = CodeUnitReader::new(source);
        let mut writer = CodeUnitWriter::new(sink);
        let mut blocks = 0_usize;
        while let Some(block) = reader.read_block(BLOCK_SIZE)? {
            writer.write_block(&transform_block(&mut self.mtf, &block))?;
            blocks += 1;
        }
        info!("block stage: {} blocks transformed", blocks);
        writer.finish()
    }

    /// Reverse an intermediate stream block by block into the original text.
    pub fn uncompress<R: Read, W: Write>(&mut self, source: R, sink: W) -> Result<W> {
        self.mtf.reset();
        let mut reader = CodeUnitReader::new(source);
        let mut writer = CodeUnitWriter::new(sink);
        let mut blocks = 0_usize;
        loop {
            // a missing header is the clean end of the stream
            let header = match reader.read_block(BLOCK_HEADER_SIZE)? {
                Some(header) if header.len() == BLOCK_HEADER_SIZE => header,
                Some(_) => return Err(Error::malformed("incomplete block header")),
                None => break,
            };
            let content = reader
                .read_block(BLOCK_SIZE)?
                .ok_or_else(|| Error::malformed("block header not followed by any content"))?;
            writer.write_block(&reverse_block(&mut self.mtf, &header, &content)?)?;
            blocks += 1;
        }
        info!("block stage: {} blocks reversed", blocks);
        writer.finish()
    }
}

impl Default for BlockStage {
    fn default() -> Self {
        Self::new()
    }
}

/// BWT then adapted MTF; returns header and content concatenated.
fn transform_block(mtf: &mut MoveToFront, block: &[u16]) -> Vec<u16> {
    let BwtBlock { content, index } = bwt_encode(block);
    trace!("block of {} units, primary index {}", block.len(), index);
    let mut out = format!("{:03X}", index).encode_utf16().collect::<Vec<u16>>();
    debug_assert_eq!(out.len(), BLOCK_HEADER_SIZE);
    out.extend(mtf.encode_block(&content));
    out
}

/// Adapted reverse MTF then reverse BWT, parsing the header's hex index.
fn reverse_block(mtf: &mut MoveToFront, header: &[u16], content: &[u16]) -> Result<Vec<u16>> {
    let content = mtf.decode_block(content);
    let header: String = char::decode_utf16(header.iter().copied())
        .collect::<std::result::Result<String, _>>()
        .map_err(|_| Error::malformed("block header is not text"))?;
    let index = usize::from_str_radix(&header, 16)
        .map_err(|_| Error::malformed(format!("invalid hex in block header '{header}'")))?;
    bwt_decode(&BwtBlock { content, index })
}

#[cfg(test)]
mod test {
    use super::BlockStage;
    use crate::compression::{BLOCK_HEADER_SIZE, BLOCK_SIZE};

    fn compress(text: &str) -> Vec<u8> {
        BlockStage::new()
            .compress(text.as_bytes(), Vec::new())
            .unwrap()
    }

    fn round_trip(text: &str) {
        let intermediate = compress(text);
        let restored = BlockStage::new()
            .uncompress(intermediate.as_slice(), Vec::new())
            .unwrap();
        assert_eq!(String::from_utf8(restored).unwrap(), text);
    }

    #[test]
    fn abracadabra_intermediate_layout() {
        let intermediate = compress("abracadabra");
        let text = String::from_utf8(intermediate).unwrap();
        // primary index 2, then the adapted MTF of "rdarcaaaabb"
        assert_eq!(&text[..3], "002");
        assert_eq!(text.chars().count(), 3 + 11);
        // runs of 'a' in the BWT output become runs of rank zero, i.e. 'A'
        assert_eq!(text.matches('A').count(), 4);
    }

    #[test]
    fn empty_source_empty_stream() {
        assert!(compress("").is_empty());
        round_trip("");
    }

    #[test]
    fn block_boundary_makes_two_blocks() {
        let text: String = "ab".repeat(BLOCK_SIZE);
        let intermediate = compress(&text);
        let units: Vec<u16> = String::from_utf8(intermediate)
            .unwrap()
            .encode_utf16()
            .collect();
        assert_eq!(units.len(), 2 * (BLOCK_HEADER_SIZE + BLOCK_SIZE));
        round_trip(&text);
    }

    #[test]
    fn round_trips() {
        round_trip("a");
        round_trip("abracadabra");
        round_trip("Ah que coucou! Les mouettes ont pied.");
        round_trip(&"the quick brown fox jumps over the lazy dog. ".repeat(200));
    }

    #[test]
    fn surrogate_pairs_survive_the_permutation() {
        round_trip("smile \u{1F600}\u{1F601} frown \u{2639}");
    }

    #[test]
    fn header_without_content_is_malformed() {
        let result = BlockStage::new().uncompress("002".as_bytes(), Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn bad_hex_header_is_malformed() {
        let result = BlockStage::new().uncompress("0xZabcdef".as_bytes(), Vec::new());
        assert!(result.is_err());
    }
}
