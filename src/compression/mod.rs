//! The compression module wires the engines into the two-stage codec.
//!
//! Compression happens in the following steps:
//! - Block stage: the text is cut into fixed size blocks; each block goes
//!   through the Burrows-Wheeler transform and then, prefixed by a small
//!   header carrying the primary index, through the adapted Move-to-Front
//!   transform. The result is an intermediate stream of code units.
//! - Huffman stage: the whole intermediate stream is encoded with the
//!   semi-adaptive Huffman coder into the final bit stream.
//!
//! Decompression follows the inverse order: Huffman decoding, then per
//! block the reverse MTF and the reverse BWT.
//!
//! The two stages communicate through a file; stage one closes it before
//! stage two opens it. The adaptive (Vitter) coder is an independent
//! single-stage path with no intermediate file.

pub mod block_stage;
pub mod compressor;

/// Number of code units processed per block in stage one.
pub const BLOCK_SIZE: usize = 4096;

/// Number of code units in a block header (the primary index in hex).
pub const BLOCK_HEADER_SIZE: usize = 3;
