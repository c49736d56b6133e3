//! jpack, a block-sorting text compressor.
//!
//! - Compresses text files into a compact binary representation and restores
//!   them bit-exactly via the inverse transforms.
//! - The primary codec chains a block-level Burrows-Wheeler transform, a
//!   Move-to-Front transform per block and a whole-file semi-adaptive
//!   Huffman coder.
//! - An independent adaptive Huffman codec (Vitter's algorithm) offers a
//!   single-pass alternative with no intermediate file.
//!
//! Basic usage to compress a file:
//!
//! ```text
//! $> jpack -c test.txt
//! ```
//!
//! This creates the compressed file test.txt.pck. Decompress it with:
//!
//! ```text
//! $> jpack -d test.txt.pck restored.txt
//! ```

pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod move_to_front;
pub mod tools;

pub use error::{Error, Result};

/// Size of the transform alphabet: every engine works on 16-bit code units.
pub const ALPHABET_SIZE: usize = 65536;
