//! The bwt_algorithms module implements the Burrows-Wheeler transform.
//!
//! The transform permutes a block so that runs of similar code units are more
//! likely to occur, which makes the downstream move-to-front and Huffman
//! stages far more effective. A transformed block is characterised by the
//! last column of the sorted rotation matrix and the primary index: the row
//! at which the original rotation lands after sorting.
//!
//! Rotations are never materialised; each is an integer offset into the
//! source block and the sort compares code units through a wraparound index.

pub mod bwt_inverse;
pub mod bwt_sort;

pub use bwt_inverse::bwt_decode;
pub use bwt_sort::bwt_encode;

/// A block transformed via the Burrows-Wheeler transform: the last column of
/// the sorted rotation matrix plus the row index of the source rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtBlock {
    /// The transformed block (same length as the source block).
    pub content: Vec<u16>,
    /// The index of the source block in the sorted list of rotations.
    pub index: usize,
}
