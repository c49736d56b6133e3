//! Whole-file semi-adaptive Huffman coding.
//!
//! The encoded file is laid out as follows:
//! - the number of code units in the source, as a length-prefixed long;
//! - a pre-order bit serialisation of the Huffman tree (nothing if the
//!   source is empty);
//! - the concatenated codes of the source units (nothing if the source is
//!   empty);
//! - zero bits completing the last byte.
//!
//! In the pre-order serialisation an internal node is a 0 followed by its
//! zero subtree then its one subtree; a leaf is a 1 followed by the 16 bits
//! of its code unit.
//!
//! A single-leaf tree maps its unit to the empty code: the decoder emits the
//! unit without consuming bits, which is sound precisely because the unit
//! count travels in the header.

use std::collections::{BTreeMap, BinaryHeap, HashMap};
use std::io::{Read, Write};

use log::{info, trace};

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::tools::unicode::{CodeUnitReader, CodeUnitWriter};
use crate::ALPHABET_SIZE;

/// A static Huffman tree. Weights only matter during construction; a tree
/// read back from a file carries zero weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShTree {
    /// A code unit and its number of occurrences in the source.
    Leaf { unit: u16, weight: u64 },
    /// Two subtrees; the zero side is the code-bit-0 child.
    Internal {
        zero: Box<ShTree>,
        one: Box<ShTree>,
        weight: u64,
    },
}

impl ShTree {
    fn weight(&self) -> u64 {
        match self {
            ShTree::Leaf { weight, .. } => *weight,
            ShTree::Internal { weight, .. } => *weight,
        }
    }
}

/// Queue entry ordered by (weight, insertion sequence), inverted so the
/// std max-heap pops the smallest first. The sequence number makes
/// tie-breaking deterministic: equal weights pop in insertion order.
struct PoolEntry {
    weight: u64,
    seq: u64,
    tree: ShTree,
}

impl PartialEq for PoolEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for PoolEntry {}
impl PartialOrd for PoolEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for PoolEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

/// Uses the given code unit frequencies to build a Huffman tree, or `None`
/// for an empty frequency map. Leaves enter the queue in ascending unit
/// order; the two lightest subtrees merge until one remains.
pub fn build_tree(frequencies: &BTreeMap<u16, u64>) -> Option<ShTree> {
    let mut seq = 0_u64;
    let mut pool: BinaryHeap<PoolEntry> = frequencies
        .iter()
        .map(|(&unit, &weight)| {
            seq += 1;
            PoolEntry {
                weight,
                seq,
                tree: ShTree::Leaf { unit, weight },
            }
        })
        .collect();

    while pool.len() > 1 {
        let zero = pool.pop().expect("pool has at least two entries").tree;
        let one = pool.pop().expect("pool has at least two entries").tree;
        let weight = zero.weight() + one.weight();
        seq += 1;
        pool.push(PoolEntry {
            weight,
            seq,
            tree: ShTree::Internal {
                zero: Box::new(zero),
                one: Box::new(one),
                weight,
            },
        });
    }
    pool.pop().map(|entry| entry.tree)
}

/// A Huffman code: `len` bits of `bits`, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u32,
}

/// Maps each code unit of the source to its Huffman code. A single-leaf
/// tree yields the empty code (len 0).
pub fn build_code_table(tree: &ShTree) -> HashMap<u16, Code> {
    let mut table = HashMap::new();
    // Code lengths stay well under 64: a deeper tree would need more source
    // units than a file can hold.
    fill_codes(tree, Code { bits: 0, len: 0 }, &mut table);
    table
}

fn fill_codes(tree: &ShTree, code: Code, table: &mut HashMap<u16, Code>) {
    match tree {
        ShTree::Leaf { unit, .. } => {
            table.insert(*unit, code);
        }
        ShTree::Internal { zero, one, .. } => {
            fill_codes(
                zero,
                Code {
                    bits: code.bits << 1,
                    len: code.len + 1,
                },
                table,
            );
            fill_codes(
                one,
                Code {
                    bits: code.bits << 1 | 1,
                    len: code.len + 1,
                },
                table,
            );
        }
    }
}

/// Serialise the tree in pre-order.
fn write_tree<W: Write>(writer: &mut BitWriter<W>, tree: &ShTree) -> Result<()> {
    match tree {
        ShTree::Leaf { unit, .. } => {
            writer.write_bit(1)?;
            writer.write_code_unit(*unit)
        }
        ShTree::Internal { zero, one, .. } => {
            writer.write_bit(0)?;
            write_tree(writer, zero)?;
            write_tree(writer, one)
        }
    }
}

/// Rebuild a tree from its pre-order serialisation.
fn read_tree<R: Read>(reader: &mut BitReader<R>, depth: usize) -> Result<ShTree> {
    if depth > ALPHABET_SIZE {
        return Err(Error::malformed("serialised tree exceeds alphabet depth"));
    }
    if reader.read_bool()? {
        Ok(ShTree::Leaf {
            unit: reader.read_code_unit()?,
            weight: 0,
        })
    } else {
        let zero = read_tree(reader, depth + 1)?;
        let one = read_tree(reader, depth + 1)?;
        Ok(ShTree::Internal {
            zero: Box::new(zero),
            one: Box::new(one),
            weight: 0,
        })
    }
}

/// Encodes a stream of code units. The source is consumed twice, so two
/// independently-opened readers over the same content are required: one for
/// the frequency pass, one for the code emission pass.
pub fn encode<R1: Read, R2: Read, W: Write>(
    frequency_pass: R1,
    emission_pass: R2,
    sink: W,
) -> Result<W> {
    // First pass: count the frequency of each code unit in the whole stream.
    let mut frequencies: BTreeMap<u16, u64> = BTreeMap::new();
    let mut count = 0_u64;
    let mut reader = CodeUnitReader::new(frequency_pass);
    while let Some(unit) = reader.read_unit()? {
        *frequencies.entry(unit).or_insert(0) += 1;
        count += 1;
    }
    info!(
        "huffman: {} units, {} distinct",
        count,
        frequencies.len()
    );

    let tree = build_tree(&frequencies);

    let mut writer = BitWriter::new(sink);
    writer.write_long_with_length(count)?;
    if let Some(tree) = &tree {
        write_tree(&mut writer, tree)?;
    }

    // Second pass: emit the code of every unit in order.
    let table = tree.as_ref().map(build_code_table).unwrap_or_default();
    let mut reader = CodeUnitReader::new(emission_pass);
    while let Some(unit) = reader.read_unit()? {
        let code = table
            .get(&unit)
            .ok_or_else(|| Error::malformed("source changed between huffman passes"))?;
        writer.write_bits(code.bits, code.len)?;
    }
    writer.close()
}

/// Decodes a stream previously produced by [`encode`].
pub fn decode<R: Read, W: Write>(source: R, sink: W) -> Result<W> {
    let mut reader = BitReader::new(source);
    let count = reader.read_long_with_length()?;
    let mut writer = CodeUnitWriter::new(sink);
    if count == 0 {
        return writer.finish();
    }
    let tree = read_tree(&mut reader, 0)?;
    trace!("huffman: decoding {} units", count);
    for _ in 0..count {
        let mut node = &tree;
        loop {
            match node {
                ShTree::Leaf { unit, .. } => {
                    writer.write_unit(*unit)?;
                    break;
                }
                ShTree::Internal { zero, one, .. } => {
                    node = if reader.read_bool()? { one } else { zero };
                }
            }
        }
    }
    writer.finish()
}
