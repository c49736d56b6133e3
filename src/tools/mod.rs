//! The tools module provides the plumbing around the jpack engines.
//!
//! The engines themselves only see abstract streams: a symbol source yielding
//! 16-bit code units and a bit sink accepting individual bits. The tools are:
//! - cli: command line interface for jpack.
//! - freq_count: frequency count over a block of code units.
//! - unicode: UTF-8 text files exposed as streams of UTF-16 code units.

pub mod cli;
pub mod freq_count;
pub mod unicode;
