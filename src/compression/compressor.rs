//! The two-stage pipeline driver.
//!
//! Stage one (block transforms) and stage two (static Huffman) each consume
//! a file and produce a file; they are bridged by an unnamed temporary file
//! that stage one finishes writing before stage two opens it. The Huffman
//! encoder reads its input twice, so the bridge is reopened once per pass.
//!
//! The adaptive (Vitter) codec is a standalone single-stage path: code units
//! in, bits out, no intermediate file.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::huffman_coding::{static_huffman, vitter};

use super::block_stage::BlockStage;

/// Open a file for reading, mapping a missing file to [`Error::NotFound`].
fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::NotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Compress a text file into a compact binary file.
pub fn compress(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    info!(
        "Compressing '{}' into '{}'",
        source.display(),
        dest.display()
    );

    // stage one: block transforms into the bridge file
    let bridge = NamedTempFile::new()?;
    BlockStage::new().compress(open_source(source)?, bridge.reopen()?)?;

    // stage two: two-pass huffman over the bridge into the destination
    static_huffman::encode(bridge.reopen()?, bridge.reopen()?, File::create(dest)?)?;
    Ok(())
}

/// Restore a text file from a compressed binary file.
pub fn uncompress(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    info!(
        "Decompressing '{}' into '{}'",
        source.display(),
        dest.display()
    );

    // stage two first: huffman decoding into the bridge file
    let bridge = NamedTempFile::new()?;
    static_huffman::decode(open_source(source)?, bridge.reopen()?)?;

    // then the reverse block transforms into the destination
    BlockStage::new().uncompress(bridge.reopen()?, File::create(dest)?)?;
    Ok(())
}

/// Compress a text file with the adaptive codec.
pub fn vitter_compress(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    vitter::encode_stream(open_source(source)?, File::create(dest)?)?;
    Ok(())
}

/// Restore a text file compressed with the adaptive codec.
pub fn vitter_uncompress(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    vitter::decode_stream(open_source(source)?, File::create(dest)?)?;
    Ok(())
}
