//! UTF-8 text files exposed as streams of UTF-16 code units.
//!
//! The transform engines operate on a 16-bit alphabet, so text is read and
//! written as UTF-16 code units: characters in the Basic Multilingual Plane
//! map to a single unit, supplementary characters to a surrogate pair. The
//! files themselves stay UTF-8; a leading byte order mark is skipped on read.
//!
//! The intermediate stream between the block stage and the Huffman stage is
//! not text: the Burrows-Wheeler permutation separates surrogate pairs and
//! the move-to-front shift can land any rank in the surrogate band. A lone
//! surrogate has no UTF-8 form, so these units are carried in the three-byte
//! pattern the surrogate code point would use if it were a scalar value
//! (generalized UTF-8). Valid text never produces such sequences, and every
//! code unit sequence round-trips losslessly.

use std::io::{BufReader, BufWriter, Read, Write};

use crate::error::{Error, Result};

const BOM: u32 = 0xFEFF;

const SURROGATES: std::ops::Range<u32> = 0xD800..0xE000;
const LOW_SURROGATES: std::ops::Range<u32> = 0xDC00..0xE000;

/// Reads a UTF-8 text source as a sequence of UTF-16 code units.
pub struct CodeUnitReader<R: Read> {
    source: BufReader<R>,
    /// Low half of a surrogate pair waiting to be delivered.
    pending: Option<u16>,
    at_start: bool,
}

impl<R: Read> CodeUnitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: BufReader::new(source),
            pending: None,
            at_start: true,
        }
    }

    /// Read the next code unit, or `None` once the source is exhausted.
    pub fn read_unit(&mut self) -> Result<Option<u16>> {
        if let Some(low) = self.pending.take() {
            return Ok(Some(low));
        }
        let cp = match self.read_code_point()? {
            Some(cp) => cp,
            None => return Ok(None),
        };
        if cp >= 0x10000 {
            let offset = cp - 0x10000;
            self.pending = Some((0xDC00 + (offset & 0x3FF)) as u16);
            Ok(Some((0xD800 + (offset >> 10)) as u16))
        } else {
            Ok(Some(cp as u16))
        }
    }

    /// Read up to `max` code units. Returns `None` when the source was
    /// already exhausted, otherwise the units read (fewer than `max` on the
    /// last block).
    pub fn read_block(&mut self, max: usize) -> Result<Option<Vec<u16>>> {
        let mut block = Vec::with_capacity(max);
        while block.len() < max {
            match self.read_unit()? {
                Some(u) => block.push(u),
                None => break,
            }
        }
        if block.is_empty() {
            Ok(None)
        } else {
            Ok(Some(block))
        }
    }

    /// Decode one code point, skipping a byte order mark at the very start
    /// of the source. Surrogate code points are accepted (see module doc).
    fn read_code_point(&mut self) -> Result<Option<u32>> {
        loop {
            let mut buf = [0_u8; 4];
            if self.source.read(&mut buf[..1])? == 0 {
                return Ok(None);
            }
            let width = match buf[0] {
                0x00..=0x7F => 1,
                0xC0..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF4 => 4,
                _ => return Err(Error::malformed("invalid UTF-8 leading byte")),
            };
            if width > 1 {
                self.source
                    .read_exact(&mut buf[1..width])
                    .map_err(|_| Error::malformed("incomplete UTF-8 sequence"))?;
                if buf[1..width].iter().any(|b| b & 0xC0 != 0x80) {
                    return Err(Error::malformed("invalid UTF-8 continuation byte"));
                }
            }
            let cp = match width {
                1 => buf[0] as u32,
                2 => ((buf[0] & 0x1F) as u32) << 6 | (buf[1] & 0x3F) as u32,
                3 => {
                    ((buf[0] & 0x0F) as u32) << 12
                        | ((buf[1] & 0x3F) as u32) << 6
                        | (buf[2] & 0x3F) as u32
                }
                _ => {
                    ((buf[0] & 0x07) as u32) << 18
                        | ((buf[1] & 0x3F) as u32) << 12
                        | ((buf[2] & 0x3F) as u32) << 6
                        | (buf[3] & 0x3F) as u32
                }
            };
            if cp > 0x10FFFF {
                return Err(Error::malformed("code point out of range"));
            }
            let skip_bom = self.at_start && cp == BOM;
            self.at_start = false;
            if !skip_bom {
                return Ok(Some(cp));
            }
        }
    }
}

/// Writes a sequence of UTF-16 code units as UTF-8 text.
///
/// Paired surrogates are recombined into supplementary characters; a lone
/// surrogate is written in its generalized three-byte form (see module doc).
pub struct CodeUnitWriter<W: Write> {
    sink: BufWriter<W>,
    /// High half of a possible surrogate pair waiting for its low half.
    pending_high: Option<u16>,
}

impl<W: Write> CodeUnitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: BufWriter::new(sink),
            pending_high: None,
        }
    }

    /// Write a single code unit.
    pub fn write_unit(&mut self, unit: u16) -> Result<()> {
        if let Some(high) = self.pending_high.take() {
            if LOW_SURROGATES.contains(&(unit as u32)) {
                let cp =
                    0x10000 + (((high as u32 - 0xD800) << 10) | (unit as u32 - 0xDC00));
                return self.write_code_point(cp);
            }
            // the high half stays lone; fall through to handle unit itself
            self.write_code_point(high as u32)?;
        }
        if (0xD800_u16..0xDC00).contains(&unit) {
            self.pending_high = Some(unit);
            Ok(())
        } else {
            self.write_code_point(unit as u32)
        }
    }

    /// Write every unit of a block in order.
    pub fn write_block(&mut self, block: &[u16]) -> Result<()> {
        for &unit in block {
            self.write_unit(unit)?;
        }
        Ok(())
    }

    /// Emit the UTF-8 byte pattern of a code point, including lone
    /// surrogates.
    fn write_code_point(&mut self, cp: u32) -> Result<()> {
        if SURROGATES.contains(&cp) || char::from_u32(cp).is_none() {
            debug_assert!(SURROGATES.contains(&cp));
            let bytes = [
                0xE0 | (cp >> 12) as u8,
                0x80 | ((cp >> 6) & 0x3F) as u8,
                0x80 | (cp & 0x3F) as u8,
            ];
            self.sink.write_all(&bytes)?;
        } else {
            let c = char::from_u32(cp).expect("checked above");
            let mut buf = [0_u8; 4];
            self.sink.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        }
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        if let Some(high) = self.pending_high.take() {
            self.write_code_point(high as u32)?;
        }
        self.sink.flush()?;
        self.sink
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod test {
    use super::{CodeUnitReader, CodeUnitWriter};

    fn units_of(bytes: &[u8]) -> Vec<u16> {
        let mut reader = CodeUnitReader::new(bytes);
        let mut units = Vec::new();
        while let Some(u) = reader.read_unit().unwrap() {
            units.push(u);
        }
        units
    }

    fn bytes_of(units: &[u16]) -> Vec<u8> {
        let mut writer = CodeUnitWriter::new(Vec::new());
        writer.write_block(units).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn ascii_reads_as_single_units() {
        assert_eq!(units_of(b"abc"), vec![0x61, 0x62, 0x63]);
    }

    #[test]
    fn supplementary_chars_become_pairs() {
        // U+1F600 is the surrogate pair D83D DE00
        assert_eq!(units_of("\u{1F600}".as_bytes()), vec![0xD83D, 0xDE00]);
    }

    #[test]
    fn leading_bom_is_skipped() {
        assert_eq!(units_of("\u{FEFF}hi".as_bytes()), vec![0x68, 0x69]);
        // a BOM later in the stream is data
        assert_eq!(units_of("h\u{FEFF}i".as_bytes()), vec![0x68, 0xFEFF, 0x69]);
    }

    #[test]
    fn read_block_chunks() {
        let mut reader = CodeUnitReader::new("abcde".as_bytes());
        assert_eq!(reader.read_block(3).unwrap(), Some(vec![0x61, 0x62, 0x63]));
        assert_eq!(reader.read_block(3).unwrap(), Some(vec![0x64, 0x65]));
        assert_eq!(reader.read_block(3).unwrap(), None);
    }

    #[test]
    fn writer_round_trips_text() {
        let text = "héllo \u{1F600} wörld";
        let source: Vec<u16> = text.encode_utf16().collect();
        let bytes = bytes_of(&source);
        assert_eq!(String::from_utf8(bytes.clone()).unwrap(), text);
        assert_eq!(units_of(&bytes), source);
    }

    #[test]
    fn lone_surrogates_round_trip() {
        // the shapes the block stage produces: separated and reordered halves
        for units in [
            vec![0xD800_u16],
            vec![0xDC00, 0xD83D],
            vec![0xDE00, 0x61, 0xD83D],
            vec![0xD83D, 0xD83D, 0xDE00],
            vec![0xFFFF, 0xDBFF, 0xDFFF, 0x0000],
        ] {
            assert_eq!(units_of(&bytes_of(&units)), units, "failed on {units:?}");
        }
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut reader = CodeUnitReader::new([0xFF_u8, 0x61].as_slice());
        assert!(reader.read_unit().is_err());
        let mut reader = CodeUnitReader::new([0xC3_u8].as_slice());
        assert!(reader.read_unit().is_err());
    }
}
