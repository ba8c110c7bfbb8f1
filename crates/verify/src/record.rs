//! Record walking over the binary waveform format
//!
//! A waveform file is a sequence of self-describing records (miniSEED v2,
//! big-endian). Only the header fields verification needs are decoded:
//! the activity flags, the fixed-point time correction, and the record
//! length announced by the data-format blockette.
//!
//! Layout of the 48-byte fixed header, as read here:
//! - byte 36: activity flags (bit 1 = time correction applied)
//! - byte 39: number of blockettes that follow
//! - bytes 40..44: time correction, i32, units of 1e-4 s
//! - bytes 46..48: offset of the first blockette
//!
//! The blockette chain starts at that offset; each blockette leads with its
//! type and the offset of the next. Blockette 1000 carries the record
//! length as a power-of-two exponent at byte 6 of the blockette.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

/// Seconds per header time-correction unit.
pub const TIME_CORRECTION_UNIT: f64 = 1.0e-4;

const FIXED_HEADER_LEN: usize = 48;
const ACTIVITY_FLAGS_OFFSET: usize = 36;
const NUM_BLOCKETTES_OFFSET: usize = 39;
const TIME_CORRECTION_OFFSET: usize = 40;
const FIRST_BLOCKETTE_OFFSET: usize = 46;

/// Activity-flag bit: the correction is folded into the record start time.
const TIME_CORRECTION_APPLIED: u8 = 0x02;

/// Blockette carrying encoding, word order and record length.
const DATA_FORMAT_BLOCKETTE: u16 = 1000;
const BLOCKETTE_HEADER_LEN: usize = 4;
const DATA_FORMAT_BLOCKETTE_LEN: usize = 8;
/// Record-length exponent within the data-format blockette.
const LENGTH_EXPONENT_OFFSET: usize = 6;

/// Record lengths are powers of two from 128 bytes to 1 MiB.
const MIN_LENGTH_EXPONENT: u8 = 7;
const MAX_LENGTH_EXPONENT: u8 = 20;

/// Why a record walk stopped early. Any of these marks the file corrupt;
/// that is a different condition from a correction mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Fewer bytes remain than a fixed header needs.
    #[error("record at offset {0} is truncated")]
    Truncated(usize),

    /// The blockette chain holds no data-format blockette.
    #[error("record at offset {0} has no data-format blockette")]
    MissingBlockette(usize),

    /// The announced record length is not an allowed power of two.
    #[error("record at offset {offset} has invalid length exponent {exponent}")]
    BadLength {
        /// Record offset within the file
        offset: usize,
        /// The rejected exponent
        exponent: u8,
    },

    /// The record extends past the end of the file.
    #[error("record at offset {offset} ({length} bytes) runs past end of file ({file_len} bytes)")]
    PastEof {
        /// Record offset within the file
        offset: usize,
        /// Announced record length
        length: usize,
        /// Actual file length
        file_len: usize,
    },

    /// A blockette offset points backwards or outside the record.
    #[error("record at offset {0} has a malformed blockette chain")]
    BadBlocketteChain(usize),
}

/// Header fields of one record, as needed for timing verification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordInfo {
    /// Byte offset of the record within the file.
    pub offset: usize,
    /// Time correction as encoded: a truncating integer of 1e-4 s units.
    pub correction_units: i32,
    /// Whether the activity flags mark the correction as applied.
    pub correction_applied: bool,
    /// Total record length in bytes.
    pub length: usize,
}

impl RecordInfo {
    /// The encoded correction in seconds.
    pub fn correction_seconds(&self) -> f64 {
        f64::from(self.correction_units) * TIME_CORRECTION_UNIT
    }
}

fn parse_record(data: &[u8], offset: usize) -> Result<RecordInfo, RecordError> {
    if data.len() - offset < FIXED_HEADER_LEN {
        return Err(RecordError::Truncated(offset));
    }
    let rec = &data[offset..];

    let activity = rec[ACTIVITY_FLAGS_OFFSET];
    let blockette_count = rec[NUM_BLOCKETTES_OFFSET];
    let correction_units =
        BigEndian::read_i32(&rec[TIME_CORRECTION_OFFSET..TIME_CORRECTION_OFFSET + 4]);
    let first_blockette =
        BigEndian::read_u16(&rec[FIRST_BLOCKETTE_OFFSET..FIRST_BLOCKETTE_OFFSET + 2]) as usize;

    let mut pos = first_blockette;
    let mut remaining = blockette_count;
    let length = loop {
        if remaining == 0 || pos == 0 {
            return Err(RecordError::MissingBlockette(offset));
        }
        if pos < FIXED_HEADER_LEN || rec.len() < pos + BLOCKETTE_HEADER_LEN {
            return Err(RecordError::BadBlocketteChain(offset));
        }
        let blockette_type = BigEndian::read_u16(&rec[pos..pos + 2]);
        let next = BigEndian::read_u16(&rec[pos + 2..pos + 4]) as usize;

        if blockette_type == DATA_FORMAT_BLOCKETTE {
            if rec.len() < pos + DATA_FORMAT_BLOCKETTE_LEN {
                return Err(RecordError::BadBlocketteChain(offset));
            }
            let exponent = rec[pos + LENGTH_EXPONENT_OFFSET];
            if !(MIN_LENGTH_EXPONENT..=MAX_LENGTH_EXPONENT).contains(&exponent) {
                return Err(RecordError::BadLength { offset, exponent });
            }
            break 1usize << exponent;
        }

        // The chain must advance, or a cyclic file would spin forever.
        if next != 0 && next <= pos {
            return Err(RecordError::BadBlocketteChain(offset));
        }
        pos = next;
        remaining -= 1;
    };

    if offset + length > data.len() {
        return Err(RecordError::PastEof {
            offset,
            length,
            file_len: data.len(),
        });
    }

    Ok(RecordInfo {
        offset,
        correction_units,
        correction_applied: activity & TIME_CORRECTION_APPLIED != 0,
        length,
    })
}

/// Lazy walk over the records of one file.
///
/// Yields record-header descriptors in file order: finite, non-restartable,
/// and fused after the first error. A well-formed file yields exactly its
/// record count and terminates exactly at end-of-file; a trailing partial
/// record surfaces as an error item.
pub struct RecordIter<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> RecordIter<'a> {
    /// Walk the given file contents from offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        RecordIter {
            data,
            offset: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<RecordInfo, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.data.len() {
            return None;
        }
        match parse_record(self.data, self.offset) {
            Ok(info) => {
                self.offset += info.length;
                Some(Ok(info))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Per-file summary: total records and records with an applied correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFlags {
    /// Records in the file.
    pub record_count: usize,
    /// Records whose activity flags mark the correction applied.
    pub corrected_count: usize,
}

impl FileFlags {
    /// Whether every record carries an applied correction.
    pub fn all_corrected(&self) -> bool {
        self.record_count == self.corrected_count
    }
}

/// Counting pass over every record of the file.
pub fn scan_flags(data: &[u8]) -> Result<FileFlags, RecordError> {
    let mut flags = FileFlags {
        record_count: 0,
        corrected_count: 0,
    };
    for record in RecordIter::new(data) {
        let record = record?;
        flags.record_count += 1;
        if record.correction_applied {
            flags.corrected_count += 1;
        }
    }
    Ok(flags)
}
