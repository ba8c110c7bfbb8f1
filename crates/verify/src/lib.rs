//! Timing-correction verification pipeline
//!
//! Walks every archived waveform file's records, extracts the header's
//! fixed-point time correction, and checks it against the two corrections
//! reported by the metadata exports, within a quantization-derived
//! tolerance. Read-only: never mutates archive state.
//!
//! - `record`: record walking over the binary waveform format
//! - `metadata`: export readers for the two correction sources
//! - `compare`: the tolerance rule
//! - `report`: per-station and run-level aggregation
//! - `verifier`: station-by-station orchestration

pub mod compare;
pub mod error;
pub mod metadata;
pub mod record;
pub mod report;
pub mod verifier;

pub use compare::{corrections_match, CORRECTION_TOLERANCE};
pub use error::{Result, VerifyError};
pub use record::{scan_flags, FileFlags, RecordError, RecordInfo, RecordIter};
pub use report::{RunReport, StationReport};
pub use verifier::Verifier;
