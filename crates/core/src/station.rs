//! Station identity
//!
//! A raw processing directory is named `<instrument>-<letters>-<digits>`,
//! e.g. `452.020-P-08`. The canonical station code concatenates the letter
//! and digit parts and zero-pads between them to a fixed width: `P0008`.
//! Mirror and archive directories are keyed by the canonical code.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Fixed width of a canonical station code.
pub const STATION_CODE_LEN: usize = 5;

/// Errors turning a directory name into a station code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationNameError {
    /// The raw name is not of the `<instrument>-<letters>-<digits>` form.
    #[error("'{0}' is not a raw station name (<instrument>-<letters>-<digits>)")]
    MalformedRaw(String),

    /// Letter and digit parts cannot be padded into the fixed code width.
    #[error("station parts '{letters}'/'{digits}' do not fit a 5-character code")]
    TooLong {
        /// Letter part of the raw name
        letters: String,
        /// Digit part of the raw name
        digits: String,
    },

    /// A directory name presented as a canonical code is not one.
    #[error("'{0}' is not a canonical station code")]
    MalformedCode(String),
}

/// Canonical station code, e.g. `P0008`.
///
/// Ordered and hashable so station batches process in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a raw processing-directory name, e.g. `452.020-P-08` → `P0008`.
    pub fn from_raw_dir_name(raw: &str) -> Result<Self, StationNameError> {
        let malformed = || StationNameError::MalformedRaw(raw.to_string());

        let mut parts = raw.split('-');
        let (Some(_instrument), Some(letters), Some(digits), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        if letters.is_empty()
            || digits.is_empty()
            || !letters.chars().all(|c| c.is_ascii_alphabetic())
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }

        let used = letters.len() + digits.len();
        if used > STATION_CODE_LEN {
            return Err(StationNameError::TooLong {
                letters: letters.to_string(),
                digits: digits.to_string(),
            });
        }

        let mut code = String::with_capacity(STATION_CODE_LEN);
        code.push_str(letters);
        for _ in 0..STATION_CODE_LEN - used {
            code.push('0');
        }
        code.push_str(digits);
        Ok(StationCode(code))
    }

    /// Accept an already-canonical code, e.g. a mirror directory name.
    pub fn from_canonical(code: &str) -> Result<Self, StationNameError> {
        if code.len() == STATION_CODE_LEN && code.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(StationCode(code.to_string()))
        } else {
            Err(StationNameError::MalformedCode(code.to_string()))
        }
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
