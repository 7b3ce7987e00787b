// Status argument parse errors

use std::fmt;

use crate::error::ErrorCode;

/// Status parse error code constants
///
/// Error code range: 2001-2003
pub struct StatusParseErrorCodes {}

impl StatusParseErrorCodes {
    /// Nothing was given
    pub const EMPTY: i32 = 2001;

    /// Not a valid 32-bit decimal or hexadecimal number
    pub const MALFORMED_NUMBER: i32 = 2002;

    /// Quoted, but not exactly four printable characters
    pub const MALFORMED_FOUR_CHAR_CODE: i32 = 2003;
}

/// A status code typed by a person could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusParseError {
    Empty,
    MalformedNumber { input: String },
    MalformedFourCharCode { input: String },
}

impl ErrorCode for StatusParseError {
    fn code(&self) -> i32 {
        match self {
            StatusParseError::Empty => StatusParseErrorCodes::EMPTY,
            StatusParseError::MalformedNumber { .. } => StatusParseErrorCodes::MALFORMED_NUMBER,
            StatusParseError::MalformedFourCharCode { .. } => {
                StatusParseErrorCodes::MALFORMED_FOUR_CHAR_CODE
            }
        }
    }

    fn message(&self) -> String {
        match self {
            StatusParseError::Empty => "Status code is empty".to_string(),
            StatusParseError::MalformedNumber { input } => {
                format!("{:?} is not a 32-bit decimal or 0x-prefixed hex number", input)
            }
            StatusParseError::MalformedFourCharCode { input } => {
                format!(
                    "{:?} is not four printable characters in single quotes",
                    input
                )
            }
        }
    }
}

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for StatusParseError {}
