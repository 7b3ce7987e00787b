// Error types for the MIDI file sequence crate
//
// This module defines the error carried by a failing platform status and the
// error for status codes typed on the command line, both with numeric codes.

mod parse;
mod status;

pub use parse::{StatusParseError, StatusParseErrorCodes};
pub use status::{log_status_error, StatusError};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
