// Platform status error

use log::error;
use std::fmt;

use crate::error::ErrorCode;
use crate::status::{DiagnosticReport, ErrorCategory, OSStatus};

/// Log a status error with structured context
///
/// This function logs platform failures with structured fields including:
/// - code: the raw status
/// - category: catalog name, four-char code or "unknown"
/// - message: the diagnostic headline
/// - context: where the call was made from
pub fn log_status_error(err: &StatusError, context: &str) {
    error!(
        "Status error in {}: code={}, category={}, message={}",
        context,
        err.code(),
        err.category(),
        err.message()
    );
}

/// A platform call returned a nonzero status.
///
/// The error code is the status itself, so it never collides with a real
/// success value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    report: DiagnosticReport,
}

impl StatusError {
    pub fn new(status: OSStatus, operation: impl Into<String>) -> Self {
        Self {
            report: DiagnosticReport::new(status, operation),
        }
    }

    pub fn report(&self) -> &DiagnosticReport {
        &self.report
    }

    pub fn status(&self) -> OSStatus {
        self.report.status()
    }

    pub fn operation(&self) -> &str {
        self.report.operation()
    }

    pub fn category(&self) -> ErrorCategory {
        self.report.category()
    }
}

impl ErrorCode for StatusError {
    fn code(&self) -> i32 {
        self.report.status()
    }

    fn message(&self) -> String {
        self.report.headline()
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report)
    }
}

impl std::error::Error for StatusError {}
