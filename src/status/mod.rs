//! Status translation for audio and MIDI platform calls.
//!
//! Every platform operation returns an [OSStatus]. Zero means success.
//! Anything else is turned into a [DiagnosticReport]: the status rendered as a
//! four-character code when all four bytes are printable (decimal otherwise),
//! plus the symbolic name when the code is in the known catalog.
//!
//! [check_status] is the building block and never terminates. The
//! fatal-by-default policy lives in [report_if_error] and [exit_on_error],
//! which print the report to stderr and exit with status 1.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

pub mod catalog;
pub mod four_cc;
mod parse;
pub mod report;

pub use catalog::{ErrorFamily, KnownStatus};
pub use four_cc::{fourcc, fourcc_status, FourCC};
pub use parse::parse_status;
pub use report::DiagnosticReport;

use crate::error::StatusError;

/// Status code. At least in Audio Toolbox's use, this is often a FourCC.
/// 0 means success.
pub type OSStatus = i32;

/// How a failing status is shown in the diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderedStatus {
    /// Rendered as `'abcd'`
    FourCharCode(FourCC),
    /// Rendered as signed base-10
    Decimal(OSStatus),
}

impl fmt::Display for RenderedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedStatus::FourCharCode(code) => write!(f, "{}", code),
            RenderedStatus::Decimal(status) => write!(f, "{}", status),
        }
    }
}

/// Classification of a failing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Known(KnownStatus),
    FourCharCode(FourCC),
    Unknown,
}

impl ErrorCategory {
    /// The catalog line, only for [ErrorCategory::Known].
    pub fn symbolic_name(&self) -> Option<&'static str> {
        match self {
            ErrorCategory::Known(known) => Some(known.symbolic_name()),
            _ => None,
        }
    }

    pub fn family(&self) -> Option<ErrorFamily> {
        match self {
            ErrorCategory::Known(known) => Some(known.family()),
            _ => None,
        }
    }

    /// Short label for logs and CLI output.
    pub fn label(&self) -> String {
        match self {
            ErrorCategory::Known(known) => known.symbolic_name().to_string(),
            ErrorCategory::FourCharCode(code) => format!("four-char code {}", code),
            ErrorCategory::Unknown => "unknown".to_string(),
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn render_status(status: OSStatus) -> RenderedStatus {
    match FourCC::from_status(status) {
        Some(code) => RenderedStatus::FourCharCode(code),
        None => RenderedStatus::Decimal(status),
    }
}

/// Classify a status: catalog first, then four-char code, then unknown.
/// Returns `None` for success.
pub fn classify(status: OSStatus) -> Option<ErrorCategory> {
    if status == catalog::noErr {
        return None;
    }
    if let Some(known) = KnownStatus::lookup(status) {
        return Some(ErrorCategory::Known(known));
    }
    Some(match FourCC::from_status(status) {
        Some(code) => ErrorCategory::FourCharCode(code),
        None => ErrorCategory::Unknown,
    })
}

/// Turn a platform status into a `Result`. Success is silent.
pub fn check_status(status: OSStatus, operation: &str) -> Result<(), StatusError> {
    if status == catalog::noErr {
        Ok(())
    } else {
        Err(StatusError::new(status, operation))
    }
}

/// Like [check_status], but also writes the diagnostic lines to `out` on
/// failure.
pub fn report_to<W: Write>(
    status: OSStatus,
    operation: &str,
    out: &mut W,
) -> Result<(), StatusError> {
    check_status(status, operation).map_err(|err| {
        // Nothing sensible left to do if the error channel itself fails.
        let _ = err.report().emit(out);
        err
    })
}

/// Generic error handler: if `status` is nonzero, prints the diagnostic to
/// stderr and exits the process with status 1.
pub fn report_if_error(status: OSStatus, operation: &str) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    if report_to(status, operation, &mut out).is_err() {
        let _ = out.flush();
        std::process::exit(1);
    }
}

/// Prints the report carried by an error and exits with status 1.
pub fn exit_with_report(err: &StatusError) -> ! {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = err.report().emit(&mut out);
    let _ = out.flush();
    std::process::exit(1)
}

/// Unwraps a platform result, treating any failure as fatal.
pub fn exit_on_error<T>(result: Result<T, StatusError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => exit_with_report(&err),
    }
}

/// Serializable description of a status, used by the CLI's `explain` and
/// `catalog` commands.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub status: OSStatus,
    pub rendered: String,
    pub category: String,
    pub family: Option<ErrorFamily>,
    pub symbolic_names: Vec<&'static str>,
}

impl StatusSummary {
    pub fn new(status: OSStatus) -> Self {
        let category = classify(status);
        Self {
            status,
            rendered: render_status(status).to_string(),
            category: category
                .map(|c| c.label())
                .unwrap_or_else(|| "success".to_string()),
            family: category.and_then(|c| c.family()),
            symbolic_names: match category {
                Some(ErrorCategory::Known(known)) => known.symbolic_names().to_vec(),
                _ => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::catalog::*;
    use super::*;

    #[test]
    fn test_success_is_silent() {
        let mut out = Vec::new();
        assert!(report_to(noErr, "MusicPlayerStart", &mut out).is_ok());
        assert!(out.is_empty());
        assert!(check_status(0, "anything").is_ok());
        assert_eq!(classify(0), None);
    }

    #[test]
    fn test_renders_four_char_code() {
        let status = fourcc_status(b"noEr");
        assert_eq!(render_status(status).to_string(), "'noEr'");
        assert_eq!(
            classify(status),
            Some(ErrorCategory::FourCharCode(FourCC::new(*b"noEr").unwrap()))
        );
    }

    #[test]
    fn test_renders_decimal_with_sign() {
        assert_eq!(render_status(-10830).to_string(), "-10830");
        assert_eq!(render_status(123_456_789).to_string(), "123456789");
        assert_eq!(render_status(-1).to_string(), "-1");
    }

    #[test]
    fn test_known_code_reports_symbolic_line() {
        let mut out = Vec::new();
        let err = report_to(-10830, "MIDIClientCreate", &mut out).unwrap_err();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: MIDIClientCreate (-10830)\nkMIDIInvalidClient\n"
        );
        assert_eq!(
            err.category(),
            ErrorCategory::Known(KnownStatus::MidiInvalidClient)
        );
    }

    #[test]
    fn test_unknown_code_has_no_symbolic_line() {
        let mut out = Vec::new();
        let err = report_to(123_456_789, "Couldn't start player", &mut out).unwrap_err();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Couldn't start player (123456789)\n"
        );
        assert_eq!(err.category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_four_char_code_has_no_symbolic_line() {
        let mut out = Vec::new();
        report_to(fourcc_status(b"fmt?"), "AudioQueueNewOutput", &mut out).unwrap_err();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: AudioQueueNewOutput ('fmt?')\n"
        );
    }

    #[test]
    fn test_classification_is_pure() {
        for status in [-10863, -43, fourcc_status(b"wht?"), 42] {
            assert_eq!(classify(status), classify(status));
            assert_eq!(
                render_status(status).to_string(),
                render_status(status).to_string()
            );
        }
    }

    #[test]
    fn test_summary_for_shared_code() {
        let summary = StatusSummary::new(kAudioUnitErr_CannotDoInCurrentContext);
        assert_eq!(summary.rendered, "-10863");
        assert_eq!(summary.family, Some(ErrorFamily::AudioGraph));
        assert_eq!(summary.symbolic_names.len(), 3);
    }

    #[test]
    fn test_summary_for_success() {
        let summary = StatusSummary::new(noErr);
        assert_eq!(summary.category, "success");
        assert!(summary.symbolic_names.is_empty());
        assert_eq!(summary.family, None);
    }
}
