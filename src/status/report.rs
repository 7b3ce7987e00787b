//! The diagnostic report emitted for a failing status.

use std::fmt;
use std::io::{self, Write};

use super::{classify, render_status, ErrorCategory, OSStatus, RenderedStatus};

/// Operation description plus everything derived from the status.
///
/// Only the description comes from the caller; the rest is a pure function of
/// the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    operation: String,
    status: OSStatus,
    rendered: RenderedStatus,
    category: ErrorCategory,
}

impl DiagnosticReport {
    pub fn new(status: OSStatus, operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status,
            rendered: render_status(status),
            // A report is only built for failures, but keep a zero honest.
            category: classify(status).unwrap_or(ErrorCategory::Unknown),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn status(&self) -> OSStatus {
        self.status
    }

    pub fn rendered(&self) -> RenderedStatus {
        self.rendered
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// `Error: <operation> (<rendered status>)`
    pub fn headline(&self) -> String {
        format!("Error: {} ({})", self.operation, self.rendered)
    }

    /// Catalog name line, present only for known codes.
    pub fn symbolic_line(&self) -> Option<&'static str> {
        self.category.symbolic_name()
    }

    /// Write the headline, then the symbolic line if there is one.
    pub fn emit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.headline())?;
        if let Some(name) = self.symbolic_line() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline())?;
        if let Some(name) = self.symbolic_line() {
            write!(f, " [{}]", name)?;
        }
        Ok(())
    }
}
