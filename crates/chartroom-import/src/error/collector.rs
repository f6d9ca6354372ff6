//! Collector for accumulating diagnostics during validation.

use crate::error::{Diagnostic, ImportError};

/// Accumulates diagnostics so validation can report every problem at once
/// instead of stopping at the first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic; errors mark the collector as failed.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(ImportError)` with all diagnostics.
    /// - Otherwise returns the collected warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ImportError> {
        if self.has_errors {
            Err(ImportError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
