//! The ImportError type wrapping import diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for importing a JSON diagram document.
///
/// Wraps one or more diagnostics; at least one of them is an error.
#[derive(Debug)]
pub struct ImportError {
    diagnostics: Vec<Diagnostic>,
}

impl ImportError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ImportError {}

impl From<Diagnostic> for ImportError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_import_error_display_single() {
        let err: ImportError = Diagnostic::error("malformed JSON")
            .with_code(ErrorCode::E100)
            .into();

        assert_eq!(err.to_string(), "error[E100]: malformed JSON");
    }

    #[test]
    fn test_import_error_display_multiple() {
        let err = ImportError::new(vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
            Diagnostic::error("third"),
        ]);

        assert_eq!(err.to_string(), "error: first (+2 more)");
    }
}
