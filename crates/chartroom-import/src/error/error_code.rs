//! Error codes for import diagnostics.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Decoding errors (JSON syntax and document shape)
//! - `E2xx` - Validation errors (references and uniqueness)

use std::fmt;

/// Error codes for categorizing import diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Decoding Errors (E1xx)
    // =========================================================================
    /// Malformed JSON.
    E100,

    /// Incomplete input.
    ///
    /// The document ended before a complete JSON value was read.
    E101,

    /// Unexpected document shape.
    ///
    /// The JSON is well formed but a field is missing or has the wrong type.
    E102,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Empty diagram name.
    E200,

    /// Duplicate table id.
    E201,

    /// Duplicate field id within a table.
    E202,

    /// Relationship references an unknown table.
    E203,

    /// Relationship or index references an unknown field.
    E204,

    /// Invalid diagram id.
    ///
    /// Diagram ids must not contain `/` or whitespace.
    E205,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E201").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed JSON",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "unexpected document shape",
            ErrorCode::E200 => "empty diagram name",
            ErrorCode::E201 => "duplicate table id",
            ErrorCode::E202 => "duplicate field id",
            ErrorCode::E203 => "unknown table",
            ErrorCode::E204 => "unknown field",
            ErrorCode::E205 => "invalid diagram id",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
