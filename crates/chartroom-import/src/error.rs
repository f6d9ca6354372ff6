//! Diagnostics for the JSON diagram importer.
//!
//! Every problem found in an imported document is reported as a
//! [`Diagnostic`] with an optional [`ErrorCode`], labeled source spans and
//! help text. Failed imports return all diagnostics wrapped in
//! [`ImportError`].

mod collector;
mod diagnostic;
mod error_code;
mod import_error;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use import_error::ImportError;
pub use label::Label;
pub use severity::Severity;
