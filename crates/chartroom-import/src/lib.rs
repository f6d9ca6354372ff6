//! # Chartroom Import
//!
//! Import of diagrams from JSON documents, such as files exported from the
//! editor or the bootstrap schema shipped with an installation.
//!
//! ## Usage
//!
//! ```
//! # use chartroom_import::{diagram_from_json_input, ImportError};
//! fn main() -> Result<(), ImportError> {
//!     let source = r#"{ "id": "seed1", "name": "Bookstore", "databaseType": "postgresql" }"#;
//!
//!     let diagram = diagram_from_json_input(source)?;
//!     assert_eq!(diagram.id, "seed1");
//!     Ok(())
//! }
//! ```

mod decode;
pub mod error;
mod locate;
mod span;
mod validate;

pub use error::ImportError;
pub use span::Span;

use log::{debug, info, warn};

use chartroom_core::{
    diagram::{Diagram, now_millis},
    identifier::DiagramId,
};

use error::{Diagnostic, DiagnosticCollector, ErrorCode};
use locate::SourceLocator;

/// A successfully imported diagram together with non-fatal findings.
#[derive(Debug)]
pub struct Imported {
    pub diagram: Diagram,
    pub warnings: Vec<Diagnostic>,
}

/// Import a diagram from a JSON document, keeping warnings.
///
/// The pipeline:
///
/// 1. **Decode** - Read the JSON into the diagram shape
/// 2. **Settle** - Generate a missing id, stamp missing timestamps
/// 3. **Validate** - Check uniqueness and cross references
///
/// # Errors
///
/// Returns an [`ImportError`] carrying every error diagnostic found. Decoding
/// errors stop the pipeline; validation reports all problems at once.
pub fn import_diagram(source: &str) -> Result<Imported, ImportError> {
    let raw = decode::decode(source)?;
    let locator = SourceLocator::new(source);
    let mut collector = DiagnosticCollector::new();

    let id = match raw.id.as_deref() {
        None | Some("") => {
            let id = DiagramId::generate();
            debug!(diagram_id = id.as_str(); "Generated id for imported diagram");
            id
        }
        Some(value) => match DiagramId::new(value) {
            Ok(id) => id,
            Err(err) => {
                collector.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E205)
                        .with_label_opt(locator.string_literal(value, 0), "invalid id")
                        .with_help("remove the id to have one generated"),
                );
                DiagramId::generate()
            }
        },
    };

    let now = now_millis();
    let created_at = raw
        .created_at
        .as_ref()
        .and_then(|ts| ts.millis())
        .unwrap_or(now);
    let updated_at = raw
        .updated_at
        .as_ref()
        .and_then(|ts| ts.millis())
        .unwrap_or(created_at);

    let diagram = Diagram {
        id,
        name: raw.name,
        database_type: raw.database_type,
        database_edition: raw.database_edition,
        tables: raw.tables,
        relationships: raw.relationships,
        created_at,
        updated_at,
    };

    validate::validate(&diagram, &locator, &mut collector);
    let warnings = collector.finish()?;

    info!(
        diagram_id = diagram.id.as_str(),
        tables = diagram.tables.len(),
        relationships = diagram.relationships.len(),
        warnings = warnings.len();
        "Imported diagram"
    );

    Ok(Imported { diagram, warnings })
}

/// Parse a JSON document into a [`Diagram`].
///
/// Warnings are logged and dropped; see [`import_diagram`] to keep them.
///
/// # Errors
///
/// Returns an [`ImportError`] if the document is malformed or invalid.
pub fn diagram_from_json_input(source: &str) -> Result<Diagram, ImportError> {
    let imported = import_diagram(source)?;
    for warning in &imported.warnings {
        warn!(diagram_id = imported.diagram.id.as_str(); "{warning}");
    }
    Ok(imported.diagram)
}
