//! Decoding of the JSON document into a raw, not yet validated diagram.

use log::debug;
use serde::Deserialize;
use serde_json::error::Category;

use chartroom_core::diagram::{DatabaseType, Relationship, Table};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// Diagram document as written, before ids and timestamps are settled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDiagram {
    #[serde(default)]
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) database_type: DatabaseType,
    #[serde(default)]
    pub(crate) database_edition: Option<String>,
    #[serde(default)]
    pub(crate) tables: Vec<Table>,
    #[serde(default)]
    pub(crate) relationships: Vec<Relationship>,
    #[serde(default)]
    pub(crate) created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub(crate) updated_at: Option<RawTimestamp>,
}

/// Exports from browser tooling write dates as ISO strings; only epoch
/// milliseconds are kept.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTimestamp {
    Millis(u64),
    Text(String),
}

impl RawTimestamp {
    pub(crate) fn millis(&self) -> Option<u64> {
        match self {
            RawTimestamp::Millis(millis) => Some(*millis),
            RawTimestamp::Text(text) => {
                debug!(timestamp = text.as_str(); "Ignoring textual timestamp");
                None
            }
        }
    }
}

pub(crate) fn decode(source: &str) -> Result<RawDiagram, Diagnostic> {
    serde_json::from_str(source).map_err(|err| to_diagnostic(source, &err))
}

fn to_diagnostic(source: &str, err: &serde_json::Error) -> Diagnostic {
    let span = Span::from_line_column(source, err.line(), err.column());
    let message = strip_position(&err.to_string());

    let (code, label, help) = match err.classify() {
        Category::Eof => (
            ErrorCode::E101,
            "document ends here",
            "check for unclosed braces, brackets or strings",
        ),
        Category::Data => (
            ErrorCode::E102,
            "unexpected value",
            "a diagram needs a `name`; tables need `id`, `name` and typed `fields`",
        ),
        Category::Syntax | Category::Io => (
            ErrorCode::E100,
            "invalid JSON",
            "the bootstrap and import formats are plain JSON documents",
        ),
    };

    Diagnostic::error(message)
        .with_code(code)
        .with_label(span, label)
        .with_help(help)
}

/// `serde_json` appends " at line L column C"; the span carries that.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
