//! Semantic validation of a decoded diagram.
//!
//! Checks that ids are unique where they must be and that relationships and
//! indexes only reference tables and fields of the same diagram.

use std::ops::Range;

use indexmap::{IndexMap, IndexSet};

use chartroom_core::diagram::{Diagram, Table};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    locate::SourceLocator,
};

pub(crate) fn validate(
    diagram: &Diagram,
    locator: &SourceLocator<'_>,
    collector: &mut DiagnosticCollector,
) {
    if diagram.name.trim().is_empty() {
        collector.emit(
            Diagnostic::error("diagram name is empty")
                .with_code(ErrorCode::E200)
                .with_label_opt(locator.string_literal(&diagram.name, 0), "empty name")
                .with_help("give the diagram a name"),
        );
    }

    let table_spans = locator.object_items(&locator.whole(), "tables");
    let table_span = |index: usize| {
        // Only trust the scan when it saw every table.
        (table_spans.len() == diagram.tables.len()).then(|| table_spans[index].clone())
    };

    let tables = index_tables(diagram, locator, &table_span, collector);

    for (index, table) in diagram.tables.iter().enumerate() {
        validate_table(table, locator, table_span(index), collector);
    }

    for relationship in &diagram.relationships {
        let endpoints = [
            (
                &relationship.source_table_id,
                &relationship.source_field_id,
                "source",
            ),
            (
                &relationship.target_table_id,
                &relationship.target_field_id,
                "target",
            ),
        ];

        for (table_id, field_id, side) in endpoints {
            let Some(table) = tables.get(table_id.as_str()) else {
                collector.emit(
                    Diagnostic::error(format!(
                        "relationship `{}` references unknown {side} table `{table_id}`",
                        relationship.name
                    ))
                    .with_code(ErrorCode::E203)
                    .with_label_opt(locator.string_literal(table_id, 0), "not a table of this diagram")
                    .with_help("relationships may only reference tables of the same diagram"),
                );
                continue;
            };

            if table.field(field_id).is_none() {
                collector.emit(
                    Diagnostic::error(format!(
                        "relationship `{}` references unknown field `{field_id}` of table `{}`",
                        relationship.name, table.name
                    ))
                    .with_code(ErrorCode::E204)
                    .with_label_opt(locator.string_literal(field_id, 0), "unknown field"),
                );
            }
        }
    }
}

/// Map table ids to tables, reporting duplicates. The first definition wins.
fn index_tables<'d>(
    diagram: &'d Diagram,
    locator: &SourceLocator<'_>,
    table_span: &dyn Fn(usize) -> Option<Range<usize>>,
    collector: &mut DiagnosticCollector,
) -> IndexMap<&'d str, &'d Table> {
    let mut tables: IndexMap<&str, &Table> = IndexMap::with_capacity(diagram.tables.len());
    let mut first_index: IndexMap<&str, usize> = IndexMap::new();

    for (index, table) in diagram.tables.iter().enumerate() {
        if let Some(&first) = first_index.get(table.id.as_str()) {
            let mut diag = Diagnostic::error(format!(
                "table id `{}` is defined multiple times",
                table.id
            ))
            .with_code(ErrorCode::E201)
            .with_help("give every table a unique id");
            let locate = |at: usize, nth: usize| match table_span(at) {
                Some(span) => locator.string_literal_in(&span, &table.id, 0),
                None => locator.string_literal(&table.id, nth),
            };
            if let (Some(first), Some(again)) = (locate(first, 0), locate(index, 1)) {
                diag = diag
                    .with_label(again, "duplicate table id")
                    .with_secondary_label(first, "first defined here");
            }
            collector.emit(diag);
            continue;
        }
        first_index.insert(table.id.as_str(), index);
        tables.insert(table.id.as_str(), table);
    }

    tables
}

fn validate_table(
    table: &Table,
    locator: &SourceLocator<'_>,
    span: Option<Range<usize>>,
    collector: &mut DiagnosticCollector,
) {
    if table.fields.is_empty() {
        collector.emit(Diagnostic::warning(format!(
            "table `{}` has no fields",
            table.name
        )));
    }

    let field_spans = span
        .map(|span| locator.object_items(&span, "fields"))
        .filter(|spans| spans.len() == table.fields.len());

    let mut field_ids = IndexSet::with_capacity(table.fields.len());
    for (index, field) in table.fields.iter().enumerate() {
        if !field_ids.insert(field.id.as_str()) {
            let label = match &field_spans {
                Some(spans) => locator.string_literal_in(&spans[index], &field.id, 0),
                None => locator.string_literal(&field.id, 1),
            };
            collector.emit(
                Diagnostic::error(format!(
                    "field id `{}` is used twice in table `{}`",
                    field.id, table.name
                ))
                .with_code(ErrorCode::E202)
                .with_label_opt(label, "duplicate field id"),
            );
        }
    }

    for index in &table.indexes {
        for field_id in &index.field_ids {
            if !field_ids.contains(field_id.as_str()) {
                collector.emit(
                    Diagnostic::error(format!(
                        "index `{}` of table `{}` references unknown field `{field_id}`",
                        index.name, table.name
                    ))
                    .with_code(ErrorCode::E204)
                    .with_label_opt(locator.string_literal(field_id, 0), "unknown field"),
                );
            }
        }
    }
}
