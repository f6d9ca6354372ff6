//! Integration tests for the JSON diagram importer.

use proptest::prelude::*;

use chartroom_core::diagram::DatabaseType;
use chartroom_import::{
    diagram_from_json_input,
    error::{ErrorCode, Severity},
    import_diagram,
};

const BOOKSTORE: &str = r#"{
    "id": "seed1",
    "name": "Bookstore",
    "databaseType": "postgresql",
    "tables": [
        {
            "id": "t_books",
            "name": "books",
            "schema": "public",
            "x": 100,
            "y": 80,
            "fields": [
                { "id": "f_book_id", "name": "id", "type": { "id": "bigint", "name": "bigint" }, "primaryKey": true, "nullable": false },
                { "id": "f_author", "name": "author_id", "type": { "id": "bigint", "name": "bigint" } }
            ],
            "indexes": [
                { "id": "i_author", "name": "books_author_idx", "fieldIds": ["f_author"] }
            ]
        },
        {
            "id": "t_authors",
            "name": "authors",
            "fields": [
                { "id": "f_author_id", "name": "id", "type": { "id": "bigint", "name": "bigint" }, "primaryKey": true }
            ]
        }
    ],
    "relationships": [
        {
            "id": "r1",
            "name": "books_author_fk",
            "sourceTableId": "t_books",
            "sourceFieldId": "f_author",
            "targetTableId": "t_authors",
            "targetFieldId": "f_author_id",
            "sourceCardinality": "many",
            "targetCardinality": "one"
        }
    ],
    "createdAt": 1700000000000,
    "updatedAt": 1700000005000
}"#;

fn codes(source: &str) -> Vec<ErrorCode> {
    import_diagram(source)
        .unwrap_err()
        .diagnostics()
        .iter()
        .filter_map(|d| d.code())
        .collect()
}

#[test]
fn test_import_bookstore() {
    let diagram = diagram_from_json_input(BOOKSTORE).expect("valid document");

    assert_eq!(diagram.id, "seed1");
    assert_eq!(diagram.name, "Bookstore");
    assert_eq!(diagram.database_type, DatabaseType::Postgresql);
    assert_eq!(diagram.tables.len(), 2);
    assert_eq!(diagram.relationships.len(), 1);
    assert_eq!(diagram.created_at, 1_700_000_000_000);
    assert_eq!(diagram.updated_at, 1_700_000_005_000);
}

#[test]
fn test_missing_id_is_generated() {
    let diagram = diagram_from_json_input(r#"{ "name": "Scratch" }"#).expect("valid document");
    assert!(!diagram.id.as_str().is_empty());
    assert_eq!(diagram.created_at, diagram.updated_at);
}

#[test]
fn test_textual_timestamps_fall_back_to_now() {
    let diagram = diagram_from_json_input(
        r#"{ "id": "d", "name": "Dated", "createdAt": "2024-05-01T10:00:00.000Z" }"#,
    )
    .expect("valid document");
    assert!(diagram.created_at > 1_700_000_000_000);
}

#[test]
fn test_table_without_fields_warns() {
    let imported = import_diagram(
        r#"{ "id": "d", "name": "Sparse", "tables": [ { "id": "t", "name": "empty" } ] }"#,
    )
    .expect("warnings do not fail the import");

    assert_eq!(imported.warnings.len(), 1);
    assert_eq!(imported.warnings[0].severity(), Severity::Warning);
}

#[test]
fn test_malformed_json() {
    assert_eq!(codes("{ not json"), vec![ErrorCode::E100]);
    assert_eq!(codes(r#"{ "name": "cut"#), vec![ErrorCode::E101]);
    assert_eq!(codes(r#"{ "tables": [] }"#), vec![ErrorCode::E102]);
}

#[test]
fn test_empty_name_and_invalid_id() {
    let found = codes(r#"{ "id": "a/b", "name": "  " }"#);
    assert!(found.contains(&ErrorCode::E205));
    assert!(found.contains(&ErrorCode::E200));
}

#[test]
fn test_reports_all_reference_problems() {
    let source = BOOKSTORE
        .replace(r#""targetTableId": "t_authors""#, r#""targetTableId": "t_missing""#)
        .replace(r#""sourceFieldId": "f_author""#, r#""sourceFieldId": "f_nope""#);

    let found = codes(&source);
    assert_eq!(found, vec![ErrorCode::E204, ErrorCode::E203]);
}

#[test]
fn test_duplicate_table_has_both_labels() {
    let source = r#"{
        "name": "Dupes",
        "tables": [
            { "id": "t1", "name": "a", "fields": [ { "id": "f", "name": "id", "type": { "id": "int", "name": "int" } } ] },
            { "id": "t1", "name": "b", "fields": [ { "id": "f", "name": "id", "type": { "id": "int", "name": "int" } } ] }
        ]
    }"#;

    let err = import_diagram(source).unwrap_err();
    let dup = err
        .diagnostics()
        .iter()
        .find(|d| d.code() == Some(ErrorCode::E201))
        .expect("duplicate table reported");

    assert_eq!(dup.labels().len(), 2);
    let primary = dup.labels().iter().find(|l| l.is_primary()).unwrap();
    let secondary = dup.labels().iter().find(|l| !l.is_primary()).unwrap();
    assert!(primary.span().start() > secondary.span().start());
}

#[test]
fn test_duplicate_field_label_points_into_its_table() {
    let source = r#"{
        "name": "Shared field ids",
        "tables": [
            { "id": "t0", "name": "x", "fields": [ { "id": "f1", "name": "y", "type": { "id": "int", "name": "int" } } ] },
            { "id": "t1", "name": "w", "fields": [
                { "id": "f1", "name": "y", "type": { "id": "int", "name": "int" } },
                { "id": "f1", "name": "z", "type": { "id": "int", "name": "int" } }
            ] }
        ]
    }"#;

    let err = import_diagram(source).unwrap_err();
    let dup = err
        .diagnostics()
        .iter()
        .find(|d| d.code() == Some(ErrorCode::E202))
        .expect("duplicate field reported");

    let span = dup.labels()[0].span();
    assert_eq!(&source[span.start()..span.end()], r#""f1""#);
    let duplicate = source.find(r#""name": "z""#).unwrap();
    let previous = source[..duplicate].rfind(r#""f1""#).unwrap();
    assert_eq!(span.start(), previous);
}

#[test]
fn test_index_unknown_field() {
    let source = BOOKSTORE.replace(r#""fieldIds": ["f_author"]"#, r#""fieldIds": ["f_ghost"]"#);
    assert_eq!(codes(&source), vec![ErrorCode::E204]);
}

proptest! {
    #[test]
    fn prop_unique_tables_import(names in prop::collection::btree_set("[a-z]{1,8}", 1..6)) {
        let tables: Vec<String> = names
            .iter()
            .map(|name| format!(
                r#"{{ "id": "t_{name}", "name": "{name}", "fields": [ {{ "id": "f", "name": "id", "type": {{ "id": "int", "name": "int" }} }} ] }}"#
            ))
            .collect();
        let source = format!(r#"{{ "id": "p", "name": "Prop", "tables": [{}] }}"#, tables.join(","));

        let imported = import_diagram(&source).expect("unique tables import");
        prop_assert_eq!(imported.diagram.tables.len(), names.len());
        prop_assert!(imported.warnings.is_empty());
    }
}
