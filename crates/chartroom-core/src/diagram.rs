//! The diagram aggregate and its summary form.
//!
//! A [`Diagram`] is a database schema diagram: tables with fields and
//! indexes, connected by relationships. Its JSON form uses camelCase keys
//! and is shared by storage and the import parser.
//!
//! # Overview
//!
//! - [`Diagram`] - The full diagram as stored and edited.
//! - [`DiagramSummary`] - Lightweight listing entry returned by stores.
//! - [`DatabaseType`] - Target database dialect.

use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::identifier::DiagramId;

/// Target database dialect of a diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseType {
    #[default]
    Generic,
    Postgresql,
    Mysql,
    SqlServer,
    Mariadb,
    Sqlite,
    Clickhouse,
    Cockroachdb,
    Oracle,
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseType::Generic => "generic",
            DatabaseType::Postgresql => "postgresql",
            DatabaseType::Mysql => "mysql",
            DatabaseType::SqlServer => "sql_server",
            DatabaseType::Mariadb => "mariadb",
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::Clickhouse => "clickhouse",
            DatabaseType::Cockroachdb => "cockroachdb",
            DatabaseType::Oracle => "oracle",
        };
        f.write_str(name)
    }
}

/// Relationship cardinality on one side of a relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[default]
    One,
    Many,
}

/// Column data type, e.g. `varchar` or `bigint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub id: String,
    pub name: String,
}

/// A column of a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

fn default_nullable() -> bool {
    true
}

/// An index over fields of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    pub field_ids: Vec<String>,
}

/// A table placed on the diagram canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_view: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Table {
    /// Looks up a field of this table by id.
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == field_id)
    }
}

/// A foreign-key style link between two table fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub name: String,
    pub source_table_id: String,
    pub source_field_id: String,
    pub target_table_id: String,
    pub target_field_id: String,
    #[serde(default)]
    pub source_cardinality: Cardinality,
    #[serde(default)]
    pub target_cardinality: Cardinality,
}

/// A database schema diagram.
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub id: DiagramId,
    pub name: String,
    #[serde(default)]
    pub database_type: DatabaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_edition: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Diagram {
    /// Creates an empty diagram stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chartroom_core::{diagram::{DatabaseType, Diagram}, identifier::DiagramId};
    ///
    /// let id = DiagramId::new("d1").unwrap();
    /// let diagram = Diagram::new(id, "Inventory", DatabaseType::Postgresql);
    /// assert!(diagram.tables.is_empty());
    /// assert_eq!(diagram.created_at, diagram.updated_at);
    /// ```
    pub fn new(id: DiagramId, name: impl Into<String>, database_type: DatabaseType) -> Self {
        let now = now_millis();
        Self {
            id,
            name: name.into(),
            database_type,
            database_edition: None,
            tables: Vec::new(),
            relationships: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Looks up a table by id.
    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.id == table_id)
    }

    /// Returns the listing entry for this diagram.
    pub fn summary(&self) -> DiagramSummary {
        DiagramSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            database_type: self.database_type,
            table_count: self.tables.len(),
            updated_at: self.updated_at,
        }
    }
}

/// Listing entry for a stored diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSummary {
    pub id: DiagramId,
    pub name: String,
    pub database_type: DatabaseType,
    pub table_count: usize,
    pub updated_at: u64,
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Clocks set before the epoch read as `0`.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
