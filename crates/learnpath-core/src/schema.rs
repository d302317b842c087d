use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constraints::{Constraint, ForeignKey, Index, PrimaryKey};
use crate::types::{ColumnType, CompositeType, EnumType, GeneratedExpression, IdentityGeneration};

/// Top-level schema snapshot for a database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseSchema {
    /// Contract version for this snapshot format.
    pub schema_version: String,
    /// Database engine identifier (e.g. `postgres`).
    pub engine: String,
    /// Database name when available.
    pub database: Option<String>,
    /// Schemas captured from the database.
    pub schemas: Vec<Schema>,
    /// Enum types captured across schemas.
    pub enums: Vec<EnumType>,
    /// Composite types captured across schemas.
    #[serde(default)]
    pub composite_types: Vec<CompositeType>,
    /// Optional fingerprint of the snapshot for cache/validation purposes.
    pub schema_fingerprint: Option<String>,
}

impl DatabaseSchema {
    pub fn find_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|schema| schema.name == name)
    }

    /// Enums declared in the given schema, in snapshot order.
    pub fn enums_in<'a>(&'a self, schema: &'a str) -> impl Iterator<Item = &'a EnumType> + 'a {
        self.enums.iter().filter(move |item| item.schema == schema)
    }

    /// Composite types declared in the given schema, in snapshot order.
    pub fn composite_types_in<'a>(
        &'a self,
        schema: &'a str,
    ) -> impl Iterator<Item = &'a CompositeType> + 'a {
        self.composite_types
            .iter()
            .filter(move |item| item.schema == schema)
    }

    pub fn find_enum(&self, schema: &str, name: &str) -> Option<&EnumType> {
        self.enums
            .iter()
            .find(|item| item.schema == schema && item.name == name)
    }

    pub fn find_composite(&self, schema: &str, name: &str) -> Option<&CompositeType> {
        self.composite_types
            .iter()
            .find(|item| item.schema == schema && item.name == name)
    }
}

/// A Postgres namespace containing tables and related objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    pub name: String,
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// A table-like object (table, view, materialized view, foreign table, partitioned table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.constraints.iter().find_map(|constraint| match constraint {
            Constraint::PrimaryKey(pk) => Some(pk),
            _ => None,
        })
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.constraints.iter().filter_map(|constraint| match constraint {
            Constraint::ForeignKey(fk) => Some(fk),
            _ => None,
        })
    }

    /// Whether rows can be written through this relation.
    ///
    /// Only writable relations get `Insert` and `Update` shapes.
    pub fn is_writable(&self) -> bool {
        matches!(
            self.kind,
            TableKind::Table | TableKind::PartitionedTable | TableKind::ForeignTable
        )
    }
}

/// Kind of table represented in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Table,
    PartitionedTable,
    View,
    MaterializedView,
    ForeignTable,
    Other(String),
}

/// Column metadata for a table-like object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub ordinal_position: i16,
    pub name: String,
    pub column_type: ColumnType,
    pub is_nullable: bool,
    pub default: Option<String>,
    pub identity: Option<IdentityGeneration>,
    pub generated: Option<GeneratedExpression>,
    pub comment: Option<String>,
}

impl Column {
    /// Whether the database fills this column when an insert omits it.
    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.identity.is_some() || self.generated.is_some()
    }

    /// Whether an insert payload may leave this column out.
    pub fn insert_optional(&self) -> bool {
        self.is_nullable || self.has_default()
    }

    /// Whether inserts and updates may carry a value for this column.
    ///
    /// Expression columns and `GENERATED ALWAYS AS IDENTITY` only accept `DEFAULT`.
    pub fn accepts_writes(&self) -> bool {
        self.generated.is_none() && self.identity != Some(IdentityGeneration::Always)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeneratedKind;

    fn column(name: &str) -> Column {
        Column {
            ordinal_position: 1,
            name: name.to_string(),
            column_type: ColumnType::named("pg_catalog", "int8"),
            is_nullable: false,
            default: None,
            identity: None,
            generated: None,
            comment: None,
        }
    }

    #[test]
    fn identity_by_default_stays_writable() {
        let mut id = column("id");
        id.identity = Some(IdentityGeneration::ByDefault);
        assert!(id.accepts_writes());
        assert!(id.insert_optional());

        id.identity = Some(IdentityGeneration::Always);
        assert!(!id.accepts_writes());
    }

    #[test]
    fn generated_columns_are_read_only() {
        let mut total = column("total_minutes");
        total.generated = Some(GeneratedExpression {
            kind: GeneratedKind::Stored,
            expression: Some("(daily_minutes * days)".to_string()),
        });
        assert!(!total.accepts_writes());
        assert!(column("topic").accepts_writes());
    }
}
