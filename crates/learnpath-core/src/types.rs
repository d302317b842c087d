use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Formatted and raw Postgres type metadata for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnType {
    /// User-friendly formatted type (e.g. `timestamp with time zone`).
    pub data_type: String,
    /// Namespace of the underlying type.
    pub udt_schema: String,
    /// Name of the underlying type (e.g. `timestamptz`, `_text`).
    pub udt_name: String,
    pub character_max_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub collation: Option<String>,
}

impl ColumnType {
    /// Builds a type with only the catalog names filled in.
    pub fn named(udt_schema: impl Into<String>, udt_name: impl Into<String>) -> Self {
        let udt_name = udt_name.into();
        Self {
            data_type: udt_name.clone(),
            udt_schema: udt_schema.into(),
            udt_name,
            character_max_length: None,
            numeric_precision: None,
            numeric_scale: None,
            collation: None,
        }
    }

    /// Element type name when this is a Postgres array (`_int4` -> `int4`).
    pub fn array_element(&self) -> Option<&str> {
        self.udt_name.strip_prefix('_')
    }
}

/// Identity generation strategy for columns using `GENERATED ... AS IDENTITY`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentityGeneration {
    Always,
    ByDefault,
}

/// Kind of generated column supported by Postgres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedKind {
    Stored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedExpression {
    pub kind: GeneratedKind,
    pub expression: Option<String>,
}

/// A Postgres enum type and its labels in sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumType {
    pub schema: String,
    pub name: String,
    pub labels: Vec<String>,
}

/// A Postgres composite type (`create type ... as (...)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeType {
    pub schema: String,
    pub name: String,
    pub attributes: Vec<CompositeAttribute>,
}

/// One attribute of a composite type. Attributes are always nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeAttribute {
    pub name: String,
    pub attribute_type: ColumnType,
}
