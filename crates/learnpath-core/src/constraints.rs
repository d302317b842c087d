use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Primary key definition preserving column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PrimaryKey {
    pub name: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UniqueConstraint {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub is_deferrable: bool,
    pub initially_deferred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConstraint {
    pub name: Option<String>,
    pub expression: String,
}

/// Referential action taken on update or delete of the parent row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FkAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FkMatchType {
    Full,
    Partial,
    Simple,
    Unknown,
}

/// Foreign key definition preserving column ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForeignKey {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub referenced_schema: String,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub on_update: FkAction,
    pub on_delete: FkAction,
    pub match_type: FkMatchType,
    pub is_deferrable: bool,
    pub initially_deferred: bool,
    /// The local columns are themselves unique, so each parent has at most one child.
    #[serde(default)]
    pub is_one_to_one: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Index {
    pub name: String,
    pub is_unique: bool,
    pub is_primary: bool,
    pub is_valid: bool,
    pub method: String,
    pub definition: String,
}

/// Table-level constraint definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    PrimaryKey(PrimaryKey),
    ForeignKey(ForeignKey),
    Unique(UniqueConstraint),
    Check(CheckConstraint),
}

impl Constraint {
    /// Columns covered by the constraint, empty for checks.
    pub fn columns(&self) -> &[String] {
        match self {
            Constraint::PrimaryKey(pk) => &pk.columns,
            Constraint::ForeignKey(fk) => &fk.columns,
            Constraint::Unique(unique) => &unique.columns,
            Constraint::Check(_) => &[],
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Constraint::PrimaryKey(pk) => pk.name.as_deref(),
            Constraint::ForeignKey(fk) => fk.name.as_deref(),
            Constraint::Unique(unique) => unique.name.as_deref(),
            Constraint::Check(check) => check.name.as_deref(),
        }
    }
}
