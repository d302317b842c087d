//! Snapshot model for the learning-path database schema.
//!
//! A [`DatabaseSchema`] is what introspection produces and what code
//! generation and drift checks consume. The types here are plain data with
//! serde and JSON Schema support so snapshots can be stored as `schema.json`.

pub mod constraints;
pub mod error;
pub mod graph;
pub mod redaction;
pub mod schema;
pub mod types;
pub mod validation;

pub use constraints::{
    CheckConstraint, Constraint, FkAction, FkMatchType, ForeignKey, Index, PrimaryKey,
    UniqueConstraint,
};
pub use error::{Error, Result};
pub use graph::{FkGraphReport, FkGraphSummary, build_fk_graph_report};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use schema::{Column, DatabaseSchema, Schema, Table, TableKind};
pub use types::{
    ColumnType, CompositeAttribute, CompositeType, EnumType, GeneratedExpression, GeneratedKind,
    IdentityGeneration,
};
pub use validation::validate_schema;

/// Current contract version for `schema.json` snapshots.
pub const SCHEMA_VERSION: &str = "0.1";

/// Schema that unqualified lookups resolve against.
pub const DEFAULT_SCHEMA: &str = "public";
