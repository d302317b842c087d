//! Typed mirror of the learning-path database.
//!
//! Each table under [`generated`] exposes three shapes:
//!
//! - `Row`: what a read returns,
//! - `Insert`: what an insert requires; defaulted and nullable columns are optional,
//! - `Update`: what a partial update permits; every column is optional.
//!
//! Nullable columns in `Insert` and `Update` are `Option<Option<T>>` (see
//! [`patch`]), so an explicit `null` survives the round trip.
//!
//! The [`projection`] aliases resolve those shapes from a relation marker,
//! e.g. `TablesInsert<LearningPaths>`. Nothing here talks to a database; the
//! shapes are serde payloads keyed by column name, meant to be handed to
//! whatever client issues the queries.
//!
//! The `generated` tree is written by `learnpath-schema generate` and checked
//! against the live database by `learnpath-schema check`.

pub mod generated;
pub mod meta;
pub mod patch;
pub mod projection;
pub mod relation;

pub use generated::public::{
    self, DailyLearningTasks, LearningPaths, Profiles, ProjectRecommendations, Public,
};
pub use generated::{POSTGREST_VERSION, SCHEMAS};
pub use meta::{
    ColumnDef, CompositeDef, EnumDef, RelationDef, RelationKind, RelationshipDef, SchemaDef,
};
pub use projection::{
    CompositeTypes, DefaultSchema, Enums, SchemaCompositeTypes, SchemaEnums, SchemaTables,
    SchemaTablesInsert, SchemaTablesUpdate, Tables, TablesInsert, TablesUpdate,
};
pub use relation::{CompositeType, PgEnum, Relation, Schema, Table};

/// Any JSON value, as stored in `json`/`jsonb` columns.
pub type Json = serde_json::Value;

/// Looks up a schema of the mirror by name.
pub fn schema(name: &str) -> Option<&'static SchemaDef> {
    SCHEMAS.iter().find(|schema| schema.name == name)
}
