use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::meta::{CompositeDef, EnumDef, RelationDef, SchemaDef};

/// Marker for a database schema (`public`, ...).
pub trait Schema: 'static {
    const DEF: SchemaDef;

    fn name() -> &'static str {
        Self::DEF.name
    }
}

/// Any relation that can be read: a table or a view.
pub trait Relation: 'static {
    type Schema: Schema;
    /// Shape returned when reading a record.
    type Row: Debug + Clone + Serialize + DeserializeOwned;

    const DEF: RelationDef;

    fn name() -> &'static str {
        Self::DEF.name
    }
}

/// A relation that accepts writes.
pub trait Table: Relation {
    /// Shape required or permitted when creating a record.
    type Insert: Debug + Clone + Serialize + DeserializeOwned;
    /// Shape permitted when partially modifying a record.
    type Update: Debug + Clone + Default + Serialize + DeserializeOwned;
}

/// A Postgres enum mirrored as a Rust enum.
pub trait PgEnum: 'static {
    type Schema: Schema;
    type Value: Debug + Copy + Eq + Serialize + DeserializeOwned;

    const DEF: EnumDef;

    /// Database label of a value.
    fn label(value: &Self::Value) -> &'static str;

    /// Parses a database label; unknown labels yield `None`.
    fn from_label(label: &str) -> Option<Self::Value>;
}

/// A Postgres composite type mirrored as a Rust struct.
pub trait CompositeType: 'static {
    type Schema: Schema;
    type Value: Debug + Clone + Serialize + DeserializeOwned;

    const DEF: CompositeDef;
}
