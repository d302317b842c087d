//! Static descriptors of the mirrored catalog.
//!
//! Every generated relation carries a [`RelationDef`] so the mirror can be
//! compared against a live snapshot without reflection.

/// A column as declared by the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    /// Postgres `udt_name` of the column type (`uuid`, `timestamptz`, `_text`, ...).
    pub pg_type: &'static str,
    pub nullable: bool,
    /// The database fills the column when an insert omits it.
    pub has_default: bool,
}

impl ColumnDef {
    /// Whether `Insert` exposes this column as optional.
    pub const fn insert_optional(&self) -> bool {
        self.nullable || self.has_default
    }
}

/// A foreign key declared on a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipDef {
    pub foreign_key_name: &'static str,
    pub columns: &'static [&'static str],
    pub is_one_to_one: bool,
    pub referenced_relation: &'static str,
    pub referenced_columns: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Table,
    View,
}

/// A table or view of the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    pub schema: &'static str,
    pub name: &'static str,
    pub kind: RelationKind,
    pub columns: &'static [ColumnDef],
    pub relationships: &'static [RelationshipDef],
}

impl RelationDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn relationship(&self, foreign_key_name: &str) -> Option<&'static RelationshipDef> {
        self.relationships
            .iter()
            .find(|relationship| relationship.foreign_key_name == foreign_key_name)
    }

    /// Columns an insert must always supply.
    pub fn required_insert_columns(&self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns.iter().filter(|column| !column.insert_optional())
    }

    pub fn is_writable(&self) -> bool {
        self.kind == RelationKind::Table
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDef {
    pub schema: &'static str,
    pub name: &'static str,
    /// Labels in database sort order.
    pub labels: &'static [&'static str],
}

/// A composite type; every attribute is nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeDef {
    pub schema: &'static str,
    pub name: &'static str,
    pub attributes: &'static [ColumnDef],
}

/// Everything the mirror declares for one database schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDef {
    pub name: &'static str,
    pub relations: &'static [RelationDef],
    pub enums: &'static [EnumDef],
    pub composite_types: &'static [CompositeDef],
}

impl SchemaDef {
    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &'static RelationDef> {
        self.relations.iter().filter(|relation| relation.is_writable())
    }

    pub fn views(&self) -> impl Iterator<Item = &'static RelationDef> {
        self.relations.iter().filter(|relation| !relation.is_writable())
    }
}
