//! Name-to-shape lookups over the mirror.
//!
//! `Tables<Profiles>` is the row of `public.profiles`; the `Schema*` forms
//! take the schema explicitly and only resolve for members of that schema:
//!
//! ```
//! use learnpath_types::{Profiles, Public, SchemaTables, Tables};
//!
//! fn same<T>(_: Option<T>, _: Option<T>) {}
//! same::<Tables<Profiles>>(None, None::<SchemaTables<Public, Profiles>>);
//! ```
//!
//! A relation from another schema is rejected at compile time:
//!
//! ```compile_fail
//! use learnpath_types::{Profiles, SchemaTables};
//!
//! struct Storage;
//! type Nope = SchemaTables<Storage, Profiles>;
//! let _: Option<Nope> = None;
//! ```

use crate::generated::Public;
use crate::relation::{CompositeType, PgEnum, Relation, Schema, Table};

/// Schema used by the unqualified helpers.
pub type DefaultSchema = Public;

/// Resolves the shapes of a relation declared in schema `S`.
pub trait RelationIn<S: Schema> {
    type Row;
}

impl<T: Relation> RelationIn<<T as Relation>::Schema> for T {
    type Row = <T as Relation>::Row;
}

/// Resolves the write shapes of a table declared in schema `S`.
pub trait TableIn<S: Schema> {
    type Insert;
    type Update;
}

impl<T: Table> TableIn<<T as Relation>::Schema> for T {
    type Insert = <T as Table>::Insert;
    type Update = <T as Table>::Update;
}

/// Resolves the value type of an enum declared in schema `S`.
pub trait EnumIn<S: Schema> {
    type Value;
}

impl<E: PgEnum> EnumIn<<E as PgEnum>::Schema> for E {
    type Value = <E as PgEnum>::Value;
}

/// Resolves the value type of a composite type declared in schema `S`.
pub trait CompositeIn<S: Schema> {
    type Value;
}

impl<C: CompositeType> CompositeIn<<C as CompositeType>::Schema> for C {
    type Value = <C as CompositeType>::Value;
}

/// Row of table or view `T` in schema `S`.
pub type SchemaTables<S, T> = <T as RelationIn<S>>::Row;
/// Insert payload of table `T` in schema `S`.
pub type SchemaTablesInsert<S, T> = <T as TableIn<S>>::Insert;
/// Update payload of table `T` in schema `S`.
pub type SchemaTablesUpdate<S, T> = <T as TableIn<S>>::Update;
/// Value type of enum `E` in schema `S`.
pub type SchemaEnums<S, E> = <E as EnumIn<S>>::Value;
/// Value type of composite type `C` in schema `S`.
pub type SchemaCompositeTypes<S, C> = <C as CompositeIn<S>>::Value;

/// Row of table or view `T` in the default schema.
pub type Tables<T> = SchemaTables<DefaultSchema, T>;
/// Insert payload of table `T` in the default schema.
pub type TablesInsert<T> = SchemaTablesInsert<DefaultSchema, T>;
/// Update payload of table `T` in the default schema.
pub type TablesUpdate<T> = SchemaTablesUpdate<DefaultSchema, T>;
/// Value type of enum `E` in the default schema.
pub type Enums<E> = SchemaEnums<DefaultSchema, E>;
/// Value type of composite type `C` in the default schema.
pub type CompositeTypes<C> = SchemaCompositeTypes<DefaultSchema, C>;
