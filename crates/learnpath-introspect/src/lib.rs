//! Postgres catalog introspection.
//!
//! Reads tables, columns, constraints, enums and composite types into a
//! [`DatabaseSchema`] snapshot that code generation and drift checks consume.

pub mod adapter;
pub mod options;
pub mod postgres;

pub use adapter::Adapter;
pub use options::IntrospectOptions;
pub use postgres::{PostgresAdapter, introspect_postgres, introspect_postgres_with_options};

pub use learnpath_core::DatabaseSchema;
