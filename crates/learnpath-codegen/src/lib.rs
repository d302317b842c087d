//! Code generation for the learning-path schema mirror.
//!
//! [`render_database`] turns a [`learnpath_core::DatabaseSchema`] snapshot
//! into the source tree under `learnpath-types/src/generated`, and
//! [`check_schema_drift`] compares the compiled-in mirror against a snapshot.

pub mod drift;
pub mod error;
pub mod naming;
pub mod output;
pub mod render;
pub mod typemap;

pub use drift::{DriftIssue, DriftKind, DriftReport, check_drift, check_schema_drift};
pub use error::{CodegenError, CodegenResult};
pub use output::{WriteSummary, write_bytes_atomic, write_files};
pub use render::{DEFAULT_POSTGREST_VERSION, GeneratedFile, RenderOptions, render_database};
