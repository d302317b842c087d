//! Generated by `learnpath-schema generate`. Do not edit by hand.

use crate::meta::SchemaDef;

pub mod public;

pub use public::Public;

/// PostgREST API version the mirror was generated for.
pub const POSTGREST_VERSION: &str = "13.0.4";

pub const SCHEMAS: &[SchemaDef] = &[public::DEF];
