use async_trait::async_trait;

use learnpath_core::{DatabaseSchema, Result};

use crate::options::IntrospectOptions;

/// Source of schema snapshots for the mirror.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Engine name recorded in the snapshot (`postgres`).
    fn engine(&self) -> &'static str;

    async fn introspect(&self, opts: &IntrospectOptions) -> Result<DatabaseSchema>;

    /// Snapshot of just `schemas`, other options left at their defaults.
    async fn introspect_schemas(&self, schemas: &[String]) -> Result<DatabaseSchema> {
        self.introspect(&IntrospectOptions::for_schemas(schemas.iter().cloned()))
            .await
    }
}
