use learnpath_core::DEFAULT_SCHEMA;

/// What introspection captures.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    pub include_system_schemas: bool,
    pub include_views: bool,
    pub include_materialized_views: bool,
    pub include_foreign_tables: bool,
    pub include_indexes: bool,
    pub include_comments: bool,
    /// Explicit schema list; `None` means every non-system schema.
    pub schemas: Option<Vec<String>>,
}

impl IntrospectOptions {
    /// Options restricted to the given schemas.
    pub fn for_schemas<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemas: Some(schemas.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Whether a schema name passes the filter.
    pub fn wants_schema(&self, schema: &str) -> bool {
        match &self.schemas {
            Some(list) => list.iter().any(|item| item == schema),
            None => self.include_system_schemas || !is_system_schema(schema),
        }
    }
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            include_system_schemas: false,
            include_views: true,
            include_materialized_views: true,
            include_foreign_tables: true,
            include_indexes: true,
            include_comments: true,
            schemas: Some(vec![DEFAULT_SCHEMA.to_string()]),
        }
    }
}

pub(crate) fn is_system_schema(schema: &str) -> bool {
    schema.starts_with("pg_") || schema == "information_schema"
}
