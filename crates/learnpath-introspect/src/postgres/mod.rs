use sqlx::PgPool;

use learnpath_core::{Constraint, DatabaseSchema, Result, SCHEMA_VERSION, Schema, Table};

use crate::adapter::Adapter;
use crate::options::IntrospectOptions;

mod mapper;
mod queries;
mod utils;

const ENGINE: &str = "postgres";

/// Introspects a Postgres database through a pool.
#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pool: PgPool,
}

impl PostgresAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Adapter for PostgresAdapter {
    fn engine(&self) -> &'static str {
        ENGINE
    }

    async fn introspect(&self, opts: &IntrospectOptions) -> Result<DatabaseSchema> {
        introspect(&self.pool, opts).await
    }
}

/// Introspect the `public` schema with default options.
pub async fn introspect_postgres(pool: &PgPool) -> Result<DatabaseSchema> {
    introspect(pool, &IntrospectOptions::default()).await
}

pub async fn introspect_postgres_with_options(
    pool: &PgPool,
    opts: IntrospectOptions,
) -> Result<DatabaseSchema> {
    introspect(pool, &opts).await
}

/// Build a snapshot of every schema `opts` selects.
///
/// Schemas, tables, constraints and enums come back sorted so that two runs
/// against the same database serialize identically.
pub async fn introspect(pool: &PgPool, opts: &IntrospectOptions) -> Result<DatabaseSchema> {
    let database = queries::fetch_database_name(pool).await?;

    let mut schemas = Vec::new();
    for name in mapper::filter_schemas(queries::list_schemas(pool).await?, opts) {
        schemas.push(introspect_schema(pool, name, opts).await?);
    }
    schemas.sort_by(|left, right| left.name.cmp(&right.name));

    let mut enums = mapper::map_enums(queries::list_enums(pool).await?, opts);
    enums.sort_by(|left, right| (&left.schema, &left.name).cmp(&(&right.schema, &right.name)));
    let composite_types =
        mapper::map_composite_types(queries::list_composite_attributes(pool).await?, opts);

    Ok(DatabaseSchema {
        schema_version: SCHEMA_VERSION.to_string(),
        engine: ENGINE.to_string(),
        database: Some(database),
        schemas,
        enums,
        composite_types,
        schema_fingerprint: None,
    })
}

async fn introspect_schema(
    pool: &PgPool,
    name: String,
    opts: &IntrospectOptions,
) -> Result<Schema> {
    let mut tables = mapper::map_tables(queries::list_tables_in_schema(pool, &name).await?, opts);
    for table in &mut tables {
        load_table(pool, &name, table, opts).await?;
    }
    tables.sort_by(|left, right| left.name.cmp(&right.name));

    tracing::debug!(schema = %name, tables = tables.len(), "introspected schema");
    Ok(Schema { name, tables })
}

/// Fills columns, constraints and (optionally) indexes of one relation.
async fn load_table(
    pool: &PgPool,
    schema: &str,
    table: &mut Table,
    opts: &IntrospectOptions,
) -> Result<()> {
    let name = table.name.as_str();
    table.columns = mapper::map_columns(queries::list_columns(pool, schema, name).await?, opts);

    // One-to-one detection needs the keys before the foreign keys are mapped.
    let mut constraints =
        mapper::map_key_constraints(queries::list_key_constraints(pool, schema, name).await?);
    let foreign_keys = mapper::map_foreign_keys(
        queries::list_foreign_keys(pool, schema, name).await?,
        &constraints,
    );
    let checks =
        mapper::map_check_constraints(queries::list_check_constraints(pool, schema, name).await?);
    constraints.extend(checks.into_iter().map(Constraint::Check));
    constraints.extend(foreign_keys.into_iter().map(Constraint::ForeignKey));
    mapper::sort_constraints(&mut constraints);

    if opts.include_indexes {
        table.indexes = mapper::map_indexes(queries::list_indexes(pool, schema, name).await?);
    }
    table.constraints = constraints;

    Ok(())
}
