use std::path::Path;
use std::{env, fs};

use anyhow::{Context, Result, anyhow};
use learnpath_core::{
    Constraint, DatabaseSchema, FkAction, TableKind, build_fk_graph_report, validate_schema,
};
use learnpath_introspect::{Adapter, PostgresAdapter};
use sqlx::{PgPool, postgres::PgPoolOptions};

const FIXTURE_SCHEMA: &str = "learnpath_fixture";
const FIXTURE_PATHS: &[&str] = &["fixtures/sql/postgres/001_schema.sql"];

fn database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL").ok()
}

async fn run_fixture(pool: &PgPool, path: &str) -> Result<()> {
    let full = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    let script =
        fs::read_to_string(&full).with_context(|| format!("reading fixture {path}"))?;

    for statement in script.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }

        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("executing fixture {path}"))?;
    }

    Ok(())
}

async fn fixture_snapshot() -> Result<Option<DatabaseSchema>> {
    let Some(db_url) = database_url() else {
        eprintln!("TEST_DATABASE_URL not set, skipping live introspection test");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(&db_url)
        .await
        .context("connecting to Postgres")?;

    for path in FIXTURE_PATHS {
        run_fixture(&pool, path).await?;
    }

    let adapter = PostgresAdapter::new(pool);
    assert_eq!(adapter.engine(), "postgres");
    let snapshot = adapter
        .introspect_schemas(&[FIXTURE_SCHEMA.to_string()])
        .await?;
    Ok(Some(snapshot))
}

// One test drives the fixture: parallel tests would race on recreating the schema.
#[tokio::test]
async fn introspects_learning_path_fixture() -> Result<()> {
    let Some(snapshot) = fixture_snapshot().await? else {
        return Ok(());
    };

    check_tables(&snapshot)?;
    check_types_and_fk_order(&snapshot)
}

fn check_tables(snapshot: &DatabaseSchema) -> Result<()> {
    validate_schema(snapshot)?;
    assert_eq!(snapshot.schemas.len(), 1);

    let schema = snapshot
        .find_schema(FIXTURE_SCHEMA)
        .ok_or_else(|| anyhow!("expected fixture schema"))?;

    let names: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "active_paths",
            "daily_learning_tasks",
            "learning_paths",
            "profiles",
            "project_recommendations",
        ]
    );

    let profiles = schema
        .find_table("profiles")
        .ok_or_else(|| anyhow!("expected profiles"))?;
    assert_eq!(profiles.kind, TableKind::Table);
    let id = profiles.find_column("id").ok_or_else(|| anyhow!("id"))?;
    assert!(!id.insert_optional(), "profiles.id has no default");
    let created_at = profiles
        .find_column("created_at")
        .ok_or_else(|| anyhow!("created_at"))?;
    assert_eq!(created_at.column_type.udt_name, "timestamptz");
    assert!(!created_at.is_nullable);
    assert!(created_at.has_default());
    assert!(
        profiles
            .constraints
            .iter()
            .any(|c| matches!(c, Constraint::Unique(u) if u.columns == ["email"]))
    );

    let paths = schema
        .find_table("learning_paths")
        .ok_or_else(|| anyhow!("expected learning_paths"))?;
    let fk = paths
        .foreign_keys()
        .next()
        .ok_or_else(|| anyhow!("expected user fk"))?;
    assert_eq!(fk.name.as_deref(), Some("learning_paths_user_id_fkey"));
    assert_eq!(fk.columns, ["user_id"]);
    assert_eq!(fk.referenced_table, "profiles");
    assert_eq!(fk.referenced_columns, ["id"]);
    assert_eq!(fk.on_delete, FkAction::Cascade);
    assert!(!fk.is_one_to_one);

    let view = schema
        .find_table("active_paths")
        .ok_or_else(|| anyhow!("expected view"))?;
    assert_eq!(view.kind, TableKind::View);
    assert!(!view.is_writable());

    Ok(())
}

fn check_types_and_fk_order(snapshot: &DatabaseSchema) -> Result<()> {
    let status = snapshot
        .find_enum(FIXTURE_SCHEMA, "task_status")
        .ok_or_else(|| anyhow!("expected task_status enum"))?;
    assert_eq!(status.labels, ["pending", "in_progress", "completed"]);

    let material = snapshot
        .find_composite(FIXTURE_SCHEMA, "material")
        .ok_or_else(|| anyhow!("expected material composite"))?;
    let attributes: Vec<&str> = material.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(attributes, vec!["title", "url"]);

    let report = build_fk_graph_report(snapshot);
    let order = report.topo_order.ok_or_else(|| anyhow!("expected acyclic graph"))?;
    let position = |name: &str| {
        order
            .iter()
            .position(|item| item == &format!("{FIXTURE_SCHEMA}.{name}"))
    };
    assert!(position("profiles") < position("learning_paths"));
    assert!(position("learning_paths") < position("daily_learning_tasks"));

    let json_schema = serde_json::to_value(schemars::schema_for!(DatabaseSchema))?;
    let compiled = jsonschema::JSONSchema::compile(&json_schema)
        .map_err(|err| anyhow!("invalid json schema: {err}"))?;
    assert!(compiled.is_valid(&serde_json::to_value(snapshot)?));

    Ok(())
}
