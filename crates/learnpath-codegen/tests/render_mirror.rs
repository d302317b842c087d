use std::fs;
use std::path::Path;
use std::process::Command;

use learnpath_codegen::{CodegenError, RenderOptions, render_database, write_files};
use learnpath_core::{
    Column, ColumnType, CompositeAttribute, CompositeType, DatabaseSchema, EnumType,
    GeneratedExpression, GeneratedKind, IdentityGeneration, Table, TableKind,
};

fn fixture() -> DatabaseSchema {
    serde_json::from_str(include_str!("fixtures/public_snapshot.json")).expect("parse fixture")
}

fn rendered(snapshot: &DatabaseSchema, path: &str) -> String {
    render_database(snapshot, &RenderOptions::default())
        .expect("render")
        .into_iter()
        .find(|file| file.path == Path::new(path))
        .unwrap_or_else(|| panic!("{path} not rendered"))
        .contents
}

fn table(name: &str, columns: Vec<Column>) -> Table {
    Table {
        name: name.to_string(),
        kind: TableKind::Table,
        comment: None,
        columns,
        constraints: Vec::new(),
        indexes: Vec::new(),
    }
}

fn column(name: &str, udt_schema: &str, udt_name: &str, nullable: bool) -> Column {
    Column {
        ordinal_position: 1,
        name: name.to_string(),
        column_type: ColumnType::named(udt_schema, udt_name),
        is_nullable: nullable,
        default: None,
        identity: None,
        generated: None,
        comment: None,
    }
}

#[test]
fn renders_the_committed_mirror() {
    let snapshot = fixture();
    let files = render_database(&snapshot, &RenderOptions::default()).expect("render");

    let committed = [
        ("mod.rs", include_str!("../../learnpath-types/src/generated/mod.rs")),
        (
            "public/mod.rs",
            include_str!("../../learnpath-types/src/generated/public/mod.rs"),
        ),
        (
            "public/profiles.rs",
            include_str!("../../learnpath-types/src/generated/public/profiles.rs"),
        ),
        (
            "public/learning_paths.rs",
            include_str!("../../learnpath-types/src/generated/public/learning_paths.rs"),
        ),
        (
            "public/daily_learning_tasks.rs",
            include_str!("../../learnpath-types/src/generated/public/daily_learning_tasks.rs"),
        ),
        (
            "public/project_recommendations.rs",
            include_str!("../../learnpath-types/src/generated/public/project_recommendations.rs"),
        ),
    ];

    assert_eq!(files.len(), committed.len());
    for (path, expected) in committed {
        let file = files
            .iter()
            .find(|file| file.path == Path::new(path))
            .unwrap_or_else(|| panic!("{path} not rendered"));
        assert_eq!(file.contents, expected, "{path} drifted from the renderer");
    }
}

#[test]
fn renders_enums_composites_and_views() {
    let mut snapshot = fixture();
    snapshot.enums.push(EnumType {
        schema: "public".to_string(),
        name: "task_status".to_string(),
        labels: vec![
            "pending".to_string(),
            "in_progress".to_string(),
            "completed".to_string(),
        ],
    });
    snapshot.composite_types.push(CompositeType {
        schema: "public".to_string(),
        name: "material".to_string(),
        attributes: vec![
            CompositeAttribute {
                name: "title".to_string(),
                attribute_type: ColumnType::named("pg_catalog", "text"),
            },
            CompositeAttribute {
                name: "url".to_string(),
                attribute_type: ColumnType::named("pg_catalog", "text"),
            },
        ],
    });
    snapshot.schemas[0].tables.push(Table {
        name: "active_paths".to_string(),
        kind: TableKind::View,
        comment: None,
        columns: vec![
            column("id", "pg_catalog", "uuid", true),
            column("status", "public", "task_status", true),
            column("type", "pg_catalog", "text", true),
        ],
        constraints: Vec::new(),
        indexes: Vec::new(),
    });

    let schema_mod = rendered(&snapshot, "public/mod.rs");
    let pending = "pub enum TaskStatus {\n    #[serde(rename = \"pending\")]\n    Pending,";
    assert!(schema_mod.contains(pending));
    assert!(schema_mod.contains("            TaskStatus::InProgress => \"in_progress\","));
    assert!(schema_mod.contains("    <TaskStatus as PgEnum>::DEF,"));
    assert!(schema_mod.contains("pub struct Material {\n    pub title: Option<String>,"));
    assert!(schema_mod.contains("    <Material as CompositeType>::DEF,"));
    assert!(schema_mod.contains("pub use active_paths::ActivePaths;"));
    assert!(schema_mod.contains("use serde::{Deserialize, Serialize};"));

    let view = rendered(&snapshot, "public/active_paths.rs");
    assert!(view.starts_with("//! `public.active_paths` view."));
    assert!(view.contains("use super::{Public, TaskStatus};"));
    assert!(view.contains("    pub status: Option<TaskStatus>,"));
    assert!(view.contains("    pub r#type: Option<String>,"));
    assert!(view.contains("kind: RelationKind::View,"));
    assert!(!view.contains("pub struct Insert"));
    assert!(!view.contains("pub struct Update"));
    assert!(!view.contains("impl Table for"));
}

#[test]
fn skips_views_when_disabled() {
    let mut snapshot = fixture();
    snapshot.schemas[0].tables.push(Table {
        name: "active_paths".to_string(),
        kind: TableKind::View,
        comment: None,
        columns: vec![column("id", "pg_catalog", "uuid", true)],
        constraints: Vec::new(),
        indexes: Vec::new(),
    });
    let opts = RenderOptions {
        include_views: false,
        ..RenderOptions::default()
    };

    let files = render_database(&snapshot, &opts).expect("render");
    assert!(
        files
            .iter()
            .all(|file| file.path != Path::new("public/active_paths.rs"))
    );
}

#[test]
fn applies_type_overrides() {
    let snapshot = fixture();
    let mut opts = RenderOptions::default();
    opts.type_overrides.insert(
        "public.profiles.email".to_string(),
        "crate::Json".to_string(),
    );

    let files = render_database(&snapshot, &opts).expect("render");
    let profiles = files
        .iter()
        .find(|file| file.path == Path::new("public/profiles.rs"))
        .expect("profiles rendered");
    assert!(profiles.contents.contains("    pub email: crate::Json,"));
}

#[test]
fn rejects_columns_that_are_not_identifiers() {
    let mut snapshot = fixture();
    snapshot.schemas[0].tables[0]
        .columns
        .push(column("2fa_enabled", "pg_catalog", "bool", true));

    let err = render_database(&snapshot, &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::InvalidIdentifier { what: "column", ref name } if name == "2fa_enabled"
    ));
}

#[test]
fn rejects_columns_that_collide_on_a_field() {
    let notes = table(
        "notes",
        vec![
            column("userId", "pg_catalog", "uuid", false),
            column("user_id", "pg_catalog", "uuid", false),
        ],
    );
    let mut snapshot = fixture();
    snapshot.schemas[0].tables.push(notes);

    let err = render_database(&snapshot, &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Unsupported(message) if message.contains("public.notes")
            && message.contains("user_id")
    ));
}

#[test]
fn rejects_relations_that_shadow_the_schema_module() {
    let shadow = table("mod", vec![column("id", "pg_catalog", "uuid", false)]);
    let mut snapshot = fixture();
    snapshot.schemas[0].tables.push(shadow);

    let err = render_database(&snapshot, &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Unsupported(message) if message.contains("public.mod")
    ));
}

#[test]
fn rejects_relations_that_collide_on_a_module() {
    let mut snapshot = fixture();
    let columns = vec![column("id", "pg_catalog", "uuid", false)];
    snapshot.schemas[0].tables.push(table("study-notes", columns.clone()));
    snapshot.schemas[0].tables.push(table("study_notes", columns));

    let err = render_database(&snapshot, &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Unsupported(message) if message.contains("study_notes")
    ));
}

#[test]
fn leaves_always_generated_columns_out_of_writes() {
    let mut id = column("id", "pg_catalog", "int8", false);
    id.identity = Some(IdentityGeneration::Always);
    let mut total = column("total_minutes", "pg_catalog", "int4", false);
    total.generated = Some(GeneratedExpression {
        kind: GeneratedKind::Stored,
        expression: Some("(minutes * sessions)".to_string()),
    });
    let sessions = table(
        "study_sessions",
        vec![
            id,
            column("minutes", "pg_catalog", "int4", false),
            column("sessions", "pg_catalog", "int4", false),
            total,
        ],
    );
    let mut snapshot = fixture();
    snapshot.schemas[0].tables.push(sessions);

    let source = rendered(&snapshot, "public/study_sessions.rs");
    let row = section(&source, "pub struct Row {");
    assert!(row.contains("    pub id: i64,"));
    assert!(row.contains("    pub total_minutes: i32,"));

    let insert = section(&source, "pub struct Insert {");
    assert!(!insert.contains("pub id"));
    assert!(!insert.contains("pub total_minutes"));
    assert!(source.contains("    pub fn new(minutes: i32, sessions: i32) -> Self {"));

    let update = section(&source, "pub struct Update {");
    assert!(update.contains("    pub minutes: Option<i32>,"));
    assert!(!update.contains("pub id"));
    assert!(!update.contains("pub total_minutes"));

    assert!(source.contains("        name: \"total_minutes\",\n"));
}

fn section<'a>(source: &'a str, start: &str) -> &'a str {
    let from = source.find(start).unwrap_or_else(|| panic!("`{start}` not rendered"));
    let len = source[from..].find("\n}\n").expect("struct closes");
    &source[from..from + len]
}

#[test]
fn rejects_unknown_schema_selection() {
    let opts = RenderOptions {
        schemas: vec!["storage".to_string()],
        ..RenderOptions::default()
    };

    let err = render_database(&fixture(), &opts).unwrap_err();
    assert!(matches!(err, CodegenError::Unsupported(message) if message.contains("storage")));
}

#[test]
fn writes_the_tree_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = render_database(&fixture(), &RenderOptions::default()).expect("render");

    let summary = write_files(dir.path(), &files).expect("write");
    assert_eq!(summary.written, 6);

    let root = fs::read_to_string(dir.path().join("mod.rs")).expect("read mod.rs");
    assert!(root.contains("pub const POSTGREST_VERSION: &str = \"13.0.4\";"));
    assert!(dir.path().join("public/learning_paths.rs").is_file());
}

#[test]
fn rendered_mirror_is_rustfmt_clean() {
    let installed = Command::new("rustfmt")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success());
    if !installed {
        eprintln!("rustfmt not available, skipping formatting check");
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let files = render_database(&fixture(), &RenderOptions::default()).expect("render");
    write_files(dir.path(), &files).expect("write");

    let output = Command::new("rustfmt")
        .args(["--edition", "2024", "--check"])
        .arg(dir.path().join("mod.rs"))
        .output()
        .expect("run rustfmt");
    assert!(
        output.status.success(),
        "rendered mirror is not rustfmt-clean:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
}
