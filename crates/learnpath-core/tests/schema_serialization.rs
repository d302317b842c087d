use learnpath_core::{
    Column, ColumnType, Constraint, DatabaseSchema, FkAction, FkMatchType, ForeignKey, Schema,
    Table, TableKind,
};
use schemars::schema_for;

fn snapshot() -> DatabaseSchema {
    DatabaseSchema {
        schema_version: "0.1".to_string(),
        engine: "postgres".to_string(),
        database: Some("postgres".to_string()),
        schemas: vec![Schema {
            name: "public".to_string(),
            tables: Vec::new(),
        }],
        enums: Vec::new(),
        composite_types: Vec::new(),
        schema_fingerprint: None,
    }
}

#[test]
fn serializes_schema_deterministically() {
    let json = serde_json::to_string_pretty(&snapshot()).expect("serialize schema");
    let expected = r#"{
  "schema_version": "0.1",
  "engine": "postgres",
  "database": "postgres",
  "schemas": [
    {
      "name": "public",
      "tables": []
    }
  ],
  "enums": [],
  "composite_types": [],
  "schema_fingerprint": null
}"#;
    assert_eq!(json, expected);
}

#[test]
fn reads_snapshots_without_composite_types() {
    let json = r#"{
      "schema_version": "0.1",
      "engine": "postgres",
      "database": null,
      "schemas": [],
      "enums": [],
      "schema_fingerprint": null
    }"#;
    let parsed: DatabaseSchema = serde_json::from_str(json).expect("parse snapshot");
    assert!(parsed.composite_types.is_empty());
}

#[test]
fn snapshot_conforms_to_its_json_schema() {
    let mut schema = snapshot();
    schema.schemas[0].tables.push(Table {
        name: "learning_paths".to_string(),
        kind: TableKind::Table,
        comment: Some("one generated plan per topic".to_string()),
        columns: vec![Column {
            ordinal_position: 1,
            name: "user_id".to_string(),
            column_type: ColumnType::named("pg_catalog", "uuid"),
            is_nullable: false,
            default: None,
            identity: None,
            generated: None,
            comment: None,
        }],
        constraints: vec![Constraint::ForeignKey(ForeignKey {
            name: Some("learning_paths_user_id_fkey".to_string()),
            columns: vec!["user_id".to_string()],
            referenced_schema: "public".to_string(),
            referenced_table: "profiles".to_string(),
            referenced_columns: vec!["id".to_string()],
            on_update: FkAction::NoAction,
            on_delete: FkAction::Cascade,
            match_type: FkMatchType::Simple,
            is_deferrable: false,
            initially_deferred: false,
            is_one_to_one: false,
        })],
        indexes: Vec::new(),
    });

    let json_schema =
        serde_json::to_value(schema_for!(DatabaseSchema)).expect("serialize json schema");
    let compiled = jsonschema::JSONSchema::compile(&json_schema).expect("compile json schema");
    let instance = serde_json::to_value(&schema).expect("serialize snapshot");

    assert!(compiled.is_valid(&instance));
}
