use learnpath_codegen::{DriftKind, DriftReport, check_drift, check_schema_drift};
use learnpath_core::{Column, ColumnType, Constraint, DatabaseSchema, EnumType, Table, TableKind};
use learnpath_types::public;

fn fixture() -> DatabaseSchema {
    serde_json::from_str(include_str!("fixtures/public_snapshot.json")).expect("parse fixture")
}

fn table<'a>(snapshot: &'a mut DatabaseSchema, name: &str) -> &'a mut Table {
    snapshot.schemas[0]
        .tables
        .iter_mut()
        .find(|table| table.name == name)
        .unwrap_or_else(|| panic!("{name} missing from fixture"))
}

fn column<'a>(snapshot: &'a mut DatabaseSchema, relation: &str, name: &str) -> &'a mut Column {
    table(snapshot, relation)
        .columns
        .iter_mut()
        .find(|column| column.name == name)
        .unwrap_or_else(|| panic!("{relation}.{name} missing from fixture"))
}

fn single_issue(report: &DriftReport) -> (DriftKind, &str) {
    assert_eq!(report.issues.len(), 1, "unexpected issues: {report:?}");
    (report.issues[0].kind, report.issues[0].path.as_str())
}

#[test]
fn mirror_matches_the_live_schema() {
    let report = check_schema_drift(&public::DEF, &fixture());
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn relation_level_check_matches_too() {
    let snapshot = fixture();
    let report = check_drift(public::RELATIONS, &snapshot.schemas[0]);
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn reports_missing_and_extra_columns() {
    let mut snapshot = fixture();
    table(&mut snapshot, "learning_paths")
        .columns
        .retain(|column| column.name != "notes");
    let mut extra = column(&mut snapshot, "profiles", "name").clone();
    extra.name = "timezone".to_string();
    table(&mut snapshot, "profiles").columns.push(extra);

    let report = check_schema_drift(&public::DEF, &snapshot);
    assert_eq!(report.issues.len(), 2);
    assert_eq!(report.issues[0].kind, DriftKind::MissingColumn);
    assert_eq!(report.issues[0].path, "public.learning_paths.notes");
    assert_eq!(report.issues[1].kind, DriftKind::ExtraColumn);
    assert_eq!(report.issues[1].path, "public.profiles.timezone");
}

#[test]
fn reports_type_nullability_and_default_mismatches() {
    let mut snapshot = fixture();
    column(&mut snapshot, "daily_learning_tasks", "day_number").column_type =
        ColumnType::named("pg_catalog", "int8");
    column(&mut snapshot, "profiles", "email").is_nullable = true;
    column(&mut snapshot, "learning_paths", "status").default = None;

    let report = check_schema_drift(&public::DEF, &snapshot);
    let kinds: Vec<(DriftKind, &str)> = report
        .issues
        .iter()
        .map(|issue| (issue.kind, issue.path.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (
                DriftKind::TypeMismatch,
                "public.daily_learning_tasks.day_number"
            ),
            (DriftKind::DefaultMismatch, "public.learning_paths.status"),
            (DriftKind::NullabilityMismatch, "public.profiles.email"),
        ]
    );
    assert_eq!(report.issues[0].declared.as_deref(), Some("int4"));
    assert_eq!(report.issues[0].actual.as_deref(), Some("int8"));
    assert_eq!(
        report.issues[0].to_string(),
        "public.daily_learning_tasks.day_number: column type differs (declared int4, database int8)"
    );
}

#[test]
fn reports_relationship_drift() {
    let mut snapshot = fixture();
    table(&mut snapshot, "project_recommendations")
        .constraints
        .retain(|constraint| !matches!(constraint, Constraint::ForeignKey(_)));
    for constraint in &mut table(&mut snapshot, "daily_learning_tasks").constraints {
        if let Constraint::ForeignKey(fk) = constraint {
            fk.is_one_to_one = true;
        }
    }

    let report = check_schema_drift(&public::DEF, &snapshot);
    assert_eq!(report.count(DriftKind::RelationshipMismatch), 1);
    assert_eq!(report.count(DriftKind::MissingRelationship), 1);

    let mismatch = &report.issues[0];
    assert_eq!(
        mismatch.path,
        "public.daily_learning_tasks#daily_learning_tasks_learning_path_id_fkey"
    );
    assert_eq!(
        mismatch.declared.as_deref(),
        Some("(learning_path_id) -> learning_paths(id) many-to-one")
    );
    assert_eq!(
        mismatch.actual.as_deref(),
        Some("(learning_path_id) -> learning_paths(id) one-to-one")
    );
}

#[test]
fn reports_extra_relations_and_types() {
    let mut snapshot = fixture();
    let mut audit = table(&mut snapshot, "profiles").clone();
    audit.name = "audit_log".to_string();
    audit.kind = TableKind::Table;
    audit.constraints.clear();
    snapshot.schemas[0].tables.push(audit);
    snapshot.enums.push(EnumType {
        schema: "public".to_string(),
        name: "difficulty".to_string(),
        labels: vec!["easy".to_string(), "hard".to_string()],
    });

    let report = check_schema_drift(&public::DEF, &snapshot);
    assert_eq!(report.count(DriftKind::ExtraRelation), 1);
    assert_eq!(report.count(DriftKind::ExtraEnum), 1);
    assert_eq!(report.issues[0].path, "public.audit_log");
    assert_eq!(report.issues[1].path, "public.difficulty");
}

#[test]
fn reports_missing_relation_and_schema() {
    let mut snapshot = fixture();
    snapshot.schemas[0]
        .tables
        .retain(|table| table.name != "project_recommendations");
    // Relationships of a missing relation are not reported on their own.
    let report = check_schema_drift(&public::DEF, &snapshot);
    assert_eq!(
        single_issue(&report),
        (
            DriftKind::MissingRelation,
            "public.project_recommendations"
        )
    );

    snapshot.schemas.clear();
    let report = check_schema_drift(&public::DEF, &snapshot);
    assert_eq!(single_issue(&report), (DriftKind::MissingSchema, "public"));
}

#[test]
fn merged_reports_stay_sorted() {
    let mut snapshot = fixture();
    column(&mut snapshot, "profiles", "email").is_nullable = true;
    let mut report = check_schema_drift(&public::DEF, &snapshot);

    column(&mut snapshot, "learning_paths", "topic").is_nullable = true;
    report.merge(check_drift(public::RELATIONS, &snapshot.schemas[0]));

    let paths: Vec<&str> = report.issues.iter().map(|issue| issue.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "public.learning_paths.topic",
            "public.profiles.email",
            "public.profiles.email"
        ]
    );
}
