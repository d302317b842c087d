//! Comparison of the compiled-in mirror against a live snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use learnpath_core::{DatabaseSchema, ForeignKey, Schema, Table};
use learnpath_types::{ColumnDef, CompositeDef, EnumDef, RelationDef, RelationshipDef, SchemaDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    MissingSchema,
    MissingRelation,
    ExtraRelation,
    RelationKindMismatch,
    MissingColumn,
    ExtraColumn,
    TypeMismatch,
    NullabilityMismatch,
    DefaultMismatch,
    MissingRelationship,
    ExtraRelationship,
    RelationshipMismatch,
    MissingEnum,
    ExtraEnum,
    EnumLabelsMismatch,
    MissingCompositeType,
    ExtraCompositeType,
    CompositeTypeMismatch,
}

impl DriftKind {
    fn describe(self) -> &'static str {
        match self {
            DriftKind::MissingSchema => "schema is declared but not in the database",
            DriftKind::MissingRelation => "relation is declared but not in the database",
            DriftKind::ExtraRelation => "relation exists in the database but is not declared",
            DriftKind::RelationKindMismatch => "relation kind differs",
            DriftKind::MissingColumn => "column is declared but not in the database",
            DriftKind::ExtraColumn => "column exists in the database but is not declared",
            DriftKind::TypeMismatch => "column type differs",
            DriftKind::NullabilityMismatch => "nullability differs",
            DriftKind::DefaultMismatch => "server default differs",
            DriftKind::MissingRelationship => "relationship is declared but has no foreign key",
            DriftKind::ExtraRelationship => "foreign key exists but is not declared",
            DriftKind::RelationshipMismatch => "relationship differs from its foreign key",
            DriftKind::MissingEnum => "enum is declared but not in the database",
            DriftKind::ExtraEnum => "enum exists in the database but is not declared",
            DriftKind::EnumLabelsMismatch => "enum labels differ",
            DriftKind::MissingCompositeType => "composite type is declared but not in the database",
            DriftKind::ExtraCompositeType => {
                "composite type exists in the database but is not declared"
            }
            DriftKind::CompositeTypeMismatch => "composite type attributes differ",
        }
    }
}

/// One difference between the mirror and the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftIssue {
    pub kind: DriftKind,
    /// `schema.relation[.column]`, or `schema.relation#constraint` for relationships.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl fmt::Display for DriftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind.describe())?;
        match (&self.declared, &self.actual) {
            (Some(declared), Some(actual)) => {
                write!(f, " (declared {declared}, database {actual})")
            }
            _ => Ok(()),
        }
    }
}

/// All differences found, sorted by path then kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub issues: Vec<DriftIssue>,
}

impl DriftReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, kind: DriftKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    /// Folds another report in, keeping the order.
    pub fn merge(&mut self, other: DriftReport) {
        self.issues.extend(other.issues);
        self.sort();
    }

    fn push(&mut self, kind: DriftKind, path: String) {
        self.push_diff(kind, path, None, None);
    }

    fn push_diff(
        &mut self,
        kind: DriftKind,
        path: String,
        declared: Option<String>,
        actual: Option<String>,
    ) {
        self.issues.push(DriftIssue {
            kind,
            path,
            declared,
            actual,
        });
    }

    fn sort(&mut self) {
        self.issues.sort_by(|left, right| {
            left.path
                .cmp(&right.path)
                .then_with(|| left.kind.cmp(&right.kind))
        });
    }
}

/// Compares declared relations with the tables and views of one snapshot schema.
pub fn check_drift(declared: &[RelationDef], snapshot: &Schema) -> DriftReport {
    let mut report = DriftReport::default();

    for relation in declared {
        let path = format!("{}.{}", snapshot.name, relation.name);
        match snapshot.find_table(relation.name) {
            Some(table) => check_relation(&mut report, &path, relation, table, &snapshot.name),
            None => report.push(DriftKind::MissingRelation, path),
        }
    }

    for table in &snapshot.tables {
        if !declared.iter().any(|relation| relation.name == table.name) {
            report.push(
                DriftKind::ExtraRelation,
                format!("{}.{}", snapshot.name, table.name),
            );
        }
    }

    report.sort();
    report
}

/// Compares a whole declared schema (relations, enums, composite types).
pub fn check_schema_drift(declared: &SchemaDef, snapshot: &DatabaseSchema) -> DriftReport {
    let Some(schema) = snapshot.find_schema(declared.name) else {
        let mut report = DriftReport::default();
        report.push(DriftKind::MissingSchema, declared.name.to_string());
        return report;
    };

    let mut report = check_drift(declared.relations, schema);
    check_enums(&mut report, declared, snapshot);
    check_composites(&mut report, declared, snapshot);
    report.sort();
    report
}

fn check_relation(
    report: &mut DriftReport,
    path: &str,
    relation: &RelationDef,
    table: &Table,
    schema: &str,
) {
    if relation.is_writable() != table.is_writable() {
        report.push_diff(
            DriftKind::RelationKindMismatch,
            path.to_string(),
            Some(kind_label(relation.is_writable())),
            Some(kind_label(table.is_writable())),
        );
    }

    for column in relation.columns {
        let column_path = format!("{path}.{}", column.name);
        let Some(actual) = table.find_column(column.name) else {
            report.push(DriftKind::MissingColumn, column_path);
            continue;
        };

        if column.pg_type != actual.column_type.udt_name {
            report.push_diff(
                DriftKind::TypeMismatch,
                column_path.clone(),
                Some(column.pg_type.to_string()),
                Some(actual.column_type.udt_name.clone()),
            );
        }
        if column.nullable != actual.is_nullable {
            report.push_diff(
                DriftKind::NullabilityMismatch,
                column_path.clone(),
                Some(nullability(column.nullable)),
                Some(nullability(actual.is_nullable)),
            );
        }
        if column.has_default != actual.has_default() {
            report.push_diff(
                DriftKind::DefaultMismatch,
                column_path,
                Some(default_label(column.has_default)),
                Some(default_label(actual.has_default())),
            );
        }
    }

    for column in &table.columns {
        if relation.column(&column.name).is_none() {
            report.push(DriftKind::ExtraColumn, format!("{path}.{}", column.name));
        }
    }

    check_relationships(report, path, relation, table, schema);
}

fn check_relationships(
    report: &mut DriftReport,
    path: &str,
    relation: &RelationDef,
    table: &Table,
    schema: &str,
) {
    // Only same-schema, named foreign keys are mirrored.
    let foreign_keys: BTreeMap<&str, &ForeignKey> = table
        .foreign_keys()
        .filter(|fk| fk.referenced_schema == schema)
        .filter_map(|fk| fk.name.as_deref().map(|name| (name, fk)))
        .collect();

    for relationship in relation.relationships {
        let fk_path = format!("{path}#{}", relationship.foreign_key_name);
        match foreign_keys.get(relationship.foreign_key_name) {
            None => report.push(DriftKind::MissingRelationship, fk_path),
            Some(fk) => {
                let declared = describe_relationship(relationship);
                let actual = describe_foreign_key(fk);
                if declared != actual {
                    report.push_diff(
                        DriftKind::RelationshipMismatch,
                        fk_path,
                        Some(declared),
                        Some(actual),
                    );
                }
            }
        }
    }

    for name in foreign_keys.keys() {
        if relation.relationship(name).is_none() {
            report.push(DriftKind::ExtraRelationship, format!("{path}#{name}"));
        }
    }
}

fn describe_relationship(relationship: &RelationshipDef) -> String {
    relationship_text(
        relationship.columns.iter().copied(),
        relationship.referenced_relation,
        relationship.referenced_columns.iter().copied(),
        relationship.is_one_to_one,
    )
}

fn describe_foreign_key(fk: &ForeignKey) -> String {
    relationship_text(
        fk.columns.iter().map(String::as_str),
        &fk.referenced_table,
        fk.referenced_columns.iter().map(String::as_str),
        fk.is_one_to_one,
    )
}

fn relationship_text<'a>(
    columns: impl Iterator<Item = &'a str>,
    referenced: &str,
    referenced_columns: impl Iterator<Item = &'a str>,
    one_to_one: bool,
) -> String {
    let columns: Vec<&str> = columns.collect();
    let referenced_columns: Vec<&str> = referenced_columns.collect();
    let cardinality = if one_to_one { "one-to-one" } else { "many-to-one" };
    format!(
        "({}) -> {referenced}({}) {cardinality}",
        columns.join(", "),
        referenced_columns.join(", ")
    )
}

fn kind_label(writable: bool) -> String {
    if writable { "table" } else { "view" }.to_string()
}

fn nullability(nullable: bool) -> String {
    if nullable { "nullable" } else { "not null" }.to_string()
}

fn default_label(has_default: bool) -> String {
    if has_default { "default" } else { "no default" }.to_string()
}

fn check_enums(report: &mut DriftReport, declared: &SchemaDef, snapshot: &DatabaseSchema) {
    for item in declared.enums {
        let path = format!("{}.{}", item.schema, item.name);
        match snapshot.find_enum(item.schema, item.name) {
            None => report.push(DriftKind::MissingEnum, path),
            Some(actual) if actual.labels != item.labels => report.push_diff(
                DriftKind::EnumLabelsMismatch,
                path,
                Some(item.labels.join(", ")),
                Some(actual.labels.join(", ")),
            ),
            Some(_) => {}
        }
    }

    for actual in snapshot.enums_in(declared.name) {
        if !declared.enums.iter().any(|item: &EnumDef| item.name == actual.name) {
            report.push(
                DriftKind::ExtraEnum,
                format!("{}.{}", actual.schema, actual.name),
            );
        }
    }
}

fn check_composites(report: &mut DriftReport, declared: &SchemaDef, snapshot: &DatabaseSchema) {
    for item in declared.composite_types {
        let path = format!("{}.{}", item.schema, item.name);
        let Some(actual) = snapshot.find_composite(item.schema, item.name) else {
            report.push(DriftKind::MissingCompositeType, path);
            continue;
        };

        let declared_attributes = attribute_list(
            item.attributes
                .iter()
                .map(|attribute: &ColumnDef| (attribute.name, attribute.pg_type)),
        );
        let actual_attributes = attribute_list(actual.attributes.iter().map(|attribute| {
            (
                attribute.name.as_str(),
                attribute.attribute_type.udt_name.as_str(),
            )
        }));
        if declared_attributes != actual_attributes {
            report.push_diff(
                DriftKind::CompositeTypeMismatch,
                path,
                Some(declared_attributes),
                Some(actual_attributes),
            );
        }
    }

    for actual in snapshot.composite_types_in(declared.name) {
        let known = declared
            .composite_types
            .iter()
            .any(|item: &CompositeDef| item.name == actual.name);
        if !known {
            report.push(
                DriftKind::ExtraCompositeType,
                format!("{}.{}", actual.schema, actual.name),
            );
        }
    }
}

fn attribute_list<'a>(attributes: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    attributes
        .map(|(name, pg_type)| format!("{name} {pg_type}"))
        .collect::<Vec<_>>()
        .join(", ")
}
