use std::collections::{BTreeMap, BTreeSet};

use crate::constraints::Constraint;
use crate::error::{Error, Result};
use crate::schema::DatabaseSchema;

type Catalog<'a> = BTreeMap<&'a str, BTreeMap<&'a str, BTreeSet<&'a str>>>;

/// Validate internal consistency of a snapshot.
///
/// This checks:
/// - duplicate schemas/tables/columns and duplicate enum or composite names
/// - primary key, unique and foreign key columns exist
/// - foreign key targets exist and have matching arity; targets in schemas
///   the snapshot did not capture are skipped
pub fn validate_schema(schema: &DatabaseSchema) -> Result<()> {
    let catalog = build_catalog(schema)?;

    for db_schema in &schema.schemas {
        for table in &db_schema.tables {
            let qualified = format!("{}.{}", db_schema.name, table.name);
            let columns = &catalog[db_schema.name.as_str()][table.name.as_str()];

            for constraint in &table.constraints {
                let label = constraint_label(constraint);
                for column in constraint.columns() {
                    if !columns.contains(column.as_str()) {
                        return Err(Error::invalid(format!(
                            "{label} column not found: {qualified}.{column}"
                        )));
                    }
                }

                let Constraint::ForeignKey(fk) = constraint else {
                    continue;
                };

                if fk.columns.len() != fk.referenced_columns.len() {
                    return Err(Error::invalid(format!(
                        "foreign key arity mismatch on {qualified}: {} local vs {} referenced",
                        fk.columns.len(),
                        fk.referenced_columns.len()
                    )));
                }

                // Targets in schemas outside the snapshot cannot be checked.
                let Some(ref_tables) = catalog.get(fk.referenced_schema.as_str()) else {
                    continue;
                };
                let ref_columns = ref_tables
                    .get(fk.referenced_table.as_str())
                    .ok_or_else(|| {
                        Error::invalid(format!(
                            "referenced table not found: {}.{}",
                            fk.referenced_schema, fk.referenced_table
                        ))
                    })?;

                if let Some(missing) = fk
                    .referenced_columns
                    .iter()
                    .find(|column| !ref_columns.contains(column.as_str()))
                {
                    return Err(Error::invalid(format!(
                        "referenced column not found: {}.{}.{}",
                        fk.referenced_schema, fk.referenced_table, missing
                    )));
                }
            }
        }
    }

    check_unique_names(
        schema
            .enums
            .iter()
            .map(|item| (item.schema.as_str(), item.name.as_str())),
        "enum",
    )?;
    check_unique_names(
        schema
            .composite_types
            .iter()
            .map(|item| (item.schema.as_str(), item.name.as_str())),
        "composite type",
    )?;

    Ok(())
}

fn build_catalog(schema: &DatabaseSchema) -> Result<Catalog<'_>> {
    let mut catalog = Catalog::new();

    for db_schema in &schema.schemas {
        if catalog.contains_key(db_schema.name.as_str()) {
            return Err(Error::invalid(format!("duplicate schema name: {}", db_schema.name)));
        }

        let mut tables = BTreeMap::new();
        for table in &db_schema.tables {
            if tables.contains_key(table.name.as_str()) {
                return Err(Error::invalid(format!(
                    "duplicate table name: {}.{}",
                    db_schema.name, table.name
                )));
            }

            let mut columns = BTreeSet::new();
            for column in &table.columns {
                if !columns.insert(column.name.as_str()) {
                    return Err(Error::invalid(format!(
                        "duplicate column name: {}.{}.{}",
                        db_schema.name, table.name, column.name
                    )));
                }
            }

            tables.insert(table.name.as_str(), columns);
        }

        catalog.insert(db_schema.name.as_str(), tables);
    }

    Ok(catalog)
}

fn check_unique_names<'a>(
    names: impl Iterator<Item = (&'a str, &'a str)>,
    what: &str,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for (schema, name) in names {
        if !seen.insert((schema, name)) {
            return Err(Error::invalid(format!("duplicate {what} name: {schema}.{name}")));
        }
    }
    Ok(())
}

fn constraint_label(constraint: &Constraint) -> &'static str {
    match constraint {
        Constraint::PrimaryKey(_) => "primary key",
        Constraint::ForeignKey(_) => "foreign key",
        Constraint::Unique(_) => "unique",
        Constraint::Check(_) => "check",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{FkAction, FkMatchType, ForeignKey, PrimaryKey};
    use crate::schema::{Column, Schema, Table, TableKind};
    use crate::types::{ColumnType, EnumType};

    fn column(name: &str) -> Column {
        Column {
            ordinal_position: 1,
            name: name.to_string(),
            column_type: ColumnType::named("pg_catalog", "uuid"),
            is_nullable: false,
            default: None,
            identity: None,
            generated: None,
            comment: None,
        }
    }

    fn table(name: &str, columns: &[&str], constraints: Vec<Constraint>) -> Table {
        Table {
            name: name.to_string(),
            kind: TableKind::Table,
            comment: None,
            columns: columns.iter().map(|name| column(name)).collect(),
            constraints,
            indexes: Vec::new(),
        }
    }

    fn fk(columns: &[&str], table: &str, referenced: &[&str]) -> Constraint {
        Constraint::ForeignKey(ForeignKey {
            name: Some(format!("{table}_fkey")),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            referenced_schema: "public".to_string(),
            referenced_table: table.to_string(),
            referenced_columns: referenced.iter().map(|c| c.to_string()).collect(),
            on_update: FkAction::NoAction,
            on_delete: FkAction::Cascade,
            match_type: FkMatchType::Simple,
            is_deferrable: false,
            initially_deferred: false,
            is_one_to_one: false,
        })
    }

    fn snapshot(tables: Vec<Table>) -> DatabaseSchema {
        DatabaseSchema {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            engine: "postgres".to_string(),
            database: None,
            schemas: vec![Schema {
                name: "public".to_string(),
                tables,
            }],
            enums: Vec::new(),
            composite_types: Vec::new(),
            schema_fingerprint: None,
        }
    }

    #[test]
    fn accepts_consistent_snapshot() {
        let schema = snapshot(vec![
            table(
                "profiles",
                &["id"],
                vec![Constraint::PrimaryKey(PrimaryKey {
                    name: Some("profiles_pkey".to_string()),
                    columns: vec!["id".to_string()],
                })],
            ),
            table(
                "learning_paths",
                &["id", "user_id"],
                vec![fk(&["user_id"], "profiles", &["id"])],
            ),
        ]);

        validate_schema(&schema).expect("snapshot should be valid");
    }

    #[test]
    fn rejects_duplicate_columns() {
        let schema = snapshot(vec![table("profiles", &["id", "id"], Vec::new())]);
        let err = validate_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("duplicate column name: public.profiles.id"));
    }

    #[test]
    fn rejects_dangling_foreign_key() {
        let schema = snapshot(vec![table(
            "learning_paths",
            &["id", "user_id"],
            vec![fk(&["user_id"], "profiles", &["id"])],
        )]);
        let err = validate_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("referenced table not found: public.profiles"));
    }

    #[test]
    fn skips_targets_in_uncaptured_schemas() {
        let mut profiles = table("profiles", &["id"], Vec::new());
        let Constraint::ForeignKey(mut auth_fk) = fk(&["id"], "users", &["id"]) else {
            unreachable!();
        };
        auth_fk.referenced_schema = "auth".to_string();
        profiles.constraints.push(Constraint::ForeignKey(auth_fk));

        validate_schema(&snapshot(vec![profiles])).unwrap();
    }

    #[test]
    fn rejects_foreign_key_arity_mismatch() {
        let schema = snapshot(vec![
            table("profiles", &["id", "email"], Vec::new()),
            table(
                "learning_paths",
                &["id", "user_id"],
                vec![fk(&["user_id"], "profiles", &["id", "email"])],
            ),
        ]);
        let err = validate_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("arity mismatch"));
    }

    #[test]
    fn rejects_missing_constraint_column() {
        let schema = snapshot(vec![table(
            "profiles",
            &["id"],
            vec![Constraint::PrimaryKey(PrimaryKey {
                name: None,
                columns: vec!["uuid".to_string()],
            })],
        )]);
        let err = validate_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("primary key column not found"));
    }

    #[test]
    fn rejects_duplicate_enum() {
        let mut schema = snapshot(Vec::new());
        let status = EnumType {
            schema: "public".to_string(),
            name: "task_status".to_string(),
            labels: vec!["pending".to_string()],
        };
        schema.enums = vec![status.clone(), status];
        let err = validate_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("duplicate enum name: public.task_status"));
    }
}
