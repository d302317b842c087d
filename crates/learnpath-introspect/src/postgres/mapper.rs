use std::collections::BTreeSet;

use learnpath_core::{
    CheckConstraint, Column, ColumnType, CompositeAttribute, CompositeType, Constraint, EnumType,
    ForeignKey, GeneratedExpression, GeneratedKind, Index, PrimaryKey, Table, TableKind,
    UniqueConstraint,
};

use crate::options::IntrospectOptions;
use crate::postgres::utils::{
    fk_action_from_code, fk_match_from_code, identity_from_text, is_primary_key,
    relkind_to_table_kind,
};

use super::queries::{
    RawCheckConstraint, RawColumn, RawCompositeAttribute, RawEnumType, RawForeignKey, RawIndex,
    RawKeyConstraint, RawTable,
};

pub fn filter_schemas(raw: Vec<String>, opts: &IntrospectOptions) -> Vec<String> {
    raw.into_iter()
        .filter(|schema| opts.wants_schema(schema))
        .collect()
}

pub fn map_tables(raw: Vec<RawTable>, opts: &IntrospectOptions) -> Vec<Table> {
    raw.into_iter()
        .filter_map(|table| {
            let kind = relkind_to_table_kind(table.relkind);
            if !table_kind_enabled(&kind, opts) {
                return None;
            }

            Some(Table {
                name: table.name,
                kind,
                comment: table.comment.filter(|_| opts.include_comments),
                columns: Vec::new(),
                constraints: Vec::new(),
                indexes: Vec::new(),
            })
        })
        .collect()
}

fn table_kind_enabled(kind: &TableKind, opts: &IntrospectOptions) -> bool {
    match kind {
        TableKind::View => opts.include_views,
        TableKind::MaterializedView => opts.include_materialized_views,
        TableKind::ForeignTable => opts.include_foreign_tables,
        _ => true,
    }
}

pub fn map_columns(raw: Vec<RawColumn>, opts: &IntrospectOptions) -> Vec<Column> {
    raw.into_iter()
        .map(|col| Column {
            ordinal_position: col.ordinal_position,
            name: col.name,
            column_type: ColumnType {
                data_type: col.data_type,
                udt_schema: col.udt_schema,
                udt_name: col.udt_name,
                character_max_length: col.character_max_length,
                numeric_precision: col.numeric_precision,
                numeric_scale: col.numeric_scale,
                collation: col.collation,
            },
            is_nullable: col.is_nullable,
            default: col.default,
            identity: identity_from_text(col.identity_generation),
            generated: col.is_generated.then(|| GeneratedExpression {
                kind: GeneratedKind::Stored,
                expression: col.generation_expression,
            }),
            comment: col.comment.filter(|_| opts.include_comments),
        })
        .collect()
}

/// Splits key constraints into the primary key and unique constraints.
pub fn map_key_constraints(raw: Vec<RawKeyConstraint>) -> Vec<Constraint> {
    raw.into_iter()
        .map(|key| {
            if is_primary_key(key.contype) {
                Constraint::PrimaryKey(PrimaryKey {
                    name: Some(key.name),
                    columns: key.columns,
                })
            } else {
                Constraint::Unique(UniqueConstraint {
                    name: Some(key.name),
                    columns: key.columns,
                    is_deferrable: key.is_deferrable,
                    initially_deferred: key.initially_deferred,
                })
            }
        })
        .collect()
}

pub fn map_check_constraints(raw: Vec<RawCheckConstraint>) -> Vec<CheckConstraint> {
    raw.into_iter()
        .map(|cc| CheckConstraint {
            name: Some(cc.name),
            expression: cc.expression,
        })
        .collect()
}

/// Maps foreign keys; one-to-one is decided against the table's own keys.
pub fn map_foreign_keys(raw: Vec<RawForeignKey>, keys: &[Constraint]) -> Vec<ForeignKey> {
    let unique_sets: Vec<BTreeSet<&str>> = keys
        .iter()
        .filter(|key| matches!(key, Constraint::PrimaryKey(_) | Constraint::Unique(_)))
        .map(|key| key.columns().iter().map(String::as_str).collect())
        .collect();

    raw.into_iter()
        .map(|fk| {
            let local: BTreeSet<&str> = fk.columns.iter().map(String::as_str).collect();
            let is_one_to_one = unique_sets.iter().any(|set| *set == local);

            ForeignKey {
                name: Some(fk.name),
                columns: fk.columns,
                referenced_schema: fk.referenced_schema,
                referenced_table: fk.referenced_table,
                referenced_columns: fk.referenced_columns,
                on_update: fk_action_from_code(fk.on_update_code),
                on_delete: fk_action_from_code(fk.on_delete_code),
                match_type: fk_match_from_code(fk.match_type_code),
                is_deferrable: fk.is_deferrable,
                initially_deferred: fk.initially_deferred,
                is_one_to_one,
            }
        })
        .collect()
}

pub fn map_indexes(raw: Vec<RawIndex>) -> Vec<Index> {
    raw.into_iter()
        .map(|idx| Index {
            name: idx.name,
            is_unique: idx.is_unique,
            is_primary: idx.is_primary,
            is_valid: idx.is_valid,
            method: idx.method,
            definition: idx.definition,
        })
        .collect()
}

pub fn map_enums(raw: Vec<RawEnumType>, opts: &IntrospectOptions) -> Vec<EnumType> {
    raw.into_iter()
        .filter(|en| opts.wants_schema(&en.schema))
        .map(|en| EnumType {
            schema: en.schema,
            name: en.name,
            labels: en.labels,
        })
        .collect()
}

/// Folds attribute rows (ordered by type) into composite types.
pub fn map_composite_types(
    raw: Vec<RawCompositeAttribute>,
    opts: &IntrospectOptions,
) -> Vec<CompositeType> {
    let mut types: Vec<CompositeType> = Vec::new();

    for attr in raw.into_iter().filter(|attr| opts.wants_schema(&attr.schema)) {
        let attribute = CompositeAttribute {
            name: attr.attribute,
            attribute_type: ColumnType {
                data_type: attr.data_type,
                udt_schema: attr.udt_schema,
                udt_name: attr.udt_name,
                character_max_length: None,
                numeric_precision: None,
                numeric_scale: None,
                collation: None,
            },
        };

        match types.last_mut() {
            Some(last) if last.schema == attr.schema && last.name == attr.name => {
                last.attributes.push(attribute);
            }
            _ => types.push(CompositeType {
                schema: attr.schema,
                name: attr.name,
                attributes: vec![attribute],
            }),
        }
    }

    types
}

pub fn sort_constraints(constraints: &mut [Constraint]) {
    constraints.sort_by_cached_key(constraint_key);
}

fn constraint_key(constraint: &Constraint) -> (u8, String, String) {
    let rank = match constraint {
        Constraint::PrimaryKey(_) => 0,
        Constraint::Unique(_) => 1,
        Constraint::Check(_) => 2,
        Constraint::ForeignKey(_) => 3,
    };
    let detail = match constraint {
        Constraint::Check(check) => check.expression.clone(),
        other => other.columns().join("|"),
    };
    (
        rank,
        constraint.name().unwrap_or_default().to_string(),
        detail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_fk(name: &str, columns: &[&str]) -> RawForeignKey {
        RawForeignKey {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            referenced_schema: "public".to_string(),
            referenced_table: "learning_paths".to_string(),
            referenced_columns: vec!["id".to_string()],
            on_update_code: b'a' as i8,
            on_delete_code: b'c' as i8,
            match_type_code: b's' as i8,
            is_deferrable: false,
            initially_deferred: false,
        }
    }

    fn raw_key(name: &str, contype: u8, columns: &[&str]) -> RawKeyConstraint {
        RawKeyConstraint {
            name: name.to_string(),
            contype: contype as i8,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_deferrable: false,
            initially_deferred: false,
        }
    }

    #[test]
    fn splits_primary_and_unique_keys() {
        let keys = map_key_constraints(vec![
            raw_key("profiles_pkey", b'p', &["id"]),
            raw_key("profiles_email_key", b'u', &["email"]),
        ]);
        assert!(matches!(&keys[0], Constraint::PrimaryKey(pk) if pk.columns == ["id"]));
        assert!(matches!(&keys[1], Constraint::Unique(u) if u.columns == ["email"]));
    }

    #[test]
    fn detects_one_to_one_foreign_keys() {
        let keys = map_key_constraints(vec![
            raw_key("tasks_pkey", b'p', &["id"]),
            raw_key("tasks_path_day_key", b'u', &["learning_path_id"]),
        ]);
        let fks = map_foreign_keys(
            vec![
                raw_fk("tasks_learning_path_id_fkey", &["learning_path_id"]),
                raw_fk("tasks_other_fkey", &["other_id"]),
            ],
            &keys,
        );
        assert!(fks[0].is_one_to_one);
        assert!(!fks[1].is_one_to_one);
    }

    #[test]
    fn groups_composite_attributes_by_type() {
        let attr = |schema: &str, name: &str, attribute: &str| RawCompositeAttribute {
            schema: schema.to_string(),
            name: name.to_string(),
            attribute: attribute.to_string(),
            data_type: "text".to_string(),
            udt_schema: "pg_catalog".to_string(),
            udt_name: "text".to_string(),
        };
        let types = map_composite_types(
            vec![
                attr("public", "material", "title"),
                attr("public", "material", "url"),
                attr("public", "milestone", "label"),
                attr("auth", "factor", "kind"),
            ],
            &IntrospectOptions::default(),
        );

        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name, "material");
        assert_eq!(types[0].attributes.len(), 2);
        assert_eq!(types[1].name, "milestone");
    }

    #[test]
    fn sorts_constraints_by_kind_then_name() {
        let mut constraints = map_key_constraints(vec![
            raw_key("b_key", b'u', &["b"]),
            raw_key("a_key", b'u', &["a"]),
            raw_key("pkey", b'p', &["id"]),
        ]);
        sort_constraints(&mut constraints);
        let names: Vec<_> = constraints.iter().filter_map(Constraint::name).collect();
        assert_eq!(names, vec!["pkey", "a_key", "b_key"]);
    }
}
