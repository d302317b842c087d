//! Postgres types to Rust types, plus the `use` lines they pull in.

use std::collections::{BTreeMap, BTreeSet};

use learnpath_core::{ColumnType, DatabaseSchema};

use crate::error::CodegenResult;
use crate::naming::{field_ident, type_ident};

/// `use` declarations collected while rendering one file.
#[derive(Debug, Default)]
pub struct Imports {
    paths: BTreeMap<String, BTreeSet<String>>,
}

impl Imports {
    pub fn add(&mut self, path: &str, item: &str) {
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(item.to_string());
    }

    /// Renders external crates, then `crate::`, then `super::`, one blank line apart.
    pub fn render(&self) -> String {
        let mut groups: [Vec<String>; 3] = Default::default();

        for (path, items) in &self.paths {
            let group = if path == "crate" || path.starts_with("crate::") {
                1
            } else if path == "super" || path.starts_with("super::") {
                2
            } else {
                0
            };
            let line = if items.len() == 1 {
                let item = items.iter().next().map(String::as_str).unwrap_or_default();
                format!("use {path}::{item};\n")
            } else {
                let joined: Vec<&str> = items.iter().map(String::as_str).collect();
                format!("use {path}::{{{}}};\n", joined.join(", "))
            };
            groups[group].push(line);
        }

        groups
            .iter()
            .filter(|lines| !lines.is_empty())
            .map(|lines| lines.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Where a type reference is written; decides how generated types are named.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// A relation file inside the module of `schema`.
    Relation { schema: &'a str },
    /// The module file of `schema` itself.
    SchemaModule { schema: &'a str },
}

impl Scope<'_> {
    fn schema(&self) -> &str {
        match self {
            Scope::Relation { schema } | Scope::SchemaModule { schema } => schema,
        }
    }
}

/// Resolves column types against the snapshot being rendered.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    snapshot: &'a DatabaseSchema,
    rendered: BTreeSet<&'a str>,
    overrides: &'a BTreeMap<String, String>,
}

impl<'a> TypeMapper<'a> {
    pub fn new(
        snapshot: &'a DatabaseSchema,
        rendered: BTreeSet<&'a str>,
        overrides: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            snapshot,
            rendered,
            overrides,
        }
    }

    /// Rust type of a column, without the `Option` wrapper for nullability.
    ///
    /// `column_key` is `schema.relation.column`; an override registered under
    /// it wins over one registered under the type name.
    pub fn column_type(
        &self,
        column_key: &str,
        ty: &ColumnType,
        scope: Scope<'_>,
        imports: &mut Imports,
    ) -> CodegenResult<String> {
        if let Some(path) = self
            .overrides
            .get(column_key)
            .or_else(|| self.overrides.get(&ty.udt_name))
        {
            return Ok(path.clone());
        }

        match ty.array_element() {
            Some(element) => {
                let inner = self.named_type(&ty.udt_schema, element, scope, imports)?;
                Ok(format!("Vec<{inner}>"))
            }
            None => self.named_type(&ty.udt_schema, &ty.udt_name, scope, imports),
        }
    }

    fn named_type(
        &self,
        udt_schema: &str,
        udt_name: &str,
        scope: Scope<'_>,
        imports: &mut Imports,
    ) -> CodegenResult<String> {
        if let Some(builtin) = builtin_type(udt_name, imports) {
            return Ok(builtin);
        }

        let generated = self.snapshot.find_enum(udt_schema, udt_name).is_some()
            || self.snapshot.find_composite(udt_schema, udt_name).is_some();
        if !generated || !self.rendered.contains(udt_schema) {
            imports.add("crate", "Json");
            return Ok("Json".to_string());
        }

        let ident = type_ident(udt_name, "type")?;
        if udt_schema != scope.schema() {
            let module = field_ident(udt_schema, "schema")?;
            return Ok(format!("crate::generated::{module}::{ident}"));
        }
        if let Scope::Relation { .. } = scope {
            imports.add("super", &ident);
        }
        Ok(ident)
    }
}

fn builtin_type(udt_name: &str, imports: &mut Imports) -> Option<String> {
    let plain = match udt_name {
        "text" | "varchar" | "bpchar" | "citext" => "String",
        "int2" => "i16",
        "int4" => "i32",
        "int8" => "i64",
        "float4" => "f32",
        "float8" | "numeric" => "f64",
        "bool" => "bool",
        "bytea" => "Vec<u8>",
        "uuid" => {
            imports.add("uuid", "Uuid");
            "Uuid"
        }
        "timestamptz" => {
            imports.add("chrono", "DateTime");
            imports.add("chrono", "Utc");
            "DateTime<Utc>"
        }
        "timestamp" => {
            imports.add("chrono", "NaiveDateTime");
            "NaiveDateTime"
        }
        "date" => {
            imports.add("chrono", "NaiveDate");
            "NaiveDate"
        }
        "time" => {
            imports.add("chrono", "NaiveTime");
            "NaiveTime"
        }
        "json" | "jsonb" => {
            imports.add("crate", "Json");
            "Json"
        }
        _ => return None,
    };
    Some(plain.to_string())
}

#[cfg(test)]
mod tests {
    use learnpath_core::{EnumType, SCHEMA_VERSION};

    use super::*;

    fn snapshot() -> DatabaseSchema {
        DatabaseSchema {
            schema_version: SCHEMA_VERSION.to_string(),
            engine: "postgres".to_string(),
            database: None,
            schemas: Vec::new(),
            enums: vec![
                EnumType {
                    schema: "public".to_string(),
                    name: "task_status".to_string(),
                    labels: vec!["pending".to_string()],
                },
                EnumType {
                    schema: "auth".to_string(),
                    name: "factor_type".to_string(),
                    labels: vec!["totp".to_string()],
                },
            ],
            composite_types: Vec::new(),
            schema_fingerprint: None,
        }
    }

    #[test]
    fn maps_builtins_and_collects_imports() {
        let snapshot = snapshot();
        let overrides = BTreeMap::new();
        let mapper = TypeMapper::new(&snapshot, BTreeSet::from(["public"]), &overrides);
        let scope = Scope::Relation { schema: "public" };
        let mut imports = Imports::default();

        let ty = |name: &str| ColumnType::named("pg_catalog", name);
        let mut map = |name: &str| {
            mapper
                .column_type("public.t.c", &ty(name), scope, &mut imports)
                .unwrap()
        };
        assert_eq!(map("timestamptz"), "DateTime<Utc>");
        assert_eq!(map("_int4"), "Vec<i32>");
        assert_eq!(map("uuid"), "Uuid");
        assert_eq!(map("tsvector"), "Json");

        assert_eq!(
            imports.render(),
            "use chrono::{DateTime, Utc};\nuse uuid::Uuid;\n\nuse crate::Json;\n"
        );
    }

    #[test]
    fn resolves_generated_enums_by_scope() {
        let snapshot = snapshot();
        let overrides = BTreeMap::new();
        let mapper = TypeMapper::new(&snapshot, BTreeSet::from(["public"]), &overrides);
        let status = ColumnType::named("public", "task_status");
        let factor = ColumnType::named("auth", "factor_type");

        let mut imports = Imports::default();
        let scope = Scope::Relation { schema: "public" };
        assert_eq!(
            mapper.column_type("k", &status, scope, &mut imports).unwrap(),
            "TaskStatus"
        );
        assert_eq!(imports.render(), "use super::TaskStatus;\n");

        let mut imports = Imports::default();
        let scope = Scope::SchemaModule { schema: "public" };
        assert_eq!(
            mapper.column_type("k", &status, scope, &mut imports).unwrap(),
            "TaskStatus"
        );
        // `auth` is not rendered, so its enum falls back to JSON.
        assert_eq!(
            mapper.column_type("k", &factor, scope, &mut imports).unwrap(),
            "Json"
        );
    }

    #[test]
    fn column_override_beats_type_override() {
        let snapshot = snapshot();
        let overrides = BTreeMap::from([
            ("numeric".to_string(), "rust_decimal::Decimal".to_string()),
            ("public.paths.score".to_string(), "f32".to_string()),
        ]);
        let mapper = TypeMapper::new(&snapshot, BTreeSet::from(["public"]), &overrides);
        let scope = Scope::Relation { schema: "public" };
        let mut imports = Imports::default();
        let numeric = ColumnType::named("pg_catalog", "numeric");

        assert_eq!(
            mapper
                .column_type("public.paths.score", &numeric, scope, &mut imports)
                .unwrap(),
            "f32"
        );
        assert_eq!(
            mapper
                .column_type("public.paths.cost", &numeric, scope, &mut imports)
                .unwrap(),
            "rust_decimal::Decimal"
        );
    }
}
