//! Rendering of the Rust mirror from a snapshot.
//!
//! The output is a tree rooted at the `generated` module:
//!
//! - `mod.rs` lists the schema modules and the `SCHEMAS` catalog,
//! - `<schema>/mod.rs` holds the schema marker, its enums and composite types,
//! - `<schema>/<relation>.rs` holds one table or view.
//!
//! Columns are emitted in name order so reruns against the same database are
//! byte-identical.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::path::PathBuf;

use learnpath_core::{
    Column, CompositeType, DatabaseSchema, EnumType, ForeignKey, Schema, Table, TableKind,
};

use crate::error::{CodegenError, CodegenResult};
use crate::naming::{field_ident, serde_rename, type_ident, variant_ident};
use crate::typemap::{Imports, Scope, TypeMapper};

pub const DEFAULT_POSTGREST_VERSION: &str = "13.0.4";

pub(crate) const GENERATED_NOTE: &str =
    "Generated by `learnpath-schema generate`. Do not edit by hand.";

const SKIP_NONE: &str = "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n";

const NULLABLE_PATCH: &str = "    #[serde(
        default,
        deserialize_with = \"crate::patch::nullable\",
        skip_serializing_if = \"Option::is_none\"
    )]
";

// Names already taken inside generated modules.
const TAKEN_TYPE_NAMES: &[&str] = &[
    "ColumnDef",
    "CompositeDef",
    "CompositeType",
    "DateTime",
    "Deserialize",
    "EnumDef",
    "Insert",
    "Json",
    "NaiveDate",
    "NaiveDateTime",
    "NaiveTime",
    "PgEnum",
    "Relation",
    "RelationDef",
    "RelationKind",
    "RelationshipDef",
    "Row",
    "Schema",
    "SchemaDef",
    "Serialize",
    "Table",
    "Update",
    "Utc",
    "Uuid",
];

/// What to render and how.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Value of the generated `POSTGREST_VERSION` constant.
    pub postgrest_version: String,
    /// Schemas to render; empty renders every schema in the snapshot.
    pub schemas: Vec<String>,
    /// Render views and materialized views as read-only relations.
    pub include_views: bool,
    /// Rust type paths keyed by `schema.relation.column` or by Postgres type name.
    pub type_overrides: BTreeMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            postgrest_version: DEFAULT_POSTGREST_VERSION.to_string(),
            schemas: Vec::new(),
            include_views: true,
            type_overrides: BTreeMap::new(),
        }
    }
}

/// One file of the rendered tree, relative to the `generated` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Renders every selected schema of `snapshot` into mirror source files.
pub fn render_database(
    snapshot: &DatabaseSchema,
    opts: &RenderOptions,
) -> CodegenResult<Vec<GeneratedFile>> {
    let schemas = select_schemas(snapshot, opts)?;
    let rendered: BTreeSet<&str> = schemas.iter().map(|schema| schema.name.as_str()).collect();
    let mapper = TypeMapper::new(snapshot, rendered, &opts.type_overrides);

    let mut files = Vec::new();
    let mut modules = Vec::with_capacity(schemas.len());

    for schema in schemas {
        let module = field_ident(&schema.name, "schema")?;
        let marker = type_ident(&schema.name, "schema")?;
        let dir = PathBuf::from(bare(&module));

        let relations = plan_relations(schema, opts)?;
        let enums: Vec<&EnumType> = snapshot.enums_in(&schema.name).collect();
        let composites: Vec<&CompositeType> = snapshot.composite_types_in(&schema.name).collect();
        check_type_names(&marker, &relations, &enums, &composites)?;

        for relation in &relations {
            files.push(GeneratedFile {
                path: dir.join(format!("{}.rs", bare(&relation.module))),
                contents: render_relation(&mapper, &schema.name, &marker, relation)?,
            });
        }
        files.push(GeneratedFile {
            path: dir.join("mod.rs"),
            contents: render_schema_module(
                &mapper,
                &schema.name,
                &marker,
                &relations,
                &enums,
                &composites,
            )?,
        });

        tracing::debug!(
            schema = %schema.name,
            relations = relations.len(),
            enums = enums.len(),
            composite_types = composites.len(),
            "rendered schema"
        );
        modules.push((module, marker));
    }

    files.push(GeneratedFile {
        path: PathBuf::from("mod.rs"),
        contents: render_root(&modules, &opts.postgrest_version)?,
    });

    Ok(files)
}

fn select_schemas<'a>(
    snapshot: &'a DatabaseSchema,
    opts: &RenderOptions,
) -> CodegenResult<Vec<&'a Schema>> {
    if opts.schemas.is_empty() {
        return Ok(snapshot.schemas.iter().collect());
    }

    let mut selected = Vec::with_capacity(opts.schemas.len());
    for name in &opts.schemas {
        let schema = snapshot.find_schema(name).ok_or_else(|| {
            CodegenError::Unsupported(format!("schema `{name}` is not in the snapshot"))
        })?;
        selected.push(schema);
    }
    selected.sort_by(|left, right| left.name.cmp(&right.name));
    selected.dedup_by(|left, right| left.name == right.name);

    Ok(selected)
}

fn bare(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// A relation resolved to identifiers, ready to print.
struct RelationPlan<'a> {
    table: &'a Table,
    module: String,
    marker: String,
    writable: bool,
    columns: Vec<(&'a Column, String)>,
    relationships: Vec<&'a ForeignKey>,
}

fn plan_relations<'a>(
    schema: &'a Schema,
    opts: &RenderOptions,
) -> CodegenResult<Vec<RelationPlan<'a>>> {
    let mut plans = Vec::with_capacity(schema.tables.len());
    // `mod.rs` belongs to the schema module itself.
    let mut modules = BTreeSet::from(["mod".to_string()]);

    for table in &schema.tables {
        let writable = match &table.kind {
            TableKind::Table | TableKind::PartitionedTable | TableKind::ForeignTable => true,
            TableKind::View | TableKind::MaterializedView if opts.include_views => false,
            TableKind::View | TableKind::MaterializedView => continue,
            TableKind::Other(kind) => {
                tracing::warn!(
                    relation = %table.name,
                    kind = %kind,
                    "skipping unknown relation kind"
                );
                continue;
            }
        };

        let module = field_ident(&table.name, "relation")?;
        if !modules.insert(bare(&module).to_string()) {
            return Err(CodegenError::Unsupported(format!(
                "`{}.{}` maps to module `{module}`, which is already taken",
                schema.name, table.name
            )));
        }

        let mut columns = Vec::with_capacity(table.columns.len());
        let mut fields = BTreeSet::new();
        for column in &table.columns {
            let ident = field_ident(&column.name, "column")?;
            if !fields.insert(bare(&ident).to_string()) {
                return Err(CodegenError::Unsupported(format!(
                    "columns of `{}.{}` collide on field `{ident}`",
                    schema.name, table.name
                )));
            }
            columns.push((column, ident));
        }
        columns.sort_by(|left, right| left.0.name.cmp(&right.0.name));

        // Cross-schema references have no generated counterpart.
        let relationships = table
            .foreign_keys()
            .filter(|fk| fk.referenced_schema == schema.name && fk.name.is_some())
            .collect();

        plans.push(RelationPlan {
            table,
            module,
            marker: type_ident(&table.name, "relation")?,
            writable,
            columns,
            relationships,
        });
    }

    plans.sort_by(|left, right| left.table.name.cmp(&right.table.name));
    Ok(plans)
}

fn check_type_names(
    schema_marker: &str,
    relations: &[RelationPlan<'_>],
    enums: &[&EnumType],
    composites: &[&CompositeType],
) -> CodegenResult<()> {
    let mut seen = BTreeSet::from([schema_marker.to_string()]);
    let mut names = Vec::new();
    for relation in relations {
        names.push((relation.marker.clone(), relation.table.name.as_str()));
    }
    for item in enums {
        names.push((type_ident(&item.name, "enum")?, item.name.as_str()));
    }
    for item in composites {
        names.push((
            type_ident(&item.name, "composite type")?,
            item.name.as_str(),
        ));
    }

    for (ident, original) in names {
        if TAKEN_TYPE_NAMES.contains(&bare(&ident)) || !seen.insert(ident.clone()) {
            return Err(CodegenError::Unsupported(format!(
                "`{original}` maps to type name `{ident}`, which is already taken"
            )));
        }
    }

    Ok(())
}

fn render_relation(
    mapper: &TypeMapper<'_>,
    schema: &str,
    schema_marker: &str,
    relation: &RelationPlan<'_>,
) -> CodegenResult<String> {
    let table = relation.table;
    let qualified = format!("{schema}.{}", table.name);
    let marker = &relation.marker;

    let mut imports = Imports::default();
    let mut types = Vec::with_capacity(relation.columns.len());
    for (column, _) in &relation.columns {
        let key = format!("{qualified}.{}", column.name);
        let scope = Scope::Relation { schema };
        types.push(mapper.column_type(&key, &column.column_type, scope, &mut imports)?);
    }
    imports.add("serde", "Deserialize");
    imports.add("serde", "Serialize");
    for item in ["ColumnDef", "RelationDef", "RelationKind", "RelationshipDef"] {
        imports.add("crate::meta", item);
    }
    imports.add("crate::relation", "Relation");
    if relation.writable {
        imports.add("crate::relation", "Table");
    }
    imports.add("super", schema_marker);

    let fields: Vec<(&Column, &str, &str)> = relation
        .columns
        .iter()
        .zip(&types)
        .map(|((column, ident), ty)| (*column, ident.as_str(), ty.as_str()))
        .collect();

    let kind = if relation.writable { "table" } else { "view" };
    let mut out = String::new();
    writeln!(
        out,
        "//! `{qualified}` {kind}.\n//!\n//! {GENERATED_NOTE}\n"
    )?;
    out.push_str(&imports.render());
    out.push('\n');

    writeln!(out, "/// Marker for `{qualified}`.")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub struct {marker};\n")?;

    writeln!(out, "/// A `{qualified}` record as read.")?;
    writeln!(
        out,
        "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]"
    )?;
    writeln!(out, "pub struct Row {{")?;
    for &(column, ident, ty) in &fields {
        write_rename(&mut out, ident, &column.name)?;
        if column.is_nullable {
            writeln!(out, "    pub {ident}: Option<{ty}>,")?;
        } else {
            writeln!(out, "    pub {ident}: {ty},")?;
        }
    }
    writeln!(out, "}}\n")?;

    if relation.writable {
        let writes: Vec<(&Column, &str, &str)> = fields
            .iter()
            .copied()
            .filter(|(column, _, _)| column.accepts_writes())
            .collect();
        write_insert(&mut out, &qualified, &writes)?;
        write_update(&mut out, &qualified, &writes)?;
    }

    writeln!(out, "pub const COLUMNS: &[ColumnDef] = &[")?;
    for &(column, _, _) in &fields {
        write_column_def(
            &mut out,
            "    ",
            &column.name,
            &column.column_type.udt_name,
            column.is_nullable,
            column.has_default(),
        )?;
    }
    writeln!(out, "];\n")?;

    if relation.relationships.is_empty() {
        writeln!(out, "pub const RELATIONSHIPS: &[RelationshipDef] = &[];\n")?;
    } else {
        writeln!(out, "pub const RELATIONSHIPS: &[RelationshipDef] = &[")?;
        for fk in &relation.relationships {
            writeln!(out, "    RelationshipDef {{")?;
            writeln!(
                out,
                "        foreign_key_name: {:?},",
                fk.name.as_deref().unwrap_or_default()
            )?;
            writeln!(out, "        columns: {},", str_slice(&fk.columns))?;
            writeln!(out, "        is_one_to_one: {},", fk.is_one_to_one)?;
            writeln!(
                out,
                "        referenced_relation: {:?},",
                fk.referenced_table
            )?;
            writeln!(
                out,
                "        referenced_columns: {},",
                str_slice(&fk.referenced_columns)
            )?;
            writeln!(out, "    }},")?;
        }
        writeln!(out, "];\n")?;
    }

    let relation_kind = if relation.writable { "Table" } else { "View" };
    writeln!(out, "pub const DEF: RelationDef = RelationDef {{")?;
    writeln!(out, "    schema: {schema:?},")?;
    writeln!(out, "    name: {:?},", table.name)?;
    writeln!(out, "    kind: RelationKind::{relation_kind},")?;
    writeln!(out, "    columns: COLUMNS,")?;
    writeln!(out, "    relationships: RELATIONSHIPS,")?;
    writeln!(out, "}};\n")?;

    writeln!(out, "impl Relation for {marker} {{")?;
    writeln!(out, "    type Schema = {schema_marker};")?;
    writeln!(out, "    type Row = Row;\n")?;
    writeln!(out, "    const DEF: RelationDef = DEF;")?;
    writeln!(out, "}}")?;

    if relation.writable {
        writeln!(out, "\nimpl Table for {marker} {{")?;
        writeln!(out, "    type Insert = Insert;")?;
        writeln!(out, "    type Update = Update;")?;
        writeln!(out, "}}")?;
    }

    Ok(out)
}

fn write_insert(
    out: &mut String,
    qualified: &str,
    fields: &[(&Column, &str, &str)],
) -> CodegenResult<()> {
    let required: Vec<(&str, &str)> = fields
        .iter()
        .filter(|(column, _, _)| !column.insert_optional())
        .map(|&(_, ident, ty)| (ident, ty))
        .collect();

    writeln!(out, "/// Payload for inserting into `{qualified}`.")?;
    let derives = if required.is_empty() {
        "Debug, Clone, Default, PartialEq, Serialize, Deserialize"
    } else {
        "Debug, Clone, PartialEq, Serialize, Deserialize"
    };
    writeln!(out, "#[derive({derives})]")?;
    writeln!(out, "pub struct Insert {{")?;
    for &(column, ident, ty) in fields {
        write_rename(out, ident, &column.name)?;
        if !column.insert_optional() {
            writeln!(out, "    pub {ident}: {ty},")?;
        } else if column.is_nullable {
            // Omitted lets the server default apply; `Some(None)` sends null.
            out.push_str(NULLABLE_PATCH);
            writeln!(out, "    pub {ident}: Option<Option<{ty}>>,")?;
        } else {
            out.push_str(SKIP_NONE);
            writeln!(out, "    pub {ident}: Option<{ty}>,")?;
        }
    }
    writeln!(out, "}}\n")?;

    if required.is_empty() {
        return Ok(());
    }

    writeln!(out, "impl Insert {{")?;
    writeln!(
        out,
        "    /// Builds a payload from the required columns, leaving the rest unset."
    )?;
    if required.len() > 7 {
        writeln!(out, "    #[allow(clippy::too_many_arguments)]")?;
    }
    let params: Vec<String> = required
        .iter()
        .map(|(ident, ty)| format!("{ident}: {ty}"))
        .collect();
    let signature = format!("    pub fn new({}) -> Self {{", params.join(", "));
    if signature.len() > 100 {
        writeln!(out, "    pub fn new(")?;
        for param in &params {
            writeln!(out, "        {param},")?;
        }
        writeln!(out, "    ) -> Self {{")?;
    } else {
        writeln!(out, "{signature}")?;
    }
    writeln!(out, "        Self {{")?;
    for &(column, ident, _) in fields {
        if column.insert_optional() {
            writeln!(out, "            {ident}: None,")?;
        } else {
            writeln!(out, "            {ident},")?;
        }
    }
    writeln!(out, "        }}\n    }}\n}}\n")?;

    Ok(())
}

fn write_update(
    out: &mut String,
    qualified: &str,
    fields: &[(&Column, &str, &str)],
) -> CodegenResult<()> {
    writeln!(out, "/// Partial update of `{qualified}`.")?;
    writeln!(
        out,
        "#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]"
    )?;
    writeln!(out, "pub struct Update {{")?;
    for &(column, ident, ty) in fields {
        write_rename(out, ident, &column.name)?;
        if column.is_nullable {
            out.push_str(NULLABLE_PATCH);
            writeln!(out, "    pub {ident}: Option<Option<{ty}>>,")?;
        } else {
            out.push_str(SKIP_NONE);
            writeln!(out, "    pub {ident}: Option<{ty}>,")?;
        }
    }
    writeln!(out, "}}\n")?;

    Ok(())
}

fn write_rename(out: &mut String, ident: &str, name: &str) -> CodegenResult<()> {
    if let Some(name) = serde_rename(ident, name) {
        writeln!(out, "    #[serde(rename = {name:?})]")?;
    }
    Ok(())
}

fn write_column_def(
    out: &mut String,
    indent: &str,
    name: &str,
    pg_type: &str,
    nullable: bool,
    has_default: bool,
) -> CodegenResult<()> {
    writeln!(out, "{indent}ColumnDef {{")?;
    writeln!(out, "{indent}    name: {name:?},")?;
    writeln!(out, "{indent}    pg_type: {pg_type:?},")?;
    writeln!(out, "{indent}    nullable: {nullable},")?;
    writeln!(out, "{indent}    has_default: {has_default},")?;
    writeln!(out, "{indent}}},")?;
    Ok(())
}

fn str_slice(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("{item:?}")).collect();
    format!("&[{}]", quoted.join(", "))
}

fn render_schema_module(
    mapper: &TypeMapper<'_>,
    schema: &str,
    marker: &str,
    relations: &[RelationPlan<'_>],
    enums: &[&EnumType],
    composites: &[&CompositeType],
) -> CodegenResult<String> {
    let mut imports = Imports::default();
    for item in ["CompositeDef", "EnumDef", "RelationDef", "SchemaDef"] {
        imports.add("crate::meta", item);
    }
    imports.add("crate::relation", "Schema");
    if !enums.is_empty() {
        imports.add("crate::relation", "PgEnum");
    }
    if !composites.is_empty() {
        imports.add("crate::meta", "ColumnDef");
        imports.add("crate::relation", "CompositeType");
    }
    if !enums.is_empty() || !composites.is_empty() {
        imports.add("serde", "Deserialize");
        imports.add("serde", "Serialize");
    }

    let mut items = String::new();
    let mut enum_idents = Vec::with_capacity(enums.len());
    for item in enums {
        let ident = type_ident(&item.name, "enum")?;
        write_enum(&mut items, schema, marker, &ident, item)?;
        enum_idents.push(ident);
    }
    let mut composite_idents = Vec::with_capacity(composites.len());
    for item in composites {
        let ident = type_ident(&item.name, "composite type")?;
        write_composite(
            &mut items,
            mapper,
            schema,
            marker,
            &ident,
            item,
            &mut imports,
        )?;
        composite_idents.push(ident);
    }

    let mut out = String::new();
    writeln!(out, "//! `{schema}` schema.\n//!\n//! {GENERATED_NOTE}\n")?;
    out.push_str(&imports.render());
    out.push('\n');

    if !relations.is_empty() {
        for relation in relations {
            writeln!(out, "pub mod {};", relation.module)?;
        }
        out.push('\n');
        for relation in relations {
            writeln!(out, "pub use {}::{};", relation.module, relation.marker)?;
        }
        out.push('\n');
    }

    writeln!(out, "/// Marker for the `{schema}` schema.")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub struct {marker};\n")?;

    let relation_defs: Vec<String> = relations
        .iter()
        .map(|relation| format!("{}::DEF", relation.module))
        .collect();
    let enum_defs: Vec<String> = enum_idents
        .iter()
        .map(|ident| format!("<{ident} as PgEnum>::DEF"))
        .collect();
    let composite_defs: Vec<String> = composite_idents
        .iter()
        .map(|ident| format!("<{ident} as CompositeType>::DEF"))
        .collect();
    write_def_list(&mut out, "RELATIONS", "RelationDef", &relation_defs)?;
    write_def_list(&mut out, "ENUMS", "EnumDef", &enum_defs)?;
    write_def_list(&mut out, "COMPOSITE_TYPES", "CompositeDef", &composite_defs)?;

    writeln!(out, "pub const DEF: SchemaDef = SchemaDef {{")?;
    writeln!(out, "    name: {schema:?},")?;
    writeln!(out, "    relations: RELATIONS,")?;
    writeln!(out, "    enums: ENUMS,")?;
    writeln!(out, "    composite_types: COMPOSITE_TYPES,")?;
    writeln!(out, "}};\n")?;

    writeln!(out, "impl Schema for {marker} {{")?;
    writeln!(out, "    const DEF: SchemaDef = DEF;")?;
    writeln!(out, "}}")?;
    out.push_str(&items);

    Ok(out)
}

fn write_def_list(out: &mut String, name: &str, ty: &str, entries: &[String]) -> CodegenResult<()> {
    if entries.is_empty() {
        writeln!(out, "pub const {name}: &[{ty}] = &[];\n")?;
        return Ok(());
    }
    writeln!(out, "pub const {name}: &[{ty}] = &[")?;
    for entry in entries {
        writeln!(out, "    {entry},")?;
    }
    writeln!(out, "];\n")?;
    Ok(())
}

fn write_enum(
    out: &mut String,
    schema: &str,
    marker: &str,
    ident: &str,
    item: &EnumType,
) -> CodegenResult<()> {
    let mut variants = Vec::with_capacity(item.labels.len());
    let mut seen = BTreeSet::new();
    for label in &item.labels {
        let variant = variant_ident(label)?;
        if !seen.insert(variant.clone()) {
            return Err(CodegenError::Unsupported(format!(
                "labels of `{schema}.{}` collide on variant `{variant}`",
                item.name
            )));
        }
        variants.push((label.as_str(), variant));
    }

    writeln!(out, "\n/// `{schema}.{}` enum.", item.name)?;
    writeln!(
        out,
        "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]"
    )?;
    writeln!(out, "pub enum {ident} {{")?;
    for (label, variant) in &variants {
        writeln!(out, "    #[serde(rename = {label:?})]")?;
        writeln!(out, "    {variant},")?;
    }
    writeln!(out, "}}\n")?;

    writeln!(out, "impl PgEnum for {ident} {{")?;
    writeln!(out, "    type Schema = {marker};")?;
    writeln!(out, "    type Value = {ident};\n")?;
    writeln!(out, "    const DEF: EnumDef = EnumDef {{")?;
    writeln!(out, "        schema: {schema:?},")?;
    writeln!(out, "        name: {:?},", item.name)?;
    writeln!(out, "        labels: {},", str_slice(&item.labels))?;
    writeln!(out, "    }};\n")?;

    writeln!(out, "    fn label(value: &Self::Value) -> &'static str {{")?;
    if variants.is_empty() {
        writeln!(out, "        match *value {{}}")?;
    } else {
        writeln!(out, "        match value {{")?;
        for (label, variant) in &variants {
            writeln!(out, "            {ident}::{variant} => {label:?},")?;
        }
        writeln!(out, "        }}")?;
    }
    writeln!(out, "    }}\n")?;

    writeln!(
        out,
        "    fn from_label(label: &str) -> Option<Self::Value> {{"
    )?;
    writeln!(out, "        match label {{")?;
    for (label, variant) in &variants {
        writeln!(out, "            {label:?} => Some({ident}::{variant}),")?;
    }
    writeln!(out, "            _ => None,")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    Ok(())
}

fn write_composite(
    out: &mut String,
    mapper: &TypeMapper<'_>,
    schema: &str,
    marker: &str,
    ident: &str,
    item: &CompositeType,
    imports: &mut Imports,
) -> CodegenResult<()> {
    let qualified = format!("{schema}.{}", item.name);

    writeln!(out, "\n/// `{qualified}` composite type.")?;
    writeln!(
        out,
        "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]"
    )?;
    writeln!(out, "pub struct {ident} {{")?;
    let mut fields = BTreeSet::new();
    for attribute in &item.attributes {
        let field = field_ident(&attribute.name, "attribute")?;
        if !fields.insert(bare(&field).to_string()) {
            return Err(CodegenError::Unsupported(format!(
                "attributes of `{qualified}` collide on field `{field}`"
            )));
        }
        let key = format!("{qualified}.{}", attribute.name);
        let scope = Scope::SchemaModule { schema };
        let ty = mapper.column_type(&key, &attribute.attribute_type, scope, imports)?;
        write_rename(out, &field, &attribute.name)?;
        writeln!(out, "    pub {field}: Option<{ty}>,")?;
    }
    writeln!(out, "}}\n")?;

    writeln!(out, "impl CompositeType for {ident} {{")?;
    writeln!(out, "    type Schema = {marker};")?;
    writeln!(out, "    type Value = {ident};\n")?;
    writeln!(out, "    const DEF: CompositeDef = CompositeDef {{")?;
    writeln!(out, "        schema: {schema:?},")?;
    writeln!(out, "        name: {:?},", item.name)?;
    writeln!(out, "        attributes: &[")?;
    for attribute in &item.attributes {
        write_column_def(
            out,
            "            ",
            &attribute.name,
            &attribute.attribute_type.udt_name,
            true,
            false,
        )?;
    }
    writeln!(out, "        ],")?;
    writeln!(out, "    }};")?;
    writeln!(out, "}}")?;

    Ok(())
}

fn render_root(modules: &[(String, String)], postgrest_version: &str) -> CodegenResult<String> {
    let mut out = String::new();
    writeln!(out, "//! {GENERATED_NOTE}\n")?;
    writeln!(out, "use crate::meta::SchemaDef;\n")?;

    if !modules.is_empty() {
        for (module, _) in modules {
            writeln!(out, "pub mod {module};")?;
        }
        out.push('\n');
        for (module, marker) in modules {
            writeln!(out, "pub use {module}::{marker};")?;
        }
        out.push('\n');
    }

    writeln!(
        out,
        "/// PostgREST API version the mirror was generated for."
    )?;
    writeln!(
        out,
        "pub const POSTGREST_VERSION: &str = {postgrest_version:?};\n"
    )?;

    let defs: Vec<String> = modules
        .iter()
        .map(|(module, _)| format!("{module}::DEF"))
        .collect();
    writeln!(
        out,
        "pub const SCHEMAS: &[SchemaDef] = &[{}];",
        defs.join(", ")
    )?;

    Ok(out)
}
