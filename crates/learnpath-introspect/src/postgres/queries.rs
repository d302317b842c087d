use sqlx::{FromRow, PgPool};

use learnpath_core::{Error, Result};

fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

pub async fn fetch_database_name(pool: &PgPool) -> Result<String> {
    sqlx::query_scalar::<_, String>("select current_database()::text")
        .fetch_one(pool)
        .await
        .map_err(db_error)
}

pub async fn list_schemas(pool: &PgPool) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>("select nspname::text from pg_namespace order by nspname")
        .fetch_all(pool)
        .await
        .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawTable {
    pub name: String,
    pub relkind: i8,
    pub comment: Option<String>,
}

pub async fn list_tables_in_schema(pool: &PgPool, schema: &str) -> Result<Vec<RawTable>> {
    sqlx::query_as::<_, RawTable>(
        r#"
        select
          c.relname::text as name,
          c.relkind as relkind,
          pg_catalog.obj_description(c.oid, 'pg_class') as comment
        from pg_class c
        join pg_namespace n on n.oid = c.relnamespace
        where n.nspname = $1
          and c.relkind in ('r','p','v','m','f')
        order by c.relname
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawColumn {
    pub ordinal_position: i16,
    pub name: String,
    pub data_type: String,
    pub udt_schema: String,
    pub udt_name: String,
    pub is_nullable: bool,
    pub default: Option<String>,
    pub identity_generation: Option<String>,
    pub is_generated: bool,
    pub generation_expression: Option<String>,
    pub character_max_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub collation: Option<String>,
    pub comment: Option<String>,
}

pub async fn list_columns(pool: &PgPool, schema: &str, table: &str) -> Result<Vec<RawColumn>> {
    sqlx::query_as::<_, RawColumn>(
        r#"
        select
          a.attnum as ordinal_position,
          a.attname::text as name,
          pg_catalog.format_type(a.atttypid, a.atttypmod) as data_type,
          tn.nspname::text as udt_schema,
          t.typname::text as udt_name,
          (not a.attnotnull) as is_nullable,
          case
            when a.attgenerated = '' then pg_get_expr(ad.adbin, ad.adrelid)
            else null
          end as "default",
          case a.attidentity
            when 'a' then 'ALWAYS'
            when 'd' then 'BY DEFAULT'
            else null
          end as identity_generation,
          (a.attgenerated <> '') as is_generated,
          case
            when a.attgenerated <> '' then pg_get_expr(ad.adbin, ad.adrelid)
            else null
          end as generation_expression,
          ic.character_maximum_length::int4 as character_max_length,
          ic.numeric_precision::int4 as numeric_precision,
          ic.numeric_scale::int4 as numeric_scale,
          ic.collation_name::text as collation,
          pg_catalog.col_description(a.attrelid, a.attnum) as comment
        from pg_attribute a
        join pg_class c on c.oid = a.attrelid
        join pg_namespace n on n.oid = c.relnamespace
        join pg_type t on t.oid = a.atttypid
        join pg_namespace tn on tn.oid = t.typnamespace
        left join pg_attrdef ad on ad.adrelid = a.attrelid and ad.adnum = a.attnum
        left join information_schema.columns ic
          on ic.table_schema = n.nspname
         and ic.table_name = c.relname
         and ic.column_name = a.attname
        where n.nspname = $1
          and c.relname = $2
          and a.attnum > 0
          and not a.attisdropped
        order by a.attnum
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

/// A key-like constraint (`p` or `u`) with its ordered columns.
#[derive(Debug, FromRow)]
pub struct RawKeyConstraint {
    pub name: String,
    pub contype: i8,
    pub columns: Vec<String>,
    pub is_deferrable: bool,
    pub initially_deferred: bool,
}

pub async fn list_key_constraints(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawKeyConstraint>> {
    sqlx::query_as::<_, RawKeyConstraint>(
        r#"
        select
          con.conname::text as name,
          con.contype as contype,
          array_agg(att.attname::text order by ord.ordinality) as columns,
          con.condeferrable as is_deferrable,
          con.condeferred as initially_deferred
        from pg_constraint con
        join pg_class rel on rel.oid = con.conrelid
        join pg_namespace nsp on nsp.oid = rel.relnamespace
        join unnest(con.conkey) with ordinality as ord(attnum, ordinality) on true
        join pg_attribute att on att.attrelid = rel.oid and att.attnum = ord.attnum
        where nsp.nspname = $1
          and rel.relname = $2
          and con.contype in ('p', 'u')
        group by con.conname, con.contype, con.condeferrable, con.condeferred
        order by con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawCheckConstraint {
    pub name: String,
    pub expression: String,
}

pub async fn list_check_constraints(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawCheckConstraint>> {
    sqlx::query_as::<_, RawCheckConstraint>(
        r#"
        select
          con.conname::text as name,
          pg_get_constraintdef(con.oid, true) as expression
        from pg_constraint con
        join pg_class rel on rel.oid = con.conrelid
        join pg_namespace nsp on nsp.oid = rel.relnamespace
        where nsp.nspname = $1
          and rel.relname = $2
          and con.contype = 'c'
        order by con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_schema: String,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub on_update_code: i8,
    pub on_delete_code: i8,
    pub match_type_code: i8,
    pub is_deferrable: bool,
    pub initially_deferred: bool,
}

pub async fn list_foreign_keys(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawForeignKey>> {
    // Unnesting both key arrays in one `rows from` keeps local and referenced
    // columns paired by position.
    sqlx::query_as::<_, RawForeignKey>(
        r#"
        select
          con.conname::text as name,
          array_agg(src_att.attname::text order by k.ordinality) as columns,
          ref_nsp.nspname::text as referenced_schema,
          ref_rel.relname::text as referenced_table,
          array_agg(ref_att.attname::text order by k.ordinality) as referenced_columns,
          con.confupdtype as on_update_code,
          con.confdeltype as on_delete_code,
          con.confmatchtype as match_type_code,
          con.condeferrable as is_deferrable,
          con.condeferred as initially_deferred
        from pg_constraint con
        join pg_class src_rel on src_rel.oid = con.conrelid
        join pg_namespace src_nsp on src_nsp.oid = src_rel.relnamespace
        join pg_class ref_rel on ref_rel.oid = con.confrelid
        join pg_namespace ref_nsp on ref_nsp.oid = ref_rel.relnamespace
        join rows from (unnest(con.conkey), unnest(con.confkey))
          with ordinality as k(src_attnum, ref_attnum, ordinality) on true
        join pg_attribute src_att
          on src_att.attrelid = src_rel.oid and src_att.attnum = k.src_attnum
        join pg_attribute ref_att
          on ref_att.attrelid = ref_rel.oid and ref_att.attnum = k.ref_attnum
        where src_nsp.nspname = $1
          and src_rel.relname = $2
          and con.contype = 'f'
        group by
          con.conname, ref_nsp.nspname, ref_rel.relname,
          con.confupdtype, con.confdeltype, con.confmatchtype,
          con.condeferrable, con.condeferred
        order by con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawIndex {
    pub name: String,
    pub is_unique: bool,
    pub is_primary: bool,
    pub is_valid: bool,
    pub method: String,
    pub definition: String,
}

pub async fn list_indexes(pool: &PgPool, schema: &str, table: &str) -> Result<Vec<RawIndex>> {
    sqlx::query_as::<_, RawIndex>(
        r#"
        select
          idx.relname::text as name,
          i.indisunique as is_unique,
          i.indisprimary as is_primary,
          i.indisvalid as is_valid,
          am.amname::text as method,
          pg_get_indexdef(i.indexrelid) as definition
        from pg_index i
        join pg_class tbl on tbl.oid = i.indrelid
        join pg_namespace nsp on nsp.oid = tbl.relnamespace
        join pg_class idx on idx.oid = i.indexrelid
        join pg_am am on am.oid = idx.relam
        where nsp.nspname = $1
          and tbl.relname = $2
        order by idx.relname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawEnumType {
    pub schema: String,
    pub name: String,
    pub labels: Vec<String>,
}

pub async fn list_enums(pool: &PgPool) -> Result<Vec<RawEnumType>> {
    sqlx::query_as::<_, RawEnumType>(
        r#"
        select
          n.nspname::text as schema,
          t.typname::text as name,
          array_agg(e.enumlabel::text order by e.enumsortorder) as labels
        from pg_type t
        join pg_namespace n on n.oid = t.typnamespace
        join pg_enum e on e.enumtypid = t.oid
        group by n.nspname, t.typname
        order by n.nspname, t.typname
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

/// One attribute of a composite type; rows arrive grouped by type.
#[derive(Debug, FromRow)]
pub struct RawCompositeAttribute {
    pub schema: String,
    pub name: String,
    pub attribute: String,
    pub data_type: String,
    pub udt_schema: String,
    pub udt_name: String,
}

pub async fn list_composite_attributes(pool: &PgPool) -> Result<Vec<RawCompositeAttribute>> {
    sqlx::query_as::<_, RawCompositeAttribute>(
        r#"
        select
          n.nspname::text as schema,
          t.typname::text as name,
          a.attname::text as attribute,
          pg_catalog.format_type(a.atttypid, a.atttypmod) as data_type,
          an.nspname::text as udt_schema,
          at.typname::text as udt_name
        from pg_type t
        join pg_namespace n on n.oid = t.typnamespace
        join pg_class c on c.oid = t.typrelid and c.relkind = 'c'
        join pg_attribute a on a.attrelid = c.oid and a.attnum > 0 and not a.attisdropped
        join pg_type at on at.oid = a.atttypid
        join pg_namespace an on an.oid = at.typnamespace
        where t.typtype = 'c'
        order by n.nspname, t.typname, a.attnum
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)
}
