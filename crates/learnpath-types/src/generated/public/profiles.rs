//! `public.profiles` table.
//!
//! Generated by `learnpath-schema generate`. Do not edit by hand.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meta::{ColumnDef, RelationDef, RelationKind, RelationshipDef};
use crate::relation::{Relation, Table};

use super::Public;

/// Marker for `public.profiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Profiles;

/// A `public.profiles` record as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub current_streak: Option<i32>,
    pub email: String,
    pub id: Uuid,
    pub last_active_date: Option<NaiveDate>,
    pub longest_streak: Option<i32>,
    pub name: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for inserting into `public.profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_streak: Option<Option<i32>>,
    pub email: String,
    pub id: Uuid,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_active_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub longest_streak: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Option<DateTime<Utc>>>,
}

impl Insert {
    /// Builds a payload from the required columns, leaving the rest unset.
    pub fn new(email: String, id: Uuid) -> Self {
        Self {
            avatar_url: None,
            created_at: None,
            current_streak: None,
            email,
            id,
            last_active_date: None,
            longest_streak: None,
            name: None,
            updated_at: None,
        }
    }
}

/// Partial update of `public.profiles`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_streak: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_active_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub longest_streak: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Option<DateTime<Utc>>>,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "avatar_url",
        pg_type: "text",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "created_at",
        pg_type: "timestamptz",
        nullable: false,
        has_default: true,
    },
    ColumnDef {
        name: "current_streak",
        pg_type: "int4",
        nullable: true,
        has_default: true,
    },
    ColumnDef {
        name: "email",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "id",
        pg_type: "uuid",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "last_active_date",
        pg_type: "date",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "longest_streak",
        pg_type: "int4",
        nullable: true,
        has_default: true,
    },
    ColumnDef {
        name: "name",
        pg_type: "text",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "updated_at",
        pg_type: "timestamptz",
        nullable: true,
        has_default: true,
    },
];

pub const RELATIONSHIPS: &[RelationshipDef] = &[];

pub const DEF: RelationDef = RelationDef {
    schema: "public",
    name: "profiles",
    kind: RelationKind::Table,
    columns: COLUMNS,
    relationships: RELATIONSHIPS,
};

impl Relation for Profiles {
    type Schema = Public;
    type Row = Row;

    const DEF: RelationDef = DEF;
}

impl Table for Profiles {
    type Insert = Insert;
    type Update = Update;
}
