//! `public.project_recommendations` table.
//!
//! Generated by `learnpath-schema generate`. Do not edit by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meta::{ColumnDef, RelationDef, RelationKind, RelationshipDef};
use crate::relation::{Relation, Table};

use super::Public;

/// Marker for `public.project_recommendations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectRecommendations;

/// A `public.project_recommendations` record as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub difficulty: Option<String>,
    pub estimated_hours: Option<i32>,
    pub id: Uuid,
    pub learning_path_id: Uuid,
    pub title: String,
    pub url: Option<String>,
}

/// Payload for inserting into `public.project_recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub description: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub learning_path_id: Uuid,
    pub title: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<Option<String>>,
}

impl Insert {
    /// Builds a payload from the required columns, leaving the rest unset.
    pub fn new(description: String, learning_path_id: Uuid, title: String) -> Self {
        Self {
            created_at: None,
            description,
            difficulty: None,
            estimated_hours: None,
            id: None,
            learning_path_id,
            title,
            url: None,
        }
    }
}

/// Partial update of `public.project_recommendations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_path_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<Option<String>>,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "created_at",
        pg_type: "timestamptz",
        nullable: false,
        has_default: true,
    },
    ColumnDef {
        name: "description",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "difficulty",
        pg_type: "text",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "estimated_hours",
        pg_type: "int4",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "id",
        pg_type: "uuid",
        nullable: false,
        has_default: true,
    },
    ColumnDef {
        name: "learning_path_id",
        pg_type: "uuid",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "title",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "url",
        pg_type: "text",
        nullable: true,
        has_default: false,
    },
];

pub const RELATIONSHIPS: &[RelationshipDef] = &[
    RelationshipDef {
        foreign_key_name: "project_recommendations_learning_path_id_fkey",
        columns: &["learning_path_id"],
        is_one_to_one: false,
        referenced_relation: "learning_paths",
        referenced_columns: &["id"],
    },
];

pub const DEF: RelationDef = RelationDef {
    schema: "public",
    name: "project_recommendations",
    kind: RelationKind::Table,
    columns: COLUMNS,
    relationships: RELATIONSHIPS,
};

impl Relation for ProjectRecommendations {
    type Schema = Public;
    type Row = Row;

    const DEF: RelationDef = DEF;
}

impl Table for ProjectRecommendations {
    type Insert = Insert;
    type Update = Update;
}
