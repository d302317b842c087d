//! `public.learning_paths` table.
//!
//! Generated by `learnpath-schema generate`. Do not edit by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meta::{ColumnDef, RelationDef, RelationKind, RelationshipDef};
use crate::relation::{Relation, Table};

use super::Public;

/// Marker for `public.learning_paths`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LearningPaths;

/// A `public.learning_paths` record as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub daily_time_minutes: i32,
    pub description: String,
    pub duration_days: i32,
    pub experience_level: String,
    pub id: Uuid,
    pub include_exercises: Option<bool>,
    pub include_projects: Option<bool>,
    pub learning_style: String,
    pub notes: Option<String>,
    pub output_goal: String,
    pub started_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub topic: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
}

/// Payload for inserting into `public.learning_paths`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub daily_time_minutes: i32,
    pub description: String,
    pub duration_days: i32,
    pub experience_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_exercises: Option<Option<bool>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_projects: Option<Option<bool>>,
    pub learning_style: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    pub output_goal: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Option<String>>,
    pub topic: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Option<DateTime<Utc>>>,
    pub user_id: Uuid,
}

impl Insert {
    /// Builds a payload from the required columns, leaving the rest unset.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        daily_time_minutes: i32,
        description: String,
        duration_days: i32,
        experience_level: String,
        learning_style: String,
        output_goal: String,
        topic: String,
        user_id: Uuid,
    ) -> Self {
        Self {
            completed_at: None,
            created_at: None,
            daily_time_minutes,
            description,
            duration_days,
            experience_level,
            id: None,
            include_exercises: None,
            include_projects: None,
            learning_style,
            notes: None,
            output_goal,
            started_at: None,
            status: None,
            topic,
            updated_at: None,
            user_id,
        }
    }
}

/// Partial update of `public.learning_paths`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_time_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_exercises: Option<Option<bool>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_projects: Option<Option<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_goal: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "completed_at",
        pg_type: "timestamptz",
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
        name: "daily_time_minutes",
        pg_type: "int4",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "description",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "duration_days",
        pg_type: "int4",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "experience_level",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "id",
        pg_type: "uuid",
        nullable: false,
        has_default: true,
    },
    ColumnDef {
        name: "include_exercises",
        pg_type: "bool",
        nullable: true,
        has_default: true,
    },
    ColumnDef {
        name: "include_projects",
        pg_type: "bool",
        nullable: true,
        has_default: true,
    },
    ColumnDef {
        name: "learning_style",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "notes",
        pg_type: "text",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "output_goal",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "started_at",
        pg_type: "timestamptz",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "status",
        pg_type: "text",
        nullable: true,
        has_default: true,
    },
    ColumnDef {
        name: "topic",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "updated_at",
        pg_type: "timestamptz",
        nullable: true,
        has_default: true,
    },
    ColumnDef {
        name: "user_id",
        pg_type: "uuid",
        nullable: false,
        has_default: false,
    },
];

pub const RELATIONSHIPS: &[RelationshipDef] = &[
    RelationshipDef {
        foreign_key_name: "learning_paths_user_id_fkey",
        columns: &["user_id"],
        is_one_to_one: false,
        referenced_relation: "profiles",
        referenced_columns: &["id"],
    },
];

pub const DEF: RelationDef = RelationDef {
    schema: "public",
    name: "learning_paths",
    kind: RelationKind::Table,
    columns: COLUMNS,
    relationships: RELATIONSHIPS,
};

impl Relation for LearningPaths {
    type Schema = Public;
    type Row = Row;

    const DEF: RelationDef = DEF;
}

impl Table for LearningPaths {
    type Insert = Insert;
    type Update = Update;
}
