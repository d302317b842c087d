//! `public.daily_learning_tasks` table.
//!
//! Generated by `learnpath-schema generate`. Do not edit by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meta::{ColumnDef, RelationDef, RelationKind, RelationshipDef};
use crate::relation::{Relation, Table};

use super::Public;

/// Marker for `public.daily_learning_tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyLearningTasks;

/// A `public.daily_learning_tasks` record as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub day_number: i32,
    pub exercise: Option<String>,
    pub id: Uuid,
    pub learning_path_id: Uuid,
    pub main_topic: String,
    pub material_title: Option<String>,
    pub material_url: Option<String>,
    pub status: Option<String>,
    pub sub_topic: String,
    pub time_spent_minutes: Option<i32>,
}

/// Payload for inserting into `public.daily_learning_tasks`.
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
    pub day_number: i32,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub exercise: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub learning_path_id: Uuid,
    pub main_topic: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Option<String>>,
    pub sub_topic: String,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_spent_minutes: Option<Option<i32>>,
}

impl Insert {
    /// Builds a payload from the required columns, leaving the rest unset.
    pub fn new(
        day_number: i32,
        learning_path_id: Uuid,
        main_topic: String,
        sub_topic: String,
    ) -> Self {
        Self {
            completed_at: None,
            created_at: None,
            day_number,
            exercise: None,
            id: None,
            learning_path_id,
            main_topic,
            material_title: None,
            material_url: None,
            status: None,
            sub_topic,
            time_spent_minutes: None,
        }
    }
}

/// Partial update of `public.daily_learning_tasks`.
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
    pub day_number: Option<i32>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub exercise: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_path_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_topic: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::patch::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_spent_minutes: Option<Option<i32>>,
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
        name: "day_number",
        pg_type: "int4",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "exercise",
        pg_type: "text",
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
        name: "main_topic",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "material_title",
        pg_type: "text",
        nullable: true,
        has_default: false,
    },
    ColumnDef {
        name: "material_url",
        pg_type: "text",
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
        name: "sub_topic",
        pg_type: "text",
        nullable: false,
        has_default: false,
    },
    ColumnDef {
        name: "time_spent_minutes",
        pg_type: "int4",
        nullable: true,
        has_default: true,
    },
];

pub const RELATIONSHIPS: &[RelationshipDef] = &[
    RelationshipDef {
        foreign_key_name: "daily_learning_tasks_learning_path_id_fkey",
        columns: &["learning_path_id"],
        is_one_to_one: false,
        referenced_relation: "learning_paths",
        referenced_columns: &["id"],
    },
];

pub const DEF: RelationDef = RelationDef {
    schema: "public",
    name: "daily_learning_tasks",
    kind: RelationKind::Table,
    columns: COLUMNS,
    relationships: RELATIONSHIPS,
};

impl Relation for DailyLearningTasks {
    type Schema = Public;
    type Row = Row;

    const DEF: RelationDef = DEF;
}

impl Table for DailyLearningTasks {
    type Insert = Insert;
    type Update = Update;
}
