//! `public` schema.
//!
//! Generated by `learnpath-schema generate`. Do not edit by hand.

use crate::meta::{CompositeDef, EnumDef, RelationDef, SchemaDef};
use crate::relation::Schema;

pub mod daily_learning_tasks;
pub mod learning_paths;
pub mod profiles;
pub mod project_recommendations;

pub use daily_learning_tasks::DailyLearningTasks;
pub use learning_paths::LearningPaths;
pub use profiles::Profiles;
pub use project_recommendations::ProjectRecommendations;

/// Marker for the `public` schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Public;

pub const RELATIONS: &[RelationDef] = &[
    daily_learning_tasks::DEF,
    learning_paths::DEF,
    profiles::DEF,
    project_recommendations::DEF,
];

pub const ENUMS: &[EnumDef] = &[];

pub const COMPOSITE_TYPES: &[CompositeDef] = &[];

pub const DEF: SchemaDef = SchemaDef {
    name: "public",
    relations: RELATIONS,
    enums: ENUMS,
    composite_types: COMPOSITE_TYPES,
};

impl Schema for Public {
    const DEF: SchemaDef = DEF;
}
