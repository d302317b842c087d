//! Decoding of single-letter `pg_catalog` codes.

use learnpath_core::{FkAction, FkMatchType, IdentityGeneration, TableKind};

pub fn relkind_to_table_kind(relkind: i8) -> TableKind {
    match relkind as u8 {
        b'r' => TableKind::Table,
        b'p' => TableKind::PartitionedTable,
        b'v' => TableKind::View,
        b'm' => TableKind::MaterializedView,
        b'f' => TableKind::ForeignTable,
        other => TableKind::Other((other as char).to_string()),
    }
}

pub fn fk_action_from_code(code: i8) -> FkAction {
    match code as u8 {
        b'a' => FkAction::NoAction,
        b'r' => FkAction::Restrict,
        b'c' => FkAction::Cascade,
        b'n' => FkAction::SetNull,
        b'd' => FkAction::SetDefault,
        _ => FkAction::Unknown,
    }
}

pub fn fk_match_from_code(code: i8) -> FkMatchType {
    match code as u8 {
        b'f' => FkMatchType::Full,
        b'p' => FkMatchType::Partial,
        b's' => FkMatchType::Simple,
        _ => FkMatchType::Unknown,
    }
}

pub fn identity_from_text(value: Option<String>) -> Option<IdentityGeneration> {
    match value.as_deref() {
        Some("ALWAYS") => Some(IdentityGeneration::Always),
        Some("BY DEFAULT") => Some(IdentityGeneration::ByDefault),
        _ => None,
    }
}

pub fn is_primary_key(contype: i8) -> bool {
    contype as u8 == b'p'
}
