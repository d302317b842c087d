//! Database names to Rust identifiers.

use crate::error::{CodegenError, CodegenResult};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "super", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Splits a name into lowercase words on `_`, spaces, dashes and camelCase humps.
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

pub fn snake_case(name: &str) -> String {
    words(name).join("_")
}

pub fn pascal_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

/// Escapes keywords with `r#` and rejects names that are not identifiers.
pub fn escape(ident: String, what: &'static str, original: &str) -> CodegenResult<String> {
    if !is_identifier(&ident) || RESERVED.contains(&ident.as_str()) {
        return Err(CodegenError::InvalidIdentifier {
            what,
            name: original.to_string(),
        });
    }
    if KEYWORDS.contains(&ident.as_str()) {
        Ok(format!("r#{ident}"))
    } else {
        Ok(ident)
    }
}

/// Field or module identifier for a column, table or schema name.
pub fn field_ident(name: &str, what: &'static str) -> CodegenResult<String> {
    escape(snake_case(name), what, name)
}

/// Type identifier for a table, schema, enum or composite name.
pub fn type_ident(name: &str, what: &'static str) -> CodegenResult<String> {
    escape(pascal_case(name), what, name)
}

/// Variant identifier for an enum label; labels starting with a digit get a prefix.
pub fn variant_ident(label: &str) -> CodegenResult<String> {
    let ident = pascal_case(label);
    let ident = match ident.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("Value{ident}"),
        Some(_) => ident,
        None => String::new(),
    };
    escape(ident, "enum label", label)
}

/// The serde key a Rust field maps back to, if it differs from the column.
pub fn serde_rename<'a>(ident: &str, name: &'a str) -> Option<&'a str> {
    let bare = ident.strip_prefix("r#").unwrap_or(ident);
    (bare != name).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_case() {
        assert_eq!(snake_case("daily_learning_tasks"), "daily_learning_tasks");
        assert_eq!(snake_case("learningPathId"), "learning_path_id");
        assert_eq!(
            pascal_case("project_recommendations"),
            "ProjectRecommendations"
        );
        assert_eq!(pascal_case("in progress"), "InProgress");
        assert_eq!(pascal_case("day2_review"), "Day2Review");
    }

    #[test]
    fn escapes_keywords() {
        assert_eq!(field_ident("type", "column").unwrap(), "r#type");
        assert_eq!(field_ident("status", "column").unwrap(), "status");
        assert!(field_ident("self", "column").is_err());
        assert!(field_ident("2fa", "column").is_err());
        assert!(field_ident("", "column").is_err());
    }

    #[test]
    fn prefixes_numeric_variants() {
        assert_eq!(variant_ident("1_week").unwrap(), "Value1Week");
        assert_eq!(variant_ident("in_progress").unwrap(), "InProgress");
        assert!(variant_ident("---").is_err());
    }

    #[test]
    fn renames_only_when_needed() {
        assert_eq!(serde_rename("r#type", "type"), None);
        assert_eq!(serde_rename("user_id", "userId"), Some("userId"));
    }
}
