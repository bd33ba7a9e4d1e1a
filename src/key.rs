//! Key-path derivation.
//!
//! A leaf's key path is the key segment of every ancestor field joined with
//! `__`. Paths are carried in snake_case and upper-cased only when the
//! lookup is queried.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::shape::{Field, Kind, Shape};

pub const SEPARATOR: &str = "__";

// "aWord" boundaries first, then any lower/digit followed by an upper
static FIRST_CAP: Lazy<Regex> = Lazy::new(|| Regex::new("(.)([A-Z][a-z]+)").unwrap());
static ALL_CAP: Lazy<Regex> = Lazy::new(|| Regex::new("([a-z0-9])([A-Z])").unwrap());

/// Snake-case a PascalCase or camelCase name.
///
/// `GracefulShutdown` becomes `graceful_shutdown`, `HTTPServer` becomes
/// `http_server`. Names already in snake_case come back unchanged.
pub fn normalize_key(name: &str) -> String {
    let first = FIRST_CAP.replace_all(name, "${1}_${2}");
    ALL_CAP.replace_all(&first, "${1}_${2}").to_lowercase()
}

/// Key segment contributed by `field`: its override verbatim, else its
/// normalized name.
pub fn segment(field: &Field) -> String {
    match field.key() {
        Some(key) => key.to_string(),
        None => normalize_key(field.name()),
    }
}

/// Append `segment` to `prefix`. The root prefix is empty.
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{segment}")
    }
}

/// Join a whole sequence of segments, root first.
pub fn join_all<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .filter(|s| !s.is_empty())
        .join(SEPARATOR)
}

/// The form used to query the environment.
pub fn env_key(path: &str) -> String {
    path.to_uppercase()
}

/// A leaf field's location together with its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPath {
    pub path: String,
    pub kind: Kind,
}

impl KeyPath {
    pub fn env_key(&self) -> String {
        env_key(&self.path)
    }
}

/// Every leaf of `shape`, depth-first in declaration order.
pub fn key_paths(shape: &Shape) -> Vec<KeyPath> {
    let mut out = Vec::new();
    collect(shape, "", &mut out);
    out
}

fn collect(shape: &Shape, prefix: &str, out: &mut Vec<KeyPath>) {
    for field in shape.fields() {
        let path = join(prefix, &segment(field));
        match field.kind() {
            Kind::Record(child) => collect(child, &path, out),
            kind => out.push(KeyPath {
                path,
                kind: kind.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{IntWidth, UintWidth};
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_pascal_and_camel_case() {
        assert_eq!(normalize_key("GracefulShutdown"), "graceful_shutdown");
        assert_eq!(normalize_key("OrderManagement"), "order_management");
        assert_eq!(normalize_key("newrelicEnabled"), "newrelic_enabled");
        assert_eq!(normalize_key("RootInt"), "root_int");
    }

    #[test]
    fn normalizes_acronym_runs() {
        assert_eq!(normalize_key("HTTPServer"), "http_server");
        assert_eq!(normalize_key("ListOfUInts"), "list_of_u_ints");
        assert_eq!(normalize_key("ID"), "id");
        assert_eq!(normalize_key("Version2Name"), "version2_name");
        assert_eq!(normalize_key("Sha256Sum"), "sha256_sum");
    }

    #[test]
    fn snake_case_is_a_fixed_point() {
        assert_eq!(normalize_key("graceful_shutdown"), "graceful_shutdown");
        assert_eq!(normalize_key("port"), "port");
    }

    #[test]
    fn override_is_used_verbatim() {
        let field = Field::new("Enabled", Kind::Bool).with_key("is_Enabled");
        assert_eq!(segment(&field), "is_Enabled");
    }

    #[test]
    fn root_has_no_leading_separator() {
        assert_eq!(join("", "port"), "port");
        assert_eq!(join("database", "host"), "database__host");
        assert_eq!(join_all(["", "database", "host"]), "database__host");
        assert_eq!(env_key("database__host"), "DATABASE__HOST");
    }

    #[test]
    fn lists_leaf_paths_in_declaration_order() {
        let shape = Shape::new()
            .field(Field::new(
                "GracefulShutdown",
                Kind::Record(
                    Shape::new()
                        .field(Field::new("Enabled", Kind::Bool).with_key("is_enabled"))
                        .field(Field::new("Seconds", Kind::Uint(UintWidth::U64))),
                ),
            ))
            .field(Field::new("RootInt", Kind::Int(IntWidth::I64)));

        let keys: Vec<String> = key_paths(&shape).iter().map(KeyPath::env_key).collect();
        assert_eq!(
            keys,
            vec![
                "GRACEFUL_SHUTDOWN__IS_ENABLED",
                "GRACEFUL_SHUTDOWN__SECONDS",
                "ROOT_INT",
            ]
        );
    }
}
