//! Row mapper: external spreadsheet vocabulary → GAP field names.
//!
//! A row is mapped through a table of [`MapRule`]s keyed by the external
//! column header. Columns without a rule are left over as candidate custom
//! fields.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use gap_core::Status;
use serde_json::{Map, Value};

use crate::content::rewrite_cell;

/// Characters stripped from both ends of every key and value.
const QUOTES: [char; 2] = ['"', '\''];

/// How one external column maps onto the GAP schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapRule {
    /// Copy the (rewritten) cell into `target`.
    Rename(String),
    /// Translate the cell through `values` and write the result to `target`.
    EnumRename {
        target: String,
        values: BTreeMap<String, String>,
        default: String,
    },
}

/// Result of mapping one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRow {
    /// Target field name → value.
    pub fields: BTreeMap<String, String>,
    /// Trimmed keys that no rule consumed.
    pub residual: BTreeSet<String>,
}

impl MappedRow {
    /// Turn the mapped fields into an audit-goal request body.
    #[must_use]
    pub fn into_goal_body(self, parent_id: Option<Value>) -> Value {
        let mut body: Map<String, Value> = self
            .fields
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        if let Some(parent_id) = parent_id {
            body.insert("parent_id".to_string(), parent_id);
        }
        Value::Object(body)
    }
}

/// The translation table for Statement-of-Applicability exports.
#[must_use]
pub fn audit_goal_rules() -> HashMap<String, MapRule> {
    let rename = |target: &str| MapRule::Rename(target.to_string());
    let implemented = MapRule::EnumRename {
        target: "status".to_string(),
        values: [
            ("Completely", Status::Completed),
            ("Partially", Status::InProgress),
            ("", Status::NotStarted),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect(),
        default: Status::NotStarted.to_string(),
    };

    HashMap::from([
        ("Comments".to_string(), rename("description")),
        ("Title".to_string(), rename("title")),
        ("Clause".to_string(), rename("clause")),
        ("Explanation".to_string(), rename("guide")),
        ("Control Objectives".to_string(), rename("documentation")),
        ("Implemented".to_string(), implemented),
    ])
}

/// Maps rows through a fixed rule table.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    rules: HashMap<String, MapRule>,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::audit_goal()
    }
}

impl FieldMapper {
    #[must_use]
    pub const fn new(rules: HashMap<String, MapRule>) -> Self {
        Self { rules }
    }

    /// Mapper using [`audit_goal_rules`].
    #[must_use]
    pub fn audit_goal() -> Self {
        Self::new(audit_goal_rules())
    }

    #[must_use]
    pub fn rule(&self, key: &str) -> Option<&MapRule> {
        self.rules.get(key)
    }

    /// Map one row.
    ///
    /// Keys and values are trimmed of whitespace and quotes first; entries
    /// whose key ends up empty are dropped. A renamed column with an empty
    /// cell is dropped entirely. An enum column whose cell is not in its
    /// table is written back under its own key as an empty string.
    pub fn map<I, K, V>(&self, row: I) -> MappedRow
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapped = MappedRow::default();
        for (key, value) in sanitize_row(row) {
            match self.rules.get(&key) {
                None => {
                    tracing::debug!(key, "no mapping rule, keeping as custom field");
                    mapped.residual.insert(key);
                }
                Some(MapRule::Rename(target)) => {
                    if value.is_empty() {
                        tracing::debug!(key, "empty cell, dropping");
                        continue;
                    }
                    tracing::debug!(key, field = %target, "mapped column");
                    mapped.fields.insert(target.clone(), rewrite_cell(&value));
                }
                Some(MapRule::EnumRename {
                    target,
                    values,
                    default,
                }) => match values.get(&value) {
                    Some(out) => {
                        let out = if out.is_empty() { default } else { out };
                        tracing::debug!(key, value, field = %target, out = %out, "mapped enum column");
                        mapped.fields.insert(target.clone(), out.clone());
                    }
                    None => {
                        tracing::debug!(key, value, "enum value not in table, blanking");
                        mapped.fields.insert(key, String::new());
                    }
                },
            }
        }
        tracing::debug!(fields = ?mapped.fields, "mapped row");
        mapped
    }
}

/// Trim keys and values, drop empty keys. A repeated key keeps its first
/// position and its last value.
fn sanitize_row<I, K, V>(row: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out: Vec<(String, String)> = Vec::new();
    for (key, value) in row {
        let key = strip(key.as_ref());
        if key.is_empty() {
            tracing::info!("skipping empty key");
            continue;
        }
        let value = strip(value.as_ref());
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => out.push((key, value)),
        }
    }
    out
}

fn strip(raw: &str) -> String {
    raw.trim().trim_matches(QUOTES.as_slice()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn map(row: &[(&str, &str)]) -> MappedRow {
        FieldMapper::audit_goal().map(row.iter().copied())
    }

    #[test]
    fn strip_removes_quotes_and_whitespace() {
        assert_eq!(strip("  \"'Title'\"  "), "Title");
        assert_eq!(strip("'"), "");
        assert_eq!(strip("it's"), "it's");
    }

    #[rstest]
    #[case("Completely", "completed")]
    #[case("Partially", "in_progress")]
    #[case("", "not_started")]
    fn implemented_maps_to_status(#[case] cell: &str, #[case] status: &str) {
        let mapped = map(&[("Implemented", cell)]);
        assert_eq!(mapped.fields.get("status").map(String::as_str), Some(status));
        assert!(!mapped.fields.contains_key("Implemented"));
        assert!(mapped.residual.is_empty());
    }

    #[test]
    fn unknown_implemented_value_blanks_original_key() {
        let mapped = map(&[("Implemented", "Not applicable")]);
        assert_eq!(mapped.fields.get("Implemented").map(String::as_str), Some(""));
        assert!(!mapped.fields.contains_key("status"));
        assert!(mapped.residual.is_empty());
    }

    #[test]
    fn unknown_keys_are_residual() {
        let mapped = map(&[("Title", "A.5.1"), ("Control Owner", "CISO")]);
        assert_eq!(mapped.fields.get("title").map(String::as_str), Some("A.5.1"));
        assert!(!mapped.fields.contains_key("Control Owner"));
        assert_eq!(
            mapped.residual.into_iter().collect::<Vec<_>>(),
            vec!["Control Owner".to_string()]
        );
    }

    #[test]
    fn empty_rename_cell_is_dropped_everywhere() {
        let mapped = map(&[("Comments", "  ")]);
        assert!(mapped.fields.is_empty());
        assert!(mapped.residual.is_empty());
    }

    #[test]
    fn keys_are_trimmed_before_lookup() {
        let mapped = map(&[(" \"Title\" ", "'Policies'"), ("  ", "ignored")]);
        assert_eq!(mapped.fields.get("title").map(String::as_str), Some("Policies"));
        assert!(mapped.residual.is_empty());
    }

    #[test]
    fn link_cells_become_anchor_tags() {
        let mapped = map(&[("Explanation", r#"<p>See <a href="X">Y</a> for details</p>"#)]);
        assert_eq!(
            mapped.fields.get("guide").map(String::as_str),
            Some(r#"<a href="X">Y</a>"#)
        );
    }

    #[test]
    fn markup_only_cells_are_blanked() {
        let mapped = map(&[("Control Objectives", "<p><br></p>")]);
        assert_eq!(mapped.fields.get("documentation").map(String::as_str), Some(""));
    }

    #[test]
    fn into_goal_body_adds_parent() {
        let body = map(&[("Title", "A.5.1")]).into_goal_body(Some(serde_json::json!(9503)));
        assert_eq!(body, serde_json::json!({"title": "A.5.1", "parent_id": 9503}));
    }

    #[test]
    fn custom_rule_table() {
        let mapper = FieldMapper::new(HashMap::from([(
            "Name".to_string(),
            MapRule::Rename("title".to_string()),
        )]));
        let mapped = mapper.map([("Name", "x"), ("Title", "y")]);
        assert_eq!(mapped.fields.get("title").map(String::as_str), Some("x"));
        assert!(mapped.residual.contains("Title"));
        assert!(mapper.rule("Title").is_none());
    }
}
