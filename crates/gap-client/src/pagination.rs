//! Paginated list flattening.
//!
//! GAP list endpoints answer with `{ "data": [...], "next_page_url": ... }`.
//! [`fetch_all_pages`] follows `next_page_url` until it runs out and returns
//! every item in page order, optionally descending into a nested array,
//! cleaning each item, and copying parent fields onto it.

use gap_core::CleanError;
use serde_json::Value;

use crate::error::ClientError;

/// Per-item cleaning function applied by the normalizer.
pub type Cleaner<'a> = &'a dyn Fn(&Value) -> Result<Value, CleanError>;

/// What to do when an item fails cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnCleanError {
    /// Log a warning and drop the item.
    #[default]
    Skip,
    /// Fail the whole fetch with the cleaning error.
    Abort,
}

/// How a page's `data` elements become items.
#[derive(Clone, Copy, Default)]
pub struct PageOptions<'a> {
    /// Nested array on each element whose entries are the items.
    pub sub_field: Option<&'a str>,
    pub cleaner: Option<Cleaner<'a>>,
    /// Fields copied from the parent element onto each produced item.
    pub lift_fields: &'a [&'a str],
    pub on_clean_error: OnCleanError,
}

impl<'a> PageOptions<'a> {
    #[must_use]
    pub const fn sub_field(mut self, field: &'a str) -> Self {
        self.sub_field = Some(field);
        self
    }

    #[must_use]
    pub fn cleaner(mut self, cleaner: Cleaner<'a>) -> Self {
        self.cleaner = Some(cleaner);
        self
    }

    #[must_use]
    pub const fn lift(mut self, fields: &'a [&'a str]) -> Self {
        self.lift_fields = fields;
        self
    }

    #[must_use]
    pub const fn abort_on_clean_error(mut self) -> Self {
        self.on_clean_error = OnCleanError::Abort;
        self
    }
}

/// Fetch every page starting at `start_url` and flatten the items.
///
/// The next URL is taken verbatim from each page's `next_page_url`; a null,
/// missing or empty value ends the walk. Falsy `data` elements (null, false,
/// zero, empty string/array/object) are skipped with a warning.
///
/// # Errors
///
/// Any fetch error, a page without a `data` array, or (with
/// [`OnCleanError::Abort`]) a cleaning failure ends the walk. No partial
/// result is returned.
pub fn fetch_all_pages<F>(
    mut fetch_page: F,
    start_url: &str,
    options: &PageOptions<'_>,
) -> Result<Vec<Value>, ClientError>
where
    F: FnMut(&str) -> Result<Value, ClientError>,
{
    let mut items = Vec::new();
    let mut url = start_url.to_string();
    let mut pages = 0_usize;

    loop {
        let page = fetch_page(&url)?;
        pages += 1;

        let data = page.get("data").and_then(Value::as_array).ok_or_else(|| {
            ClientError::Parse(format!("page {pages} ({url}) has no data array"))
        })?;

        for element in data {
            if is_falsy(element) {
                tracing::warn!(page = pages, "Skipping item");
                continue;
            }
            match options.sub_field {
                Some(field) => {
                    let Some(nested) = element.get(field).and_then(Value::as_array) else {
                        tracing::debug!(field, "element has no nested array");
                        continue;
                    };
                    for item in nested {
                        if let Some(item) = produce(item, element, options)? {
                            items.push(item);
                        }
                    }
                }
                None => {
                    if let Some(item) = produce(element, element, options)? {
                        items.push(item);
                    }
                }
            }
        }

        match page
            .get("next_page_url")
            .and_then(Value::as_str)
            .filter(|next| !next.is_empty())
        {
            Some(next) => url = next.to_string(),
            None => break,
        }
    }

    tracing::debug!(pages, items = items.len(), "fetched all pages");
    Ok(items)
}

fn produce(
    item: &Value,
    parent: &Value,
    options: &PageOptions<'_>,
) -> Result<Option<Value>, ClientError> {
    let mut item = match options.cleaner {
        None => item.clone(),
        Some(clean) => match clean(item) {
            Ok(cleaned) => cleaned,
            Err(e) => match options.on_clean_error {
                OnCleanError::Skip => {
                    tracing::warn!(error = %e, "Error cleaning item, skipping");
                    return Ok(None);
                }
                OnCleanError::Abort => return Err(e.into()),
            },
        },
    };

    if let Some(fields) = item.as_object_mut() {
        for &name in options.lift_fields {
            if let Some(value) = parent.get(name).filter(|v| !v.is_null()) {
                fields.insert(name.to_string(), value.clone());
            }
        }
    }
    Ok(Some(item))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::HashMap;

    fn pages(map: &[(&str, Value)]) -> HashMap<String, Value> {
        map.iter()
            .map(|(url, page)| ((*url).to_string(), page.clone()))
            .collect()
    }

    #[test]
    fn follows_next_page_url_in_order() {
        let book = pages(&[
            ("p1", json!({"data": ["a", "b"], "next_page_url": "p2"})),
            ("p2", json!({"data": ["c"], "next_page_url": null})),
        ]);
        let mut fetched = Vec::new();
        let items = fetch_all_pages(
            |url| {
                fetched.push(url.to_string());
                Ok(book[url].clone())
            },
            "p1",
            &PageOptions::default(),
        )
        .unwrap();
        assert_eq!(items, vec![json!("a"), json!("b"), json!("c")]);
        assert_eq!(fetched, vec!["p1", "p2"]);
    }

    #[test]
    fn missing_next_page_url_ends_walk() {
        let items = fetch_all_pages(
            |_| Ok(json!({"data": [{"id": 1}]})),
            "p1",
            &PageOptions::default(),
        )
        .unwrap();
        assert_eq!(items, vec![json!({"id": 1})]);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(false))]
    #[case(json!(0))]
    #[case(json!(""))]
    #[case(json!([]))]
    #[case(json!({}))]
    fn falsy_elements_are_skipped(#[case] falsy: Value) {
        let items = fetch_all_pages(
            |_| Ok(json!({"data": [falsy.clone(), {"id": 2}]})),
            "p1",
            &PageOptions::default(),
        )
        .unwrap();
        assert_eq!(items, vec![json!({"id": 2})]);
    }

    #[test]
    fn sub_field_with_lift_flattens_groups() {
        let page = json!({
            "data": [
                {
                    "account_id": 7,
                    "type": "work_processes",
                    "created_at": null,
                    "fields": [{"name": "Owner", "type": "text"}, {"name": "Risk"}]
                },
                {"account_id": 7, "type": "it_system"},
                {"account_id": 7, "type": "event_logs", "fields": [{"name": "Source"}]}
            ],
            "next_page_url": null
        });
        let lift = ["account_id", "type", "created_at"];
        let options = PageOptions::default().sub_field("fields").lift(&lift);
        let items = fetch_all_pages(|_| Ok(page.clone()), "p1", &options).unwrap();
        assert_eq!(
            items,
            vec![
                json!({"name": "Owner", "type": "work_processes", "account_id": 7}),
                json!({"name": "Risk", "type": "work_processes", "account_id": 7}),
                json!({"name": "Source", "type": "event_logs", "account_id": 7}),
            ]
        );
    }

    #[test]
    fn cleaning_failure_skips_by_default() {
        let clean = |v: &Value| {
            if v.get("title").is_some() {
                Ok(v.clone())
            } else {
                Err(CleanError::MissingTitle { kind: "raw_audit_goal" })
            }
        };
        let options = PageOptions::default().cleaner(&clean);
        let items = fetch_all_pages(
            |_| Ok(json!({"data": [{"title": "A"}, {"id": 3}, {"title": "B"}]})),
            "p1",
            &options,
        )
        .unwrap();
        assert_eq!(items, vec![json!({"title": "A"}), json!({"title": "B"})]);
    }

    #[test]
    fn cleaning_failure_aborts_when_asked() {
        let clean = |_: &Value| -> Result<Value, CleanError> { Err(CleanError::MissingName) };
        let options = PageOptions::default().cleaner(&clean).abort_on_clean_error();
        let err = fetch_all_pages(|_| Ok(json!({"data": [{"x": 1}]})), "p1", &options)
            .unwrap_err();
        assert!(matches!(err, ClientError::Clean(CleanError::MissingName)));
    }

    #[test]
    fn fetch_error_discards_partial_result() {
        let mut calls = 0;
        let result = fetch_all_pages(
            |_| {
                calls += 1;
                if calls == 1 {
                    Ok(json!({"data": ["a"], "next_page_url": "p2"}))
                } else {
                    Err(ClientError::Api {
                        status: 500,
                        body: "boom".into(),
                    })
                }
            },
            "p1",
            &PageOptions::default(),
        );
        assert!(matches!(result, Err(ClientError::Api { status: 500, .. })));
        assert_eq!(calls, 2);
    }

    #[test]
    fn page_without_data_is_a_parse_error() {
        let err = fetch_all_pages(|_| Ok(json!({"message": "hi"})), "p1", &PageOptions::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
