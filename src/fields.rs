//! Ordered fallback lookups over loosely shaped JSON payloads.
//!
//! Student, staff and institution records arrive from the backend with
//! inconsistent key names. Every denormalized field is therefore described by
//! a [`FieldChain`]: an ordered list of candidate keys evaluated
//! first-non-empty-wins.

use serde_json::Value;

/// Ordered candidate keys for one target field.
pub type FieldChain = &'static [&'static str];

/// Text form of a scalar JSON value. Empty strings, nulls, arrays and objects
/// yield `None`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty value among `chain` on `object`.
pub fn first_text(object: &Value, chain: &[&str]) -> Option<String> {
    chain
        .iter()
        .find_map(|key| object.get(*key).and_then(value_text))
}

/// Like [`first_text`] but falls back to `default` when every candidate is empty.
pub fn text_or(object: &Value, chain: &[&str], default: &str) -> String {
    first_text(object, chain).unwrap_or_else(|| default.to_string())
}

/// Like [`first_text`] but falls back to an empty string.
pub fn text(object: &Value, chain: &[&str]) -> String {
    text_or(object, chain, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_non_empty_candidate_wins() {
        let student = json!({ "section_name": "", "section": "B", "section_id": "sec-9" });
        assert_eq!(
            first_text(&student, &["section_name", "section", "section_id"]),
            Some("B".to_string())
        );
    }

    #[test]
    fn numbers_are_rendered_as_text() {
        let student = json!({ "id": 42 });
        assert_eq!(text(&student, &["id"]), "42");
    }

    #[test]
    fn missing_chain_falls_back_to_default() {
        let staff = json!({ "department": null });
        assert_eq!(text_or(&staff, &["department"], "General"), "General");
        assert_eq!(text(&staff, &["designation"]), "");
    }
}
