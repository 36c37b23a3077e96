//! Normalization of document-store rejection bodies.
//!
//! The backend answers a rejected request with one of three shapes:
//! `{"detail": "text"}`, `{"detail": [{"loc": [...], "msg": "..."}, ...]}` or
//! `{"message": "text"}`. They are resolved into a single human-readable
//! message here so nothing above the store has to inspect raw bodies.

use serde_json::Value;

/// One item of a field-error list.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Last element of the item's `loc`, or `None` for bare string items.
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    fn from_item(item: &Value) -> Self {
        if let Value::String(text) = item {
            return Self {
                field: None,
                message: text.clone(),
            };
        }

        let field = item
            .get("loc")
            .and_then(Value::as_array)
            .and_then(|loc| loc.last())
            .and_then(|last| match last {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| "unknown field".to_string());

        let message = ["msg", "message"]
            .iter()
            .find_map(|key| item.get(*key).and_then(Value::as_str))
            .unwrap_or("Validation error")
            .to_string();

        Self {
            field: Some(field),
            message,
        }
    }

    pub fn render(&self) -> String {
        match &self.field {
            Some(field) => format!("{field}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendErrorBody {
    StringDetail(String),
    FieldErrorList(Vec<FieldError>),
    GenericMessage(String),
    Unrecognized,
}

impl BackendErrorBody {
    pub fn parse(body: &Value) -> Self {
        match body.get("detail") {
            Some(Value::String(detail)) => return Self::StringDetail(detail.clone()),
            Some(Value::Array(items)) => {
                return Self::FieldErrorList(items.iter().map(FieldError::from_item).collect())
            }
            _ => {}
        }
        match body.get("message").and_then(Value::as_str) {
            Some(message) => Self::GenericMessage(message.to_string()),
            None => Self::Unrecognized,
        }
    }

    /// Parse a raw response body; anything that is not JSON is unrecognized.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice::<Value>(bytes)
            .map(|body| Self::parse(&body))
            .unwrap_or(Self::Unrecognized)
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::FieldErrorList(items) => items,
            _ => &[],
        }
    }

    /// One message for the user. `fallback` is used for unrecognized bodies.
    pub fn into_message(self, fallback: &str) -> String {
        match self {
            Self::StringDetail(detail) => detail,
            Self::FieldErrorList(items) if !items.is_empty() => items
                .iter()
                .map(FieldError::render)
                .collect::<Vec<_>>()
                .join(", "),
            Self::GenericMessage(message) => message,
            Self::FieldErrorList(_) | Self::Unrecognized => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body = json!({ "detail": "Student already has a TC" });
        assert_eq!(
            BackendErrorBody::parse(&body).into_message("fallback"),
            "Student already has a TC"
        );
    }

    #[test]
    fn field_errors_use_last_loc_element() {
        let body = json!({
            "detail": [
                { "loc": ["body", "date_of_leaving"], "msg": "field required" },
                { "loc": ["body", "subjects", 0], "message": "bad subject" },
                { "msg": "no location" },
                { "loc": ["body", "term"] },
                "plain text"
            ]
        });

        assert_eq!(
            BackendErrorBody::parse(&body).into_message("fallback"),
            "date_of_leaving: field required, 0: bad subject, unknown field: no location, \
             term: Validation error, plain text"
        );
    }

    #[test]
    fn message_is_used_when_no_detail() {
        let body = json!({ "message": "Server busy" });
        assert_eq!(
            BackendErrorBody::parse(&body),
            BackendErrorBody::GenericMessage("Server busy".into())
        );
    }

    #[test]
    fn non_json_falls_back() {
        let parsed = BackendErrorBody::parse_bytes(b"<html>502</html>");
        assert_eq!(parsed, BackendErrorBody::Unrecognized);
        assert_eq!(parsed.into_message("Failed to create certificate"), "Failed to create certificate");
    }
}
