//! Read-only view over a raw Financial Status Report payload.
//!
//! The payload is semi-structured: any section may be missing, null, or of
//! an unexpected shape. Every accessor here falls back to an empty value
//! instead of failing, so callers can chain lookups freely.

use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

/// Key of the boolean that switches the form to the enhanced layout.
pub const ENHANCED_FSR_KEY: &str = "view:enhanced_financial_status_report";

static EMPTY_ARRAY: Vec<Value> = Vec::new();
static NULL: Value = Value::Null;

/// Errors raised when building a [`FormSnapshot`] from raw input.
#[derive(Debug, Error)]
pub enum FormError {
    /// The input is not valid JSON.
    #[error("invalid form JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload root is valid JSON but not an object.
    #[error("form payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Returns a short name for the JSON type of `value`, for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Form flag truthiness: only absent, `null` and `false` are false.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Looks up a nested key path below `value`, returning `Null` when any step
/// is missing or is not an object.
pub fn dig<'a>(
    value: &'a Value,
    path: &[&str],
) -> &'a Value {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
        .unwrap_or(&NULL)
}

/// Like [`dig`], but yields an empty slice unless the target is an array.
pub fn dig_array<'a>(
    value: &'a Value,
    path: &[&str],
) -> &'a [Value] {
    dig(value, path).as_array().unwrap_or(&EMPTY_ARRAY)
}

/// Reads a string field of an entry; non-string values count as absent.
pub fn str_field<'a>(
    value: &'a Value,
    key: &str,
) -> Option<&'a str> {
    dig(value, &[key]).as_str()
}

/// An immutable Financial Status Report payload.
///
/// # Examples
///
/// ```
/// use fsr_core::FormSnapshot;
///
/// let form: FormSnapshot = r#"{"income": [{"education": "120"}]}"#.parse().unwrap();
///
/// assert_eq!(form.array(&["income"]).len(), 1);
/// assert!(form.array(&["curr_employment"]).is_empty());
/// assert!(!form.enhanced_fsr_active());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    root: Value,
}

impl FormSnapshot {
    /// Wraps a JSON value, which must be an object.
    pub fn from_value(root: Value) -> Result<Self, FormError> {
        if root.is_object() {
            Ok(Self { root })
        } else {
            Err(FormError::NotAnObject(kind_of(&root)))
        }
    }

    /// Parses a JSON document into a snapshot.
    pub fn from_json_str(input: &str) -> Result<Self, FormError> {
        let root: Value = serde_json::from_str(input)?;
        Self::from_value(root)
    }

    /// A snapshot with no sections at all.
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Nested lookup from the root; see [`dig`].
    pub fn dig(
        &self,
        path: &[&str],
    ) -> &Value {
        dig(&self.root, path)
    }

    /// Nested array lookup from the root; see [`dig_array`].
    pub fn array(
        &self,
        path: &[&str],
    ) -> &[Value] {
        dig_array(&self.root, path)
    }

    /// Nested object lookup from the root, `Null` when absent or not an
    /// object. Returned as a [`Value`] so further [`dig`] calls chain.
    pub fn section(
        &self,
        path: &[&str],
    ) -> &Value {
        let found = self.dig(path);
        if found.is_object() { found } else { &NULL }
    }

    /// Whether the payload was filled in with the enhanced FSR layout.
    pub fn enhanced_fsr_active(&self) -> bool {
        is_truthy(self.dig(&[ENHANCED_FSR_KEY]))
    }
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for FormSnapshot {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    // =========================================================================
    // construction tests
    // =========================================================================

    #[test]
    fn from_json_str_accepts_object() {
        let form = FormSnapshot::from_json_str(r#"{"benefits": {}}"#).unwrap();

        assert!(form.dig(&["benefits"]).is_object());
    }

    #[test]
    fn from_json_str_rejects_invalid_json() {
        let result = FormSnapshot::from_json_str("{not json");

        assert!(matches!(result, Err(FormError::InvalidJson(_))));
    }

    #[test]
    fn from_value_rejects_non_object_root() {
        let result = FormSnapshot::from_value(json!([1, 2, 3]));

        assert!(matches!(result, Err(FormError::NotAnObject("array"))));
    }

    #[test]
    fn not_an_object_error_names_the_kind() {
        let err = FormSnapshot::from_json_str("null").unwrap_err();

        assert_eq!(err.to_string(), "form payload must be a JSON object, got null");
    }

    // =========================================================================
    // lookup tests
    // =========================================================================

    #[test]
    fn dig_follows_nested_path() {
        let value = json!({"a": {"b": {"c": 7}}});

        assert_eq!(dig(&value, &["a", "b", "c"]), &json!(7));
    }

    #[test]
    fn dig_missing_step_is_null() {
        let value = json!({"a": {"b": 1}});

        assert_eq!(dig(&value, &["a", "x", "c"]), &Value::Null);
    }

    #[test]
    fn dig_through_non_object_is_null() {
        let value = json!({"a": [1, 2]});

        assert_eq!(dig(&value, &["a", "b"]), &Value::Null);
    }

    #[test]
    fn dig_array_defaults_to_empty() {
        let value = json!({"list": "not a list", "real": [1]});

        assert!(dig_array(&value, &["list"]).is_empty());
        assert!(dig_array(&value, &["missing"]).is_empty());
        assert_eq!(dig_array(&value, &["real"]).len(), 1);
    }

    #[test]
    fn section_replaces_non_objects_with_null() {
        let form = FormSnapshot::from_value(json!({"social_security": "n/a"})).unwrap();

        assert_eq!(form.section(&["social_security"]), &Value::Null);
    }

    #[test]
    fn str_field_ignores_non_strings() {
        let entry = json!({"name": 12, "label": "Pension"});

        assert_eq!(str_field(&entry, "name"), None);
        assert_eq!(str_field(&entry, "label"), Some("Pension"));
    }

    // =========================================================================
    // enhanced flag tests
    // =========================================================================

    #[test]
    fn enhanced_flag_absent_is_false() {
        assert!(!FormSnapshot::empty().enhanced_fsr_active());
    }

    #[test]
    fn enhanced_flag_follows_truthiness() {
        let on = FormSnapshot::from_value(json!({"view:enhanced_financial_status_report": true})).unwrap();
        let off = FormSnapshot::from_value(json!({"view:enhanced_financial_status_report": false})).unwrap();
        let null = FormSnapshot::from_value(json!({"view:enhanced_financial_status_report": null})).unwrap();
        let text = FormSnapshot::from_value(json!({"view:enhanced_financial_status_report": "false"})).unwrap();

        assert!(on.enhanced_fsr_active());
        assert!(!off.enhanced_fsr_active());
        assert!(!null.enhanced_fsr_active());
        assert!(text.enhanced_fsr_active());
    }
}
