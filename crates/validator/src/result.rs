//! Violation records and the aggregated validation result.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use sift_error::{ApiError, StatusCode};

// ============================================================================
// VIOLATION RECORD
// ============================================================================

/// A structured description of one failed constraint.
///
/// `template` is the message with `{name}` placeholders for every entry of
/// `values`, so the message can be translated without re-deriving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationRecord {
    code: Cow<'static, str>,
    message: String,
    template: Cow<'static, str>,
    values: BTreeMap<String, Value>,
}

impl ViolationRecord {
    /// Creates a record without values.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        template: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            template: template.into(),
            values: BTreeMap::new(),
        }
    }

    /// Adds a named value referenced by the template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Machine-readable code, usually the constraint name.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message template with `{name}` placeholders.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Values referenced by the template.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Renders another template (e.g. a translation) with this record's values.
    ///
    /// Placeholders without a matching value are left untouched. Strings are
    /// inserted without quotes.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    match self.values.get(name) {
                        Some(Value::String(text)) => out.push_str(text),
                        Some(value) => out.push_str(&value.to_string()),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl fmt::Display for ViolationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ViolationRecord {}

// ============================================================================
// VIOLATION
// ============================================================================

/// One entry in a [`ValidationResult`].
#[derive(Debug, Clone)]
pub enum Violation {
    /// A structured record, as produced by every built-in constraint.
    Record(ViolationRecord),
    /// Any other error, reported with the `unknown` code.
    Opaque(Arc<dyn std::error::Error + Send + Sync>),
}

impl Violation {
    /// Wraps an arbitrary error.
    pub fn opaque<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Opaque(Arc::new(err))
    }

    /// The record's code, or `unknown` for opaque errors.
    pub fn code(&self) -> &str {
        match self {
            Self::Record(record) => record.code(),
            Self::Opaque(_) => "unknown",
        }
    }

    /// The structured record, if there is one.
    pub fn as_record(&self) -> Option<&ViolationRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Opaque(_) => None,
        }
    }

    /// The `{ code, message, template, values }` shape sent to clients.
    pub fn detail(&self) -> Value {
        match self {
            Self::Record(record) => json!({
                "code": record.code(),
                "message": record.message(),
                "template": record.template(),
                "values": record.values(),
            }),
            Self::Opaque(err) => json!({
                "code": "unknown",
                "message": err.to_string(),
                "template": "",
                "values": {},
            }),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => fmt::Display::fmt(record, f),
            Self::Opaque(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<ViolationRecord> for Violation {
    fn from(record: ViolationRecord) -> Self {
        Self::Record(record)
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// All violations found in one validation call, keyed by dotted field path.
///
/// A validator only ever hands out non-empty results; a clean value yields
/// `Ok(())` instead.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    fields: BTreeMap<String, Vec<Violation>>,
}

impl ValidationResult {
    /// Creates an empty result. Used by assertions that aggregate on their own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation under `path`.
    pub fn push(&mut self, path: impl Into<String>, violation: impl Into<Violation>) {
        self.fields
            .entry(path.into())
            .or_default()
            .push(violation.into());
    }

    /// Moves every entry of `nested` under `prefix.<path>`, keeping order.
    pub fn merge_nested(&mut self, prefix: &str, nested: ValidationResult) {
        for (path, violations) in nested.fields {
            self.fields
                .entry(format!("{prefix}.{path}"))
                .or_default()
                .extend(violations);
        }
    }

    /// Violations per path.
    pub fn fields(&self) -> &BTreeMap<String, Vec<Violation>> {
        &self.fields
    }

    /// Violations recorded for one path.
    pub fn get(&self, path: &str) -> Option<&[Violation]> {
        self.fields.get(path).map(Vec::as_slice)
    }

    /// Codes recorded for one path, in order. Empty when the path is clean.
    pub fn codes(&self, path: &str) -> Vec<&str> {
        self.get(path)
            .map(|violations| violations.iter().map(Violation::code).collect())
            .unwrap_or_default()
    }

    /// Failing paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of failing paths.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the result and returns the raw map.
    pub fn into_fields(self) -> BTreeMap<String, Vec<Violation>> {
        self.fields
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("entity validation failed")
    }
}

impl std::error::Error for ValidationResult {}

impl ApiError for ValidationResult {
    fn code(&self) -> &str {
        "invalid_entity"
    }

    fn status(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    fn detail(&self) -> Value {
        let detail: Map<String, Value> = self
            .fields
            .iter()
            .map(|(path, violations)| {
                (
                    path.clone(),
                    Value::Array(violations.iter().map(Violation::detail).collect()),
                )
            })
            .collect();
        Value::Object(detail)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.detail().serialize(serializer)
    }
}
