use std::{borrow::Cow, fmt::Display};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::NumberParseError;

/// A single failure encountered while decoding. A [`DecodeError`](crate::DecodeError) holds any
/// mix of these, and never holds another `DecodeError`.
///
/// Each variant renders as one line:
///
/// ```
/// # use decode_errors::{Failure, TypeMismatch};
/// let mismatch: Failure = TypeMismatch::new("Age", "int", "string", "abc").into();
/// assert_eq!(
///     mismatch.to_string(),
///     "'Age' expected type 'int', got unconvertible type 'string', value: 'abc'",
/// );
///
/// let generic = Failure::generic("'Name' has invalid keys: nmae");
/// assert_eq!(generic.to_string(), "'Name' has invalid keys: nmae");
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Failure {
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
    #[error(transparent)]
    NumberParse(#[from] NumberParseError),
    /// Any other failure, kept as its message.
    #[error("{0}")]
    Generic(String),
}

impl Failure {
    pub fn generic(message: impl Display) -> Self {
        Failure::Generic(message.to_string())
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::Generic(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Failure::Generic(message.to_owned())
    }
}

/// A value which cannot be converted into the type of the field it was destined for.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error(
    "'{field}' expected type '{expected}', got unconvertible type '{actual}', value: '{}'",
    render_value(.value)
)]
pub struct TypeMismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
    pub value: Value,
}

impl TypeMismatch {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
            value: value.into(),
        }
    }

    /// Constructs a `TypeMismatch` whose source type is named after the kind of `value`.
    ///
    /// ```
    /// # use decode_errors::TypeMismatch;
    /// # use serde_json::json;
    /// let err = TypeMismatch::from_value("Tags", "[]string", json!({"a": 1}));
    /// assert_eq!(err.actual, "map");
    /// assert_eq!(
    ///     err.to_string(),
    ///     r#"'Tags' expected type '[]string', got unconvertible type 'map', value: '{"a":1}'"#,
    /// );
    /// ```
    pub fn from_value(field: impl Into<String>, expected: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let actual = type_name(&value);
        TypeMismatch::new(field, expected, actual, value)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() => "int64",
        Value::Number(n) if n.is_u64() => "uint64",
        Value::Number(_) => "float64",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

// Strings are shown bare; everything else as compact JSON.
fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
