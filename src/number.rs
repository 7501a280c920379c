use std::{
    fmt::Display,
    num::{ParseFloatError, ParseIntError},
};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The numeric kind a field is declared as. Displays in lowercase, e.g. `int64` or `float32`.
///
/// `Int` and `Uint` are 64 bits wide.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, strum::Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

/// A successfully parsed number, widened to 64 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// The error reported by the standard library parser for a [`NumberKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNumberError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

impl NumberKind {
    /// Parses `raw` with the parser of this kind's exact width, so out-of-range input is rejected
    /// even though the result is widened.
    ///
    /// ```
    /// # use decode_errors::{Number, NumberKind};
    /// assert_eq!(NumberKind::Int8.parse("-12"), Ok(Number::Signed(-12)));
    /// assert!(NumberKind::Int8.parse("300").is_err());
    /// assert!(NumberKind::Uint.parse("-1").is_err());
    /// ```
    pub fn parse(self, raw: &str) -> Result<Number, ParseNumberError> {
        let number = match self {
            NumberKind::Int | NumberKind::Int64 => Number::Signed(raw.parse::<i64>()?),
            NumberKind::Int8 => Number::Signed(raw.parse::<i8>()?.into()),
            NumberKind::Int16 => Number::Signed(raw.parse::<i16>()?.into()),
            NumberKind::Int32 => Number::Signed(raw.parse::<i32>()?.into()),
            NumberKind::Uint | NumberKind::Uint64 => Number::Unsigned(raw.parse::<u64>()?),
            NumberKind::Uint8 => Number::Unsigned(raw.parse::<u8>()?.into()),
            NumberKind::Uint16 => Number::Unsigned(raw.parse::<u16>()?.into()),
            NumberKind::Uint32 => Number::Unsigned(raw.parse::<u32>()?.into()),
            NumberKind::Float32 => Number::Float(raw.parse::<f32>()?.into()),
            NumberKind::Float64 => Number::Float(raw.parse::<f64>()?),
        };
        Ok(number)
    }

    /// Like [`parse`](NumberKind::parse), but a failure is attributed to `field` and keeps the raw
    /// text, ready to be recorded in a [`DecodeError`](crate::DecodeError).
    ///
    /// ```
    /// # use decode_errors::NumberKind;
    /// let err = NumberKind::Int64.parse_field("Count", "twelve").unwrap_err();
    /// assert_eq!(err.value.as_deref(), Some("twelve"));
    /// assert_eq!(
    ///     err.to_string(),
    ///     "cannot parse 'Count' as int64: invalid digit found in string",
    /// );
    /// ```
    pub fn parse_field(self, field: &str, raw: &str) -> Result<Number, NumberParseError> {
        self.parse(raw)
            .map_err(|source| NumberParseError::new(field, self, source).with_value(raw))
    }
}

/// A numeric value which could not be parsed into the field's declared [`NumberKind`].
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("cannot parse '{field}' as {kind}: {source}")]
pub struct NumberParseError {
    pub field: String,
    pub kind: NumberKind,
    /// The raw text which was rejected, if the caller kept it. Not part of the rendered message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[source]
    #[serde(rename = "error", serialize_with = "serialize_display")]
    pub source: ParseNumberError,
}

impl NumberParseError {
    pub fn new(field: impl Into<String>, kind: NumberKind, source: impl Into<ParseNumberError>) -> Self {
        NumberParseError {
            field: field.into(),
            kind,
            value: None,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

fn serialize_display<S: Serializer>(value: &impl Display, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NumberKind::Int, "int")]
    #[case(NumberKind::Int16, "int16")]
    #[case(NumberKind::Uint, "uint")]
    #[case(NumberKind::Uint32, "uint32")]
    #[case(NumberKind::Float32, "float32")]
    #[case(NumberKind::Float64, "float64")]
    fn kind_renders_lowercase(#[case] kind: NumberKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
        assert_eq!(serde_json::to_value(kind).unwrap(), expected);
    }

    #[rstest]
    #[case(NumberKind::Int32, "-7", Number::Signed(-7))]
    #[case(NumberKind::Uint8, "255", Number::Unsigned(255))]
    #[case(NumberKind::Uint64, "18446744073709551615", Number::Unsigned(u64::MAX))]
    #[case(NumberKind::Float64, "2.5", Number::Float(2.5))]
    #[case(NumberKind::Float32, "0.5", Number::Float(0.5))]
    fn parses_within_range(#[case] kind: NumberKind, #[case] raw: &str, #[case] expected: Number) {
        assert_eq!(kind.parse(raw), Ok(expected));
    }

    #[rstest]
    #[case(NumberKind::Int8, "128")]
    #[case(NumberKind::Uint16, "65536")]
    #[case(NumberKind::Int, "1.5")]
    #[case(NumberKind::Float64, "abc")]
    #[case(NumberKind::Uint, "")]
    fn rejects_invalid_input(#[case] kind: NumberKind, #[case] raw: &str) {
        assert!(kind.parse(raw).is_err());
    }

    #[test]
    fn message_and_source() {
        let err = NumberKind::Float32.parse_field("Ratio", "x").unwrap_err();
        let underlying = "x".parse::<f32>().unwrap_err().to_string();

        assert_eq!(err.to_string(), format!("cannot parse 'Ratio' as float32: {underlying}"));
        assert_eq!(err.source().map(|e| e.to_string()), Some(underlying));
    }

    #[test]
    fn value_is_not_rendered() {
        let source = "abc".parse::<i64>().unwrap_err();
        let with = NumberParseError::new("N", NumberKind::Int, source.clone()).with_value("abc");
        let without = NumberParseError::new("N", NumberKind::Int, source);

        assert_eq!(with.to_string(), without.to_string());
    }

    #[test]
    fn serializes_error_as_text() {
        let err = NumberKind::Uint8.parse_field("Level", "300").unwrap_err();
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["field"], "Level");
        assert_eq!(json["kind"], "uint8");
        assert_eq!(json["value"], "300");
        assert_eq!(json["error"], "number too large to fit in target type");
    }
}
