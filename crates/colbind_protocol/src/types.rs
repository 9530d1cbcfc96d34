//! Field types and decoded values

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::coerce::{self, BooleanVocabulary, CoercionError};

// ============================================================================
// Canonical Enums (used across all crates)
// ============================================================================

/// Primitive kind of a schema field.
/// This is the CANONICAL definition - the decoder only understands these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    /// UTF-8 string, used verbatim (default)
    #[default]
    String,

    /// 64-bit signed integer
    Integer,

    /// 64-bit floating point
    Float,

    /// Boolean from a fixed vocabulary
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
        }
    }

    /// Returns all field types.
    pub fn all() -> [FieldType; 4] {
        [
            FieldType::String,
            FieldType::Integer,
            FieldType::Float,
            FieldType::Boolean,
        ]
    }

    /// Returns true if this type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }

    /// Parse a raw token as this type.
    ///
    /// `String` never fails. Every other type must consume the whole token.
    pub fn coerce(
        &self,
        token: &str,
        boolean: BooleanVocabulary,
    ) -> Result<Value, CoercionError> {
        match self {
            FieldType::String => Ok(Value::String(token.to_string())),
            FieldType::Integer => coerce::parse_integer(token).map(Value::Integer),
            FieldType::Float => coerce::parse_float(token).map(Value::Float),
            FieldType::Boolean => boolean.parse(token).map(Value::Boolean),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" | "text" | "utf8" => Ok(FieldType::String),
            "integer" | "int" | "int64" | "i64" => Ok(FieldType::Integer),
            "float" | "double" | "float64" | "f64" => Ok(FieldType::Float),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            _ => Err(format!(
                "Invalid field type: '{}'. Expected: string, integer, float, or boolean",
                s
            )),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        FieldType::from_str(&raw).map_err(de::Error::custom)
    }
}

// ============================================================================
// Decoded Values
// ============================================================================

/// A decoded field value.
///
/// `Null` only ever appears for nullable fields whose token matched a null
/// sentinel. Values own their data and never borrow from the source row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The field type that produced this value, `None` for null.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(FieldType::String),
            Value::Integer(_) => Some(FieldType::Integer),
            Value::Float(_) => Some(FieldType::Float),
            Value::Boolean(_) => Some(FieldType::Boolean),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Boolean(v) => serializer.serialize_bool(*v),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
