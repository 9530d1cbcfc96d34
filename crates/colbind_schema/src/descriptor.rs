//! Field Descriptors
//!
//! One descriptor per output field. A descriptor is plain data: it has no
//! behaviour beyond answering "is this token a null sentinel for me?".

use colbind_protocol::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Binding of one output field to a source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Output field name (unique within a schema)
    pub name: String,

    /// Zero-based source column position
    pub index: usize,

    /// Declared primitive type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether a null sentinel decodes to an explicit null
    #[serde(default)]
    pub nullable: bool,

    /// Raw tokens that mean null. Only meaningful when `nullable` is set;
    /// a schema rejects sentinels on a required field.
    #[serde(default)]
    pub null_sentinels: BTreeSet<String>,

    /// Optional description for documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Create a descriptor from all of its parts.
    pub fn new<I, S>(
        name: impl Into<String>,
        index: usize,
        field_type: FieldType,
        nullable: bool,
        null_sentinels: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            index,
            field_type,
            nullable,
            null_sentinels: null_sentinels.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Create a required (non-nullable) field
    pub fn required(name: impl Into<String>, index: usize, field_type: FieldType) -> Self {
        Self::new(name, index, field_type, false, Vec::<String>::new())
    }

    /// Create an optional (nullable) field whose only sentinel is the empty string
    pub fn optional(name: impl Into<String>, index: usize, field_type: FieldType) -> Self {
        Self::new(name, index, field_type, true, [""])
    }

    /// Replace the null sentinel set
    pub fn with_null_sentinels<I, S>(mut self, sentinels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_sentinels = sentinels.into_iter().map(Into::into).collect();
        self
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// True when `token` decodes to null for this field.
    pub fn is_null_token(&self, token: &str) -> bool {
        self.nullable && self.null_sentinels.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field() {
        let field = FieldDescriptor::required("id", 2, FieldType::Integer);
        assert_eq!(field.name, "id");
        assert_eq!(field.index, 2);
        assert!(!field.nullable);
        assert!(field.null_sentinels.is_empty());
        assert!(!field.is_null_token(""));
    }

    #[test]
    fn test_optional_field_defaults_to_empty_sentinel() {
        let field = FieldDescriptor::optional("note", 0, FieldType::String);
        assert!(field.nullable);
        assert!(field.is_null_token(""));
        assert!(!field.is_null_token("NULL"));
    }

    #[test]
    fn test_with_null_sentinels_replaces_set() {
        let field = FieldDescriptor::optional("amount", 4, FieldType::Float)
            .with_null_sentinels(["NA", "n/a", "NA"])
            .with_description("Settlement amount");

        assert_eq!(field.null_sentinels.len(), 2);
        assert!(field.is_null_token("NA"));
        assert!(field.is_null_token("n/a"));
        assert!(!field.is_null_token(""));
        assert_eq!(field.description.as_deref(), Some("Settlement amount"));
    }

    #[test]
    fn test_sentinels_ignored_when_not_nullable() {
        let field = FieldDescriptor::new("x", 0, FieldType::String, false, ["-"]);
        assert!(!field.is_null_token("-"));
    }
}
