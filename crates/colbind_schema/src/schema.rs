//! Schema Types
//!
//! A schema is validated once, at construction, and never changes after.
//! Decoders share it read-only, so it can back any number of concurrent
//! decode calls.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::warn;

use crate::definition::{FieldDefinition, SchemaDefinition};
use crate::descriptor::FieldDescriptor;
use crate::error::{Result, SchemaError};

/// An ordered, non-empty, immutable list of field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    content_hash: String,
}

impl Schema {
    /// Build and validate a schema.
    ///
    /// Fails when the field list is empty, a name is blank or repeated, or a
    /// required field carries null sentinels.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self> {
        let name = name.into();
        if fields.is_empty() {
            return Err(SchemaError::Empty(name));
        }

        validate_fields(&name, &fields)?;

        let content_hash = Self::compute_hash(&name, &fields);
        Ok(Self {
            name,
            fields,
            content_hash,
        })
    }

    /// Compute a stable content hash for the schema.
    ///
    /// Components are separated with ASCII Unit Separator (0x1f); fields end
    /// with ASCII Record Separator (0x1e).
    fn compute_hash(name: &str, fields: &[FieldDescriptor]) -> String {
        const UNIT: u8 = 0x1f;
        const RECORD: u8 = 0x1e;

        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update([RECORD]);
        for field in fields {
            hasher.update(field.name.as_bytes());
            hasher.update([UNIT]);
            hasher.update((field.index as u64).to_le_bytes());
            hasher.update([UNIT]);
            hasher.update(field.field_type.as_str().as_bytes());
            hasher.update([UNIT]);
            hasher.update([field.nullable as u8]);
            for sentinel in &field.null_sentinels {
                hasher.update([UNIT]);
                hasher.update(sentinel.as_bytes());
            }
            hasher.update([RECORD]);
        }
        hex::encode(hasher.finalize())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors in record order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed schema.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// SHA-256 of the schema definition (hex), for quick comparison
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Record position of the field with the given name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Smallest row length that satisfies every column reference.
    pub fn min_row_len(&self) -> usize {
        self.fields.iter().map(|f| f.index + 1).max().unwrap_or(0)
    }

    /// Convert back to the declaration surface, e.g. to write it to disk.
    pub fn to_definition(&self) -> SchemaDefinition {
        SchemaDefinition {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| FieldDefinition {
                    name: f.name.clone(),
                    index: f.index,
                    field_type: f.field_type,
                    nullable: f.nullable,
                    null_sentinels: f
                        .nullable
                        .then(|| f.null_sentinels.iter().cloned().collect()),
                    description: f.description.clone(),
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn validate_fields(schema: &str, fields: &[FieldDescriptor]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
    for (position, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(SchemaError::EmptyFieldName { position });
        }
        if let Some(first) = seen.insert(field.name.as_str(), position) {
            return Err(SchemaError::DuplicateField {
                name: field.name.clone(),
                first,
                second: position,
            });
        }
        if !field.nullable && !field.null_sentinels.is_empty() {
            return Err(SchemaError::SentinelsOnRequiredField {
                name: field.name.clone(),
            });
        }
        if field.nullable && field.null_sentinels.is_empty() {
            warn!(
                schema = %schema,
                field = %field.name,
                "nullable field has no null sentinels and can never decode to null"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colbind_protocol::FieldType;

    fn sample_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::required("str", 0, FieldType::String),
            FieldDescriptor::optional("opt_str", 1, FieldType::String),
            FieldDescriptor::required("integer", 2, FieldType::Integer),
            FieldDescriptor::required("floater", 3, FieldType::Float),
            FieldDescriptor::required("bool", 4, FieldType::Boolean),
            FieldDescriptor::optional("opt_int", 5, FieldType::Integer),
        ]
    }

    #[test]
    fn test_create_schema() {
        let schema = Schema::new("sample", sample_fields()).unwrap();

        assert_eq!(schema.name(), "sample");
        assert_eq!(schema.len(), 6);
        assert!(!schema.is_empty());
        assert_eq!(schema.min_row_len(), 6);
        assert_eq!(schema.content_hash().len(), 64);
        assert_eq!(schema.position_of("floater"), Some(3));
        assert_eq!(schema.field("opt_int").map(|f| f.index), Some(5));
        assert!(schema.field("missing").is_none());
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["str", "opt_str", "integer", "floater", "bool", "opt_int"]
        );
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = Schema::new("nothing", Vec::new()).unwrap_err();
        assert!(matches!(err, SchemaError::Empty(ref name) if name == "nothing"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::new(
            "dup",
            vec![
                FieldDescriptor::required("a", 0, FieldType::String),
                FieldDescriptor::required("b", 1, FieldType::String),
                FieldDescriptor::required("a", 2, FieldType::Integer),
            ],
        )
        .unwrap_err();

        match err {
            SchemaError::DuplicateField { name, first, second } => {
                assert_eq!(name, "a");
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = Schema::new(
            "blank",
            vec![
                FieldDescriptor::required("ok", 0, FieldType::String),
                FieldDescriptor::required("", 1, FieldType::String),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::EmptyFieldName { position: 1 }));
    }

    #[test]
    fn test_sentinels_on_required_field_rejected() {
        let err = Schema::new(
            "strict",
            vec![FieldDescriptor::required("n", 0, FieldType::Integer).with_null_sentinels([""])],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::SentinelsOnRequiredField { ref name } if name == "n"));
    }

    #[test]
    fn test_nullable_without_sentinels_allowed() {
        let schema = Schema::new(
            "never_null",
            vec![FieldDescriptor::optional("n", 0, FieldType::Integer)
                .with_null_sentinels(Vec::<String>::new())],
        )
        .unwrap();
        assert!(!schema.fields()[0].is_null_token(""));
    }

    #[test]
    fn test_indices_may_repeat_and_be_unsorted() {
        let schema = Schema::new(
            "shuffled",
            vec![
                FieldDescriptor::required("last", 9, FieldType::String),
                FieldDescriptor::required("first", 0, FieldType::String),
                FieldDescriptor::required("first_again", 0, FieldType::String),
            ],
        )
        .unwrap();
        assert_eq!(schema.min_row_len(), 10);
        let indices: Vec<usize> = schema.into_iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![9, 0, 0]);
    }

    #[test]
    fn test_content_hash_is_deterministic() {
        let a = Schema::new("sample", sample_fields()).unwrap();
        let b = Schema::new("sample", sample_fields()).unwrap();
        assert_eq!(a.content_hash(), b.content_hash());

        let mut changed = sample_fields();
        changed[2].index = 7;
        let c = Schema::new("sample", changed).unwrap();
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_to_definition_round_trip() {
        let schema = Schema::new("sample", sample_fields()).unwrap();
        let rebuilt = schema.to_definition().into_schema().unwrap();
        assert_eq!(schema, rebuilt);
    }
}
