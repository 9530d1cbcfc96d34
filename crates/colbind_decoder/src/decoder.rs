//! The record decoder

use colbind_protocol::{FieldType, Value};
use colbind_schema::{FieldDescriptor, Schema};
use std::sync::Arc;

use crate::config::{DecoderConfig, ErrorPolicy};
use crate::error::{AggregateDecodeError, DecodeError, RowDecodeError};
use crate::record::Record;

/// Decodes rows of raw tokens against one schema.
///
/// Cheap to clone and safe to share across threads: the schema and field
/// names are behind `Arc`s and nothing is mutated after construction.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    schema: Arc<Schema>,
    names: Arc<[String]>,
    config: DecoderConfig,
}

impl RecordDecoder {
    /// Create a decoder with the default configuration (accumulate-all).
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self::with_config(schema, DecoderConfig::default())
    }

    pub fn with_config(schema: impl Into<Arc<Schema>>, config: DecoderConfig) -> Self {
        let schema = schema.into();
        let names = field_names(&schema);
        Self {
            schema,
            names,
            config,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one row.
    ///
    /// Tokens past the highest referenced column are ignored.
    pub fn decode<S: AsRef<str>>(&self, row: &[S]) -> Result<Record, RowDecodeError> {
        decode_row(&self.schema, &self.names, &self.config, row)
    }

    /// Decode a row given as any iterator of tokens.
    pub fn decode_tokens<I, S>(&self, tokens: I) -> Result<Record, RowDecodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row: Vec<S> = tokens.into_iter().collect();
        self.decode(&row)
    }

    /// Decode a record produced by a `csv` reader. Tokens are borrowed, not copied.
    #[cfg(feature = "csv")]
    pub fn decode_csv(&self, record: &csv::StringRecord) -> Result<Record, RowDecodeError> {
        self.decode_tokens(record.iter())
    }
}

/// Decode one row against `schema` with the default configuration.
pub fn decode<S: AsRef<str>>(schema: &Schema, row: &[S]) -> Result<Record, RowDecodeError> {
    decode_with(schema, &DecoderConfig::default(), row)
}

/// Decode one row against `schema` with an explicit configuration.
///
/// Prefer a [`RecordDecoder`] when decoding many rows; it builds the shared
/// field-name list once instead of per call.
pub fn decode_with<S: AsRef<str>>(
    schema: &Schema,
    config: &DecoderConfig,
    row: &[S],
) -> Result<Record, RowDecodeError> {
    decode_row(schema, &field_names(schema), config, row)
}

fn field_names(schema: &Schema) -> Arc<[String]> {
    schema.field_names().map(String::from).collect()
}

fn decode_row<S: AsRef<str>>(
    schema: &Schema,
    names: &Arc<[String]>,
    config: &DecoderConfig,
    row: &[S],
) -> Result<Record, RowDecodeError> {
    let mut values = Vec::with_capacity(schema.len());
    let mut errors = Vec::new();

    for (position, field) in schema.fields().iter().enumerate() {
        match decode_field(position, field, config, row) {
            Ok(value) => values.push(value),
            Err(err) => match config.policy {
                ErrorPolicy::FailFast => return Err(RowDecodeError::Field(err)),
                ErrorPolicy::AccumulateAll => errors.push(err),
            },
        }
    }

    match AggregateDecodeError::new(errors) {
        Some(aggregate) => Err(RowDecodeError::Aggregate(aggregate)),
        None => Ok(Record::new(Arc::clone(names), values)),
    }
}

fn decode_field<S: AsRef<str>>(
    position: usize,
    field: &FieldDescriptor,
    config: &DecoderConfig,
    row: &[S],
) -> Result<Value, DecodeError> {
    let raw = match row.get(field.index) {
        Some(token) => token.as_ref(),
        None => return Err(DecodeError::missing_column(position, field, row.len())),
    };

    if field.is_null_token(raw) {
        return Ok(Value::Null);
    }

    let token = if config.trim_whitespace && field.field_type != FieldType::String {
        raw.trim()
    } else {
        raw
    };

    field
        .field_type
        .coerce(token, config.boolean)
        .map_err(|err| DecodeError::invalid_token(position, field, raw, row.len(), err))
}
