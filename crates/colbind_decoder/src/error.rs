//! Decode Errors
//!
//! A failed field is a [`DecodeError`]. A failed row is a [`RowDecodeError`]:
//! either the single first failure (fail-fast) or an
//! [`AggregateDecodeError`] listing every failed field in schema order.

use colbind_protocol::CoercionError;
use colbind_schema::FieldDescriptor;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single field failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrorKind {
    /// The field's column index is past the end of the row
    MissingColumn,

    /// Token is not a base-10 i64
    InvalidInteger,

    /// Token is not a finite decimal float
    InvalidFloat,

    /// Token is outside the boolean vocabulary
    InvalidBoolean,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::MissingColumn => write!(f, "Missing column"),
            DecodeErrorKind::InvalidInteger => write!(f, "Invalid integer"),
            DecodeErrorKind::InvalidFloat => write!(f, "Invalid float"),
            DecodeErrorKind::InvalidBoolean => write!(f, "Invalid boolean"),
        }
    }
}

impl From<CoercionError> for DecodeErrorKind {
    fn from(err: CoercionError) -> Self {
        match err {
            CoercionError::InvalidInteger => DecodeErrorKind::InvalidInteger,
            CoercionError::InvalidFloat => DecodeErrorKind::InvalidFloat,
            CoercionError::InvalidBoolean => DecodeErrorKind::InvalidBoolean,
        }
    }
}

/// A single field that failed to decode.
///
/// Holds everything needed to render a message without the source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeError {
    /// Position of the field in the schema (and in the record)
    pub position: usize,

    /// Output field name
    pub field: String,

    /// Source column index the field reads from
    pub column: usize,

    /// The raw token, `None` when the column was missing
    pub token: Option<String>,

    /// Number of tokens in the row
    pub row_len: usize,

    /// Type of failure
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    /// Create a missing column error
    pub fn missing_column(position: usize, field: &FieldDescriptor, row_len: usize) -> Self {
        Self {
            position,
            field: field.name.clone(),
            column: field.index,
            token: None,
            row_len,
            kind: DecodeErrorKind::MissingColumn,
        }
    }

    /// Create an error for a token that failed type coercion
    pub fn invalid_token(
        position: usize,
        field: &FieldDescriptor,
        token: impl Into<String>,
        row_len: usize,
        kind: impl Into<DecodeErrorKind>,
    ) -> Self {
        Self {
            position,
            field: field.name.clone(),
            column: field.index,
            token: Some(token.into()),
            row_len,
            kind: kind.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in field '{}' (position {}, column {})",
            self.kind, self.field, self.position, self.column
        )?;
        match &self.token {
            Some(token) => write!(f, ": got '{}'", token),
            None => write!(f, ": row has only {} columns", self.row_len),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Every field failure of one row, in schema order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateDecodeError {
    errors: Vec<DecodeError>,
}

impl AggregateDecodeError {
    /// Wrap a non-empty list of field failures.
    ///
    /// Returns `None` for an empty list.
    pub fn new(errors: Vec<DecodeError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<DecodeError> {
        self.errors
    }
}

impl fmt::Display for AggregateDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed to decode", self.errors.len())?;
        for (idx, err) in self.errors.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateDecodeError {}

/// Result of a failed row decode.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowDecodeError {
    /// First failing field (fail-fast policy)
    #[error(transparent)]
    Field(#[from] DecodeError),

    /// All failing fields (accumulate-all policy)
    #[error(transparent)]
    Aggregate(#[from] AggregateDecodeError),
}

impl RowDecodeError {
    /// Field failures in schema order.
    pub fn errors(&self) -> &[DecodeError] {
        match self {
            RowDecodeError::Field(err) => std::slice::from_ref(err),
            RowDecodeError::Aggregate(agg) => agg.errors(),
        }
    }

    /// The first failure in schema order.
    pub fn first(&self) -> &DecodeError {
        match self {
            RowDecodeError::Field(err) => err,
            RowDecodeError::Aggregate(agg) => &agg.errors[0],
        }
    }
}
