//! Error types for schema construction and loading.

use thiserror::Error;

/// Schema operation result type.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while building or loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema '{0}' declares no fields")]
    Empty(String),

    #[error("Field at position {position} has an empty name")]
    EmptyFieldName { position: usize },

    #[error("Duplicate field name '{name}' at positions {first} and {second}")]
    DuplicateField {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Field '{name}' is not nullable but declares null sentinels")]
    SentinelsOnRequiredField { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported declaration format: '{0}'. Expected a .toml or .json file")]
    UnsupportedFormat(String),
}
