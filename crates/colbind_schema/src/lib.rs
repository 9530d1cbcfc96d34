//! Positional Schemas
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s. Each descriptor
//! binds one output field to a source column index, a primitive
//! [`FieldType`] and a null policy. Schemas are declared up front, either in
//! code or in a TOML/JSON declaration file, and are immutable once built.
//!
//! Field order in the schema is the field order of every decoded record; it
//! is independent of the column indices the fields read from.
//!
//! # Modules
//!
//! - [`descriptor`]: Field descriptors and their constructors
//! - [`schema`]: The validated, immutable schema
//! - [`definition`]: Serde-facing declaration surface and file loading
//! - [`error`]: Schema construction and loading errors

pub mod definition;
pub mod descriptor;
pub mod error;
pub mod schema;

pub use definition::{
    load_schema, read_declaration, DeclarationFormat, FieldDefinition, SchemaDefinition,
};
pub use descriptor::FieldDescriptor;
pub use error::{Result, SchemaError};
pub use schema::Schema;

/// Canonical field types (shared across crates).
pub use colbind_protocol::{BooleanVocabulary, FieldType, Value};
