//! Colbind Protocol Types
//!
//! Canonical definitions shared by the schema and decoder crates:
//!
//! - [`FieldType`]: the closed set of primitive kinds a field can declare
//! - [`Value`]: a decoded, typed value (or an explicit null)
//! - [`coerce`]: the exact parsing rules that turn a raw token into a [`Value`]
//!
//! Parsing is deliberately strict. There is no locale handling, no thousands
//! separators, no leading `+` and no whitespace tolerance. The boolean
//! vocabulary is a fixed constant selected through [`BooleanVocabulary`].

pub mod coerce;
pub mod types;

pub use coerce::{BooleanVocabulary, CoercionError};
pub use types::{FieldType, Value};
