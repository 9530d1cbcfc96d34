//! Positional Record Decoder
//!
//! Turns one row of already-tokenized text into a typed [`Record`], driven by
//! an immutable [`Schema`]:
//!
//! 1. **Column lookup**: the token at the field's column index, or `MissingColumn`
//! 2. **Null check**: nullable fields map their null sentinels to [`Value::Null`]
//! 3. **Coercion**: the token is parsed as the declared [`FieldType`]
//! 4. **Assembly**: values are placed in schema order
//!
//! There are no silent defaults. A field either decodes, decodes to null, or
//! the row fails with a typed error. Under [`ErrorPolicy::AccumulateAll`]
//! (the default) every failing field is reported; under
//! [`ErrorPolicy::FailFast`] the first failure ends the row.
//!
//! Decoding never logs and never touches shared mutable state, so a single
//! [`RecordDecoder`] can be shared across threads. Logging belongs to the
//! caller; [`DecodeReport::log_summary`] is provided for batch callers.
//!
//! # Modules
//!
//! - [`decoder`]: The decoder and the free [`decode`] function
//! - [`record`]: Decoded records
//! - [`error`]: Per-field and per-row decode errors
//! - [`config`]: Error policy, parsing options and decoder declaration files
//! - [`batch`]: Sequential and parallel multi-row decoding with a report

pub mod batch;
pub mod config;
pub mod decoder;
pub mod error;
pub mod record;

pub use batch::{DecodeReport, DecodeSummary, RowFailure};
pub use config::{load_decoder, DecoderConfig, DecoderSpec, ErrorPolicy};
pub use decoder::{decode, decode_with, RecordDecoder};
pub use error::{AggregateDecodeError, DecodeError, DecodeErrorKind, RowDecodeError};
pub use record::Record;

pub use colbind_protocol::{BooleanVocabulary, FieldType, Value};
pub use colbind_schema::{FieldDescriptor, Schema, SchemaError};
