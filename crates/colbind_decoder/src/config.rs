//! Decoder configuration
//!
//! A decoder declaration is a schema declaration plus an optional
//! `[decoder]` table:
//!
//! ```toml
//! name = "sample"
//!
//! [decoder]
//! policy = "accumulate_all"   # or "fail_fast"
//! trim_whitespace = false
//! boolean = "strict"          # or "extended"
//!
//! [[fields]]
//! name = "id"
//! index = 0
//! type = "integer"
//! ```

use colbind_protocol::BooleanVocabulary;
use colbind_schema::{read_declaration, DeclarationFormat, Result, SchemaDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::decoder::RecordDecoder;

/// What the decoder does when a field fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Decode every field and report all failures (default)
    #[default]
    AccumulateAll,

    /// Stop at the first failing field
    FailFast,
}

/// Parsing options shared by every field of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Error aggregation policy
    pub policy: ErrorPolicy,

    /// Trim whitespace from integer, float and boolean tokens before parsing.
    /// String values and null-sentinel matching always see the raw token.
    pub trim_whitespace: bool,

    /// Accepted boolean spellings
    pub boolean: BooleanVocabulary,
}

impl DecoderConfig {
    /// Default configuration with the fail-fast policy
    pub fn fail_fast() -> Self {
        Self::default().with_policy(ErrorPolicy::FailFast)
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    pub fn with_boolean_vocabulary(mut self, vocabulary: BooleanVocabulary) -> Self {
        self.boolean = vocabulary;
        self
    }
}

/// A schema declaration together with its decoder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderSpec {
    #[serde(flatten)]
    pub schema: SchemaDefinition,

    #[serde(default)]
    pub decoder: DecoderConfig,
}

impl DecoderSpec {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        DeclarationFormat::Toml.parse(content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        DeclarationFormat::Json.parse(content)
    }

    /// Validate the schema and build a ready decoder.
    pub fn into_decoder(self) -> Result<RecordDecoder> {
        let schema = self.schema.into_schema()?;
        Ok(RecordDecoder::with_config(schema, self.decoder))
    }
}

/// Load a decoder from a `.toml` or `.json` declaration file.
pub fn load_decoder(path: &Path) -> Result<RecordDecoder> {
    let spec: DecoderSpec = read_declaration(path)?;
    let decoder = spec.into_decoder()?;
    info!(
        path = %path.display(),
        schema = %decoder.schema().name(),
        fields = decoder.schema().len(),
        policy = ?decoder.config().policy,
        "loaded decoder"
    );
    Ok(decoder)
}
