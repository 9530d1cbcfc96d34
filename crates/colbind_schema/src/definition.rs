//! Schema declaration files
//!
//! The declaration surface mirrors [`FieldDescriptor`] with serde defaults:
//!
//! ```toml
//! name = "sample"
//!
//! [[fields]]
//! name = "opt_int"
//! index = 5
//! type = "integer"
//! nullable = true          # default false
//! null_sentinels = [""]    # default [""] when nullable, [] otherwise
//! ```
//!
//! JSON with the same shape is accepted. Unknown top-level tables are
//! ignored so a schema can live inside a larger decoder declaration, but an
//! unknown key inside a `[[fields]]` entry is an error.

use colbind_protocol::FieldType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::descriptor::FieldDescriptor;
use crate::error::{Result, SchemaError};
use crate::schema::Schema;

/// Serde-facing form of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Human-readable name (e.g., "transactions")
    pub name: String,

    /// Field declarations, in record order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Serde-facing form of a [`FieldDescriptor`]. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub name: String,

    pub index: usize,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub nullable: bool,

    /// `None` means "use the default for this nullability".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_sentinels: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn into_descriptor(self) -> FieldDescriptor {
        let sentinels = match (self.nullable, self.null_sentinels) {
            (_, Some(explicit)) => explicit,
            (true, None) => vec![String::new()],
            (false, None) => Vec::new(),
        };
        let descriptor = FieldDescriptor::new(
            self.name,
            self.index,
            self.field_type,
            self.nullable,
            sentinels,
        );
        match self.description {
            Some(desc) => descriptor.with_description(desc),
            None => descriptor,
        }
    }
}

impl SchemaDefinition {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the declaration and build the immutable schema.
    pub fn into_schema(self) -> Result<Schema> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldDefinition::into_descriptor)
            .collect();
        Schema::new(self.name, fields)
    }
}

/// Format of a declaration file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    Toml,
    Json,
}

impl DeclarationFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(DeclarationFormat::Toml),
            "json" => Ok(DeclarationFormat::Json),
            _ => Err(SchemaError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        match self {
            DeclarationFormat::Toml => Ok(toml::from_str(content)?),
            DeclarationFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Read and deserialize any declaration file (schema or a document embedding one).
pub fn read_declaration<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DeclarationFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "reading declaration");
    let content = std::fs::read_to_string(path)?;
    format.parse(&content)
}

/// Load and validate a schema from a `.toml` or `.json` declaration file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let definition: SchemaDefinition = read_declaration(path)?;
    let schema = definition.into_schema()?;
    info!(
        path = %path.display(),
        schema = %schema.name(),
        fields = schema.len(),
        hash = %schema.content_hash(),
        "loaded schema"
    );
    Ok(schema)
}
