//! `OpenAPI`-shaped output of a conversion session
//!
//! Root schemas are keyed by the signature they were requested with, shared
//! components live under `components.schemas` and are linked with `$ref`.

use std::collections::BTreeMap;

use error_stack::ResultExt;
use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::registry::ComponentRegistry;
use crate::schema::Schema;

/// Named component definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Components {
    /// Component schemas by component name
    pub schemas: BTreeMap<String, Schema>,
}

/// Everything one session produced, ready for emission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiSchemaDocument {
    /// Requested roots; `null` for types nothing could represent
    pub schemas:     BTreeMap<String, Option<Schema>>,
    /// Shared components referenced from the roots
    pub components:  Components,
    /// Non-fatal problems seen while converting
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ApiSchemaDocument {
    /// Collect the populated components of `registry`
    pub fn from_registry(registry: &ComponentRegistry, diagnostics: &[Diagnostic]) -> Self {
        let schemas = registry
            .iter()
            .map(|(name, schema)| (name.to_string(), schema.clone()))
            .collect();

        Self {
            schemas:     BTreeMap::new(),
            components:  Components { schemas },
            diagnostics: diagnostics.to_vec(),
        }
    }

    /// Record the result for one requested root
    pub fn insert_root(&mut self, key: impl Into<String>, schema: Option<Schema>) {
        self.schemas.insert(key.into(), schema);
    }

    /// Encode as a JSON value
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .change_context(Error::Serialization("schema document".to_string()))
    }

    /// Encode as indented JSON text
    pub fn to_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .change_context(Error::Serialization("schema document".to_string()))
    }
}
