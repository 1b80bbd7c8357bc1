//! Normalized schema nodes produced by the converters
//!
//! A `Schema` value is always a finite tree. Sharing and cycles go through
//! `Reference` nodes that point at a component in the `ComponentRegistry`,
//! so two references with the same `ComponentId` denote the same schema.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumString};

use crate::constants::{
    COMPONENTS_SCHEMAS_PREFIX, OPENAPI_ARRAY, OPENAPI_OBJECT, OPENAPI_STRING,
};

/// Category of schema node
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SchemaKind {
    /// Scalar value (`integer`, `string`, ...)
    Primitive,
    /// Object with named properties
    Object,
    /// Array or collection with an `items` schema
    Array,
    /// String enumeration
    Enum,
    /// Link to a registry component
    Reference,
}

/// Index of a component slot in the registry arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    /// Position of the component in registration order
    pub const fn index(self) -> usize { self.0 }
}

/// Target of a `Reference` schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    /// Registry slot
    pub id:   ComponentId,
    /// Component name under `components.schemas`
    pub name: String,
}

/// One node of the schema graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Node category
    pub kind:        SchemaKind,
    /// `OpenAPI` type for primitives, component name for objects and enums
    pub name:        Option<String>,
    /// `OpenAPI` format qualifier (`int64`, `date-time`, ...)
    pub format:      Option<String>,
    /// Object properties
    pub properties:  BTreeMap<String, Schema>,
    /// Element schema for arrays and collections
    pub items:       Option<Box<Schema>>,
    /// Enum constants
    pub enum_values: Vec<String>,
    /// Component target for references
    pub reference:   Option<ComponentRef>,
}

impl Schema {
    fn empty(kind: SchemaKind) -> Self {
        Self {
            kind,
            name: None,
            format: None,
            properties: BTreeMap::new(),
            items: None,
            enum_values: Vec::new(),
            reference: None,
        }
    }

    /// Primitive named by its `OpenAPI` type
    pub fn primitive(openapi_type: impl Into<String>, format: Option<&str>) -> Self {
        Self {
            name: Some(openapi_type.into()),
            format: format.map(String::from),
            ..Self::empty(SchemaKind::Primitive)
        }
    }

    /// Object without properties
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::empty(SchemaKind::Object)
        }
    }

    /// Array with an optional element schema
    pub fn array(items: Option<Self>) -> Self {
        Self {
            items: items.map(Box::new),
            ..Self::empty(SchemaKind::Array)
        }
    }

    /// String enumeration
    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            enum_values: values,
            ..Self::empty(SchemaKind::Enum)
        }
    }

    /// Link to a registry component
    pub fn reference(target: ComponentRef) -> Self {
        Self {
            name: Some(target.name.clone()),
            reference: Some(target),
            ..Self::empty(SchemaKind::Reference)
        }
    }

    /// Registry component this node links to
    pub fn component_id(&self) -> Option<ComponentId> {
        self.reference.as_ref().map(|target| target.id)
    }

    /// Replace the element schema
    pub fn set_items(&mut self, items: Option<Self>) { self.items = items.map(Box::new); }

    /// Element schema, if any
    pub fn items(&self) -> Option<&Self> { self.items.as_deref() }

    /// Add a property, returning the schema it replaced
    pub fn insert_property(&mut self, name: impl Into<String>, schema: Self) -> Option<Self> {
        self.properties.insert(name.into(), schema)
    }

    /// Look up a property
    pub fn property(&self, name: &str) -> Option<&Self> { self.properties.get(name) }
}

/// Serializes to the `OpenAPI` schema object shape
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        match self.kind {
            SchemaKind::Reference => {
                let target = self.reference.as_ref().map_or_else(
                    || self.name.clone().unwrap_or_default(),
                    |target| target.name.clone(),
                );
                let reference = format!("{COMPONENTS_SCHEMAS_PREFIX}{target}");
                if self.items.is_some() {
                    // `OpenAPI` ignores siblings of `$ref`, so keep `items` visible via `allOf`
                    map.serialize_entry("allOf", &[serde_json::json!({ "$ref": reference })])?;
                } else {
                    map.serialize_entry("$ref", &reference)?;
                }
            }
            SchemaKind::Primitive => {
                if let Some(openapi_type) = &self.name {
                    map.serialize_entry("type", openapi_type)?;
                }
                if let Some(format) = &self.format {
                    map.serialize_entry("format", format)?;
                }
            }
            SchemaKind::Object => {
                map.serialize_entry("type", OPENAPI_OBJECT)?;
                if let Some(title) = &self.name {
                    map.serialize_entry("title", title)?;
                }
                if !self.properties.is_empty() {
                    map.serialize_entry("properties", &self.properties)?;
                }
            }
            SchemaKind::Array => {
                map.serialize_entry("type", OPENAPI_ARRAY)?;
            }
            SchemaKind::Enum => {
                map.serialize_entry("type", OPENAPI_STRING)?;
                if let Some(title) = &self.name {
                    map.serialize_entry("title", title)?;
                }
                map.serialize_entry("enum", &self.enum_values)?;
            }
        }

        // `OpenAPI` requires `items` on arrays even when the element type is unknown
        match (&self.items, self.kind) {
            (Some(items), _) => map.serialize_entry("items", items)?,
            (None, SchemaKind::Array) => {
                map.serialize_entry("items", &serde_json::Map::new())?;
            }
            (None, _) => {}
        }

        map.end()
    }
}
