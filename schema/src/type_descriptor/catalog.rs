//! Reflection metadata for nominal types
//!
//! The catalog plays the role of the live type system: converters ask it what
//! shape a `TypeName` has (bean fields, enum constants, array component).
//! Names the catalog has never seen resolve to an opaque `Value` shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{TypeDescriptor, TypeName, parse_signature};
use crate::constants::COLLECTION_TYPES;
use crate::error::{Error, Result};

/// A declared field of a bean-like type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Property name as exposed by the API
    pub name: String,
    /// Declared (possibly generic) field type
    #[serde(rename = "type")]
    pub ty:   TypeDescriptor,
}

impl FieldDefinition {
    /// Create a field definition
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Structural category of a nominal type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// No structural information (primitives, wrappers, opaque handles)
    Value,
    /// Enumeration with its constants in declaration order
    Enum {
        /// Constant names
        constants: Vec<String>,
    },
    /// Fixed array of `component`
    Array {
        /// Element type
        component: TypeDescriptor,
    },
    /// Collection-like container; elements come from type arguments
    Collection,
    /// Bean-like object with named fields
    Bean {
        /// Declared fields in declaration order
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
}

/// Everything the catalog knows about one nominal type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Fully-qualified type name
    pub name:  TypeName,
    /// Structural category
    pub shape: TypeShape,
}

impl TypeDefinition {
    /// Create a definition
    pub fn new(name: impl Into<TypeName>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Create a bean definition
    pub fn bean(name: impl Into<TypeName>, fields: Vec<FieldDefinition>) -> Self {
        Self::new(name, TypeShape::Bean { fields })
    }

    /// Create an enum definition
    pub fn enumeration<S: Into<String>>(
        name: impl Into<TypeName>,
        constants: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            TypeShape::Enum {
                constants: constants.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Create an opaque value definition
    pub fn value(name: impl Into<TypeName>) -> Self { Self::new(name, TypeShape::Value) }
}

/// Lookup table from type name to reflection metadata
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: HashMap<TypeName, TypeDefinition>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        let types = COLLECTION_TYPES
            .iter()
            .map(|name| {
                (
                    TypeName::from(*name),
                    TypeDefinition::new(*name, TypeShape::Collection),
                )
            })
            .collect();
        Self { types }
    }
}

impl TypeCatalog {
    /// Create a catalog seeded with the standard collection types
    pub fn new() -> Self { Self::default() }

    /// Build a catalog from application definitions on top of the standard ones
    ///
    /// Two application definitions with the same name are rejected; an
    /// application definition may override a seeded collection type.
    pub fn from_definitions(definitions: impl IntoIterator<Item = TypeDefinition>) -> Result<Self> {
        let mut catalog = Self::new();
        let mut seen = std::collections::HashSet::new();

        for definition in definitions {
            if !seen.insert(definition.name.clone()) {
                return Err(Error::Catalog(format!(
                    "type '{}' is defined more than once",
                    definition.name
                ))
                .into());
            }
            catalog.insert(definition);
        }

        Ok(catalog)
    }

    /// Add or replace a definition, returning the one it replaced
    pub fn insert(&mut self, definition: TypeDefinition) -> Option<TypeDefinition> {
        self.types.insert(definition.name.clone(), definition)
    }

    /// Look up a definition by exact name
    pub fn get(&self, type_name: &TypeName) -> Option<&TypeDefinition> { self.types.get(type_name) }

    /// Number of known definitions
    pub fn len(&self) -> usize { self.types.len() }

    /// Whether the catalog has no definitions
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    /// Resolve a name to a definition
    ///
    /// Array names (`Foo[]`) not registered explicitly get an `Array` shape
    /// whose component is parsed from the name. Anything else unknown is an
    /// opaque `Value`.
    pub fn resolve(&self, type_name: &TypeName) -> TypeDefinition {
        if let Some(definition) = self.types.get(type_name) {
            return definition.clone();
        }

        if let Some(component) = type_name.array_component() {
            match parse_signature(component) {
                Ok(component) => {
                    return TypeDefinition::new(type_name.clone(), TypeShape::Array { component });
                }
                Err(report) => {
                    warn!(
                        type_name = %type_name,
                        error = %report.current_context(),
                        "Array component signature did not parse - treating as opaque value"
                    );
                }
            }
        }

        TypeDefinition::value(type_name.clone())
    }
}
