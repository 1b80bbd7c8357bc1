//! Explicit value model of the runtime types handed to the converter
//!
//! The reflection layer turns live type metadata into `TypeDescriptor` values
//! once; everything downstream works on these plain values.

mod catalog;
mod type_name;
mod type_parser;

use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use catalog::{FieldDefinition, TypeCatalog, TypeDefinition, TypeShape};
pub use type_name::TypeName;
pub use type_parser::parse_signature;

use crate::error::{Error, Result};

/// A type to convert: either a plain nominal type or a generic instantiation
///
/// Serialized as its signature text, e.g. `"java.util.Map<String, com.acme.Item>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDescriptor {
    /// A nominal type with no type arguments to resolve
    Concrete(TypeName),
    /// A generic type together with its ordered type arguments
    Parameterized {
        /// The generic (raw) type
        raw:       TypeName,
        /// Type arguments in declaration order
        arguments: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Create a concrete descriptor
    pub fn concrete(type_name: impl Into<TypeName>) -> Self { Self::Concrete(type_name.into()) }

    /// Create a parameterized descriptor
    pub fn parameterized(raw: impl Into<TypeName>, arguments: Vec<Self>) -> Self {
        Self::Parameterized {
            raw: raw.into(),
            arguments,
        }
    }

    /// The nominal type: the type itself for concrete descriptors, the raw
    /// type for parameterized ones
    pub const fn raw_name(&self) -> &TypeName {
        match self {
            Self::Concrete(type_name) | Self::Parameterized { raw: type_name, .. } => type_name,
        }
    }

    /// Type arguments, empty for concrete descriptors
    pub fn arguments(&self) -> &[Self] {
        match self {
            Self::Concrete(_) => &[],
            Self::Parameterized { arguments, .. } => arguments,
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Concrete(type_name) => write!(f, "{type_name}"),
            Self::Parameterized { raw, arguments } => {
                write!(f, "{raw}<{}>", arguments.iter().join(", "))
            }
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = error_stack::Report<Error>;

    fn from_str(s: &str) -> Result<Self> { parse_signature(s) }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = error_stack::Report<Error>;

    fn try_from(value: String) -> Result<Self> { parse_signature(&value) }
}

impl From<TypeDescriptor> for String {
    fn from(descriptor: TypeDescriptor) -> Self { descriptor.to_string() }
}

impl From<TypeName> for TypeDescriptor {
    fn from(type_name: TypeName) -> Self { Self::Concrete(type_name) }
}
