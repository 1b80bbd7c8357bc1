//! # API Schema
//!
//! Converts runtime type descriptors into an `OpenAPI`-style schema graph.
//!
//! A [`ConversionManager`] owns one conversion session. It resolves each
//! [`TypeDescriptor`] against a [`TypeCatalog`] of reflection metadata,
//! dispatches to the first [`SchemaConverter`] that claims the type, and
//! recursively resolves generic type arguments. Named types (beans, enums) are
//! built once into the session's [`ComponentRegistry`] and referenced from
//! everywhere else, which is also how self-referential types terminate.
//!
//! ```
//! use api_schema::{ConversionManager, TypeCatalog};
//!
//! let mut manager = ConversionManager::new(TypeCatalog::new());
//! let schema = manager.convert_signature("java.util.List<java.lang.String>");
//! assert!(matches!(schema, Ok(Some(_))));
//! ```

mod config;
mod constants;
pub mod converters;
mod diagnostics;
mod document;
mod error;
mod manager;
mod registry;
mod schema;
pub mod support;
mod type_descriptor;

pub use config::ConversionConfig;
pub use constants::{MAX_SIGNATURE_NESTING, MAX_TYPE_RECURSION_DEPTH, RecursionDepth};
pub use converters::{SchemaConverter, default_converters};
pub use diagnostics::{Diagnostic, DiagnosticCode};
pub use document::{ApiSchemaDocument, Components};
pub use error::{Error, Result};
pub use manager::ConversionManager;
pub use registry::{ComponentRegistry, RegistryCheckpoint, Reservation};
pub use schema::{ComponentId, ComponentRef, Schema, SchemaKind};
pub use type_descriptor::{
    FieldDefinition, TypeCatalog, TypeDefinition, TypeDescriptor, TypeName, TypeShape,
    parse_signature,
};
