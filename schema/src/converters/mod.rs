//! Per-category schema converters
//!
//! Each converter claims one category of nominal type through `can_convert`
//! and builds its schema in `convert`. The manager only ever talks to them
//! through `SchemaConverter`, in the order `default_converters` returns.

mod array_converter;
mod bean_converter;
mod collection_converter;
mod enum_converter;
mod primitive_converter;

pub use array_converter::ArrayConverter;
pub use bean_converter::BeanConverter;
pub use collection_converter::CollectionConverter;
pub use enum_converter::EnumConverter;
pub use primitive_converter::PrimitiveConverter;

use crate::error::Result;
use crate::manager::ConversionManager;
use crate::schema::Schema;
use crate::type_descriptor::TypeDefinition;

/// Capability contract shared by every converter
///
/// Converters hold no state of their own. Anything they need to share across
/// a session (components, recursion) goes through the `ConversionManager`
/// handed to `convert`.
pub trait SchemaConverter: Send + Sync {
    /// Stable identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this converter handles `ty`
    ///
    /// Must be side-effect free and must not fail for well-formed definitions.
    fn can_convert(&self, ty: &TypeDefinition) -> bool;

    /// Build the schema for a type this converter claimed
    ///
    /// `Ok(None)` means "tried, nothing produced" and lets the manager move on
    /// to the next converter. An `Err` is reported as a converter fault; any
    /// registry changes made during the attempt are discarded.
    fn convert(&self, ty: &TypeDefinition, manager: &mut ConversionManager)
    -> Result<Option<Schema>>;
}

/// The standard converters in priority order
///
/// Categories overlap under a naive structural check, so order matters: the
/// first converter whose `can_convert` accepts a type wins.
pub fn default_converters() -> Vec<Box<dyn SchemaConverter>> {
    vec![
        Box::new(PrimitiveConverter),
        Box::new(BeanConverter),
        Box::new(ArrayConverter),
        Box::new(CollectionConverter),
        Box::new(EnumConverter),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let names: Vec<&str> = default_converters()
            .iter()
            .map(|converter| converter.name())
            .collect();
        assert_eq!(
            names,
            vec!["primitive", "bean", "array", "collection", "enum"]
        );
    }
}
