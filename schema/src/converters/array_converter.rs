//! Converter for fixed arrays (`Foo[]`)
//!
//! **Recursion**: YES - the component type is resolved through the manager.

use tracing::debug;

use super::SchemaConverter;
use crate::error::{Error, Result};
use crate::manager::ConversionManager;
use crate::schema::Schema;
use crate::type_descriptor::{TypeDefinition, TypeShape};

/// Converts `Array` shapes into `Array` schemas with resolved items
pub struct ArrayConverter;

impl SchemaConverter for ArrayConverter {
    fn name(&self) -> &'static str { "array" }

    fn can_convert(&self, ty: &TypeDefinition) -> bool {
        matches!(ty.shape, TypeShape::Array { .. })
    }

    fn convert(
        &self,
        ty: &TypeDefinition,
        manager: &mut ConversionManager,
    ) -> Result<Option<Schema>> {
        let TypeShape::Array { component } = &ty.shape else {
            return Err(Error::conversion_failed(&ty.name, "definition is not an array").into());
        };

        let items = manager.convert_type_descriptor(component);
        if items.is_none() {
            debug!(
                type_name = %ty.name,
                component = %component,
                "Array component is not representable - items left open"
            );
        }

        Ok(Some(Schema::array(items)))
    }
}
