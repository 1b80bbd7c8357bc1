//! Converter for collection-like containers (`List`, `Set`, `Map`, ...)
//!
//! **Recursion**: NO - a raw collection knows nothing about its elements. When
//! the collection appears as a parameterized type the manager fills `items`
//! from the last type argument afterwards.

use super::SchemaConverter;
use crate::error::Result;
use crate::manager::ConversionManager;
use crate::schema::Schema;
use crate::type_descriptor::{TypeDefinition, TypeShape};

/// Converts `Collection` shapes into `Array` schemas without items
pub struct CollectionConverter;

impl SchemaConverter for CollectionConverter {
    fn name(&self) -> &'static str { "collection" }

    fn can_convert(&self, ty: &TypeDefinition) -> bool {
        matches!(ty.shape, TypeShape::Collection)
    }

    fn convert(
        &self,
        _ty: &TypeDefinition,
        _manager: &mut ConversionManager,
    ) -> Result<Option<Schema>> {
        Ok(Some(Schema::array(None)))
    }
}
