//! Converter for enumerations
//!
//! **Recursion**: NO - constants are plain strings. The enum is still published
//! as a component so every use of it shares one schema.

use super::SchemaConverter;
use crate::error::{Error, Result};
use crate::manager::ConversionManager;
use crate::registry::ComponentRegistry;
use crate::schema::Schema;
use crate::type_descriptor::{TypeDefinition, TypeShape};

/// Converts `Enum` shapes into string enumeration components
pub struct EnumConverter;

impl SchemaConverter for EnumConverter {
    fn name(&self) -> &'static str { "enum" }

    fn can_convert(&self, ty: &TypeDefinition) -> bool {
        matches!(ty.shape, TypeShape::Enum { .. })
    }

    fn convert(
        &self,
        ty: &TypeDefinition,
        manager: &mut ConversionManager,
    ) -> Result<Option<Schema>> {
        let TypeShape::Enum { constants } = &ty.shape else {
            return Err(Error::conversion_failed(&ty.name, "definition is not an enum").into());
        };

        ComponentRegistry::get_or_create(manager, &ty.name, |manager, id| {
            let title = manager
                .registry()
                .component_name(id)
                .unwrap_or_else(|| ty.name.short_name())
                .to_string();
            Ok(Some(Schema::enumeration(title, constants.clone())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_descriptor::TypeCatalog;

    #[test]
    fn test_enum_is_shared_component() {
        let status = TypeDefinition::enumeration("com.acme.Status", ["OPEN", "CLOSED"]);
        let mut manager = ConversionManager::new(TypeCatalog::new());

        let first = EnumConverter.convert(&status, &mut manager).ok().flatten();
        let second = EnumConverter.convert(&status, &mut manager).ok().flatten();
        assert_eq!(first, second);
        assert_eq!(manager.registry().len(), 1);

        let component = first
            .as_ref()
            .and_then(Schema::component_id)
            .and_then(|id| manager.registry().get(id));
        assert_eq!(
            component.map(|schema| schema.enum_values.clone()),
            Some(vec!["OPEN".to_string(), "CLOSED".to_string()])
        );
    }
}
