//! Converter for primitives, their wrappers and other scalar library types
//!
//! **Recursion**: NO - scalars map straight to an `OpenAPI` type/format pair.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::SchemaConverter;
use crate::constants::{
    OPENAPI_BOOLEAN, OPENAPI_INTEGER, OPENAPI_NUMBER, OPENAPI_STRING, TYPE_BOOLEAN, TYPE_BYTE,
    TYPE_CHAR, TYPE_DOUBLE, TYPE_FLOAT, TYPE_INT, TYPE_JAVA_BIG_DECIMAL, TYPE_JAVA_BIG_INTEGER,
    TYPE_JAVA_BOOLEAN, TYPE_JAVA_BYTE, TYPE_JAVA_CHAR_SEQUENCE, TYPE_JAVA_CHARACTER,
    TYPE_JAVA_DATE, TYPE_JAVA_DOUBLE, TYPE_JAVA_FLOAT, TYPE_JAVA_INSTANT, TYPE_JAVA_INTEGER,
    TYPE_JAVA_LOCAL_DATE, TYPE_JAVA_LOCAL_DATE_TIME, TYPE_JAVA_LONG, TYPE_JAVA_SHORT,
    TYPE_JAVA_SQL_DATE, TYPE_JAVA_STRING, TYPE_JAVA_UUID, TYPE_LONG, TYPE_SHORT, TYPE_STRING,
};
use crate::error::Result;
use crate::manager::ConversionManager;
use crate::schema::Schema;
use crate::type_descriptor::TypeDefinition;

/// `OpenAPI` rendering of a scalar type
#[derive(Debug, Clone, Copy)]
struct PrimitiveFormat {
    openapi_type: &'static str,
    format:       Option<&'static str>,
}

impl PrimitiveFormat {
    const fn new(openapi_type: &'static str, format: Option<&'static str>) -> Self {
        Self {
            openapi_type,
            format,
        }
    }
}

/// Static map of scalar type names to their `OpenAPI` rendering
static PRIMITIVE_FORMATS: LazyLock<HashMap<&'static str, PrimitiveFormat>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // ===== Integers =====
    for name in [TYPE_BYTE, TYPE_JAVA_BYTE, TYPE_SHORT, TYPE_JAVA_SHORT, TYPE_INT, TYPE_JAVA_INTEGER] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_INTEGER, Some("int32")));
    }
    for name in [TYPE_LONG, TYPE_JAVA_LONG] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_INTEGER, Some("int64")));
    }
    map.insert(
        TYPE_JAVA_BIG_INTEGER,
        PrimitiveFormat::new(OPENAPI_INTEGER, None),
    );

    // ===== Floating point =====
    for name in [TYPE_FLOAT, TYPE_JAVA_FLOAT] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_NUMBER, Some("float")));
    }
    for name in [TYPE_DOUBLE, TYPE_JAVA_DOUBLE] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_NUMBER, Some("double")));
    }
    map.insert(
        TYPE_JAVA_BIG_DECIMAL,
        PrimitiveFormat::new(OPENAPI_NUMBER, None),
    );

    // ===== Booleans =====
    for name in [TYPE_BOOLEAN, TYPE_JAVA_BOOLEAN] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_BOOLEAN, None));
    }

    // ===== Strings =====
    for name in [
        TYPE_CHAR,
        TYPE_JAVA_CHARACTER,
        TYPE_STRING,
        TYPE_JAVA_STRING,
        TYPE_JAVA_CHAR_SEQUENCE,
    ] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_STRING, None));
    }
    map.insert(
        TYPE_JAVA_UUID,
        PrimitiveFormat::new(OPENAPI_STRING, Some("uuid")),
    );

    // ===== Dates =====
    for name in [TYPE_JAVA_SQL_DATE, TYPE_JAVA_LOCAL_DATE] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_STRING, Some("date")));
    }
    for name in [TYPE_JAVA_DATE, TYPE_JAVA_LOCAL_DATE_TIME, TYPE_JAVA_INSTANT] {
        map.insert(name, PrimitiveFormat::new(OPENAPI_STRING, Some("date-time")));
    }

    map
});

/// Converts scalar types by name
pub struct PrimitiveConverter;

impl SchemaConverter for PrimitiveConverter {
    fn name(&self) -> &'static str { "primitive" }

    fn can_convert(&self, ty: &TypeDefinition) -> bool {
        PRIMITIVE_FORMATS.contains_key(ty.name.as_str())
    }

    fn convert(
        &self,
        ty: &TypeDefinition,
        _manager: &mut ConversionManager,
    ) -> Result<Option<Schema>> {
        Ok(PRIMITIVE_FORMATS
            .get(ty.name.as_str())
            .map(|primitive| Schema::primitive(primitive.openapi_type, primitive.format)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;
    use crate::type_descriptor::{TypeCatalog, TypeShape};

    fn convert(name: &str) -> Option<Schema> {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        PrimitiveConverter
            .convert(&TypeDefinition::value(name), &mut manager)
            .ok()
            .flatten()
    }

    #[test]
    fn test_int_is_integer() {
        let schema = convert("int");
        assert_eq!(schema.as_ref().map(|s| s.kind), Some(SchemaKind::Primitive));
        assert_eq!(
            schema.as_ref().and_then(|s| s.name.as_deref()),
            Some("integer")
        );
        assert_eq!(
            schema.as_ref().and_then(|s| s.format.as_deref()),
            Some("int32")
        );
    }

    #[test]
    fn test_wrappers_match_primitives() {
        assert_eq!(convert("java.lang.Long"), convert("long"));
        assert_eq!(convert("java.lang.Boolean"), convert("boolean"));
        assert_eq!(convert("String"), convert("java.lang.String"));
        assert_eq!(
            convert("java.util.Date").and_then(|s| s.format),
            Some("date-time".to_string())
        );
    }

    #[test]
    fn test_claims_by_name_only() {
        assert!(PrimitiveConverter.can_convert(&TypeDefinition::value("double")));
        assert!(!PrimitiveConverter.can_convert(&TypeDefinition::value("com.acme.Handle")));
        assert!(!PrimitiveConverter.can_convert(&TypeDefinition::new(
            "com.acme.Order",
            TypeShape::Bean { fields: vec![] }
        )));
    }
}
