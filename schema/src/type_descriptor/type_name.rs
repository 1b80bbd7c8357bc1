//! A newtype wrapper for nominal type names used throughout the system
//!
//! `TypeName` represents a fully-qualified type name as reported by the
//! reflection layer (e.g. `com.acme.order.Order`, `java.util.List`,
//! `com.acme.Outer$Inner`, `com.acme.Item[]`). It is the identity the
//! component registry keys on.

use serde::{Deserialize, Serialize};

/// Suffix marking a one-dimensional array type name
const ARRAY_SUFFIX: &str = "[]";

/// A newtype wrapper for type names used as `HashMap` keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    pub fn as_str(&self) -> &str { &self.0 }

    /// Get the short name (last segment after `.`, `$` or `::`)
    /// For example: `com.acme.order.Order` returns `Order`,
    /// `com.acme.Outer$Inner` returns `Inner`
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(['.', '$', ':'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
    }

    /// The component signature for array type names
    /// For example: `com.acme.Item[]` returns `Some("com.acme.Item")`
    pub fn array_component(&self) -> Option<&str> {
        self.0
            .strip_suffix(ARRAY_SUFFIX)
            .map(str::trim_end)
            .filter(|component| !component.is_empty())
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self { Self(s) }
}

impl From<&String> for TypeName {
    fn from(s: &String) -> Self { Self(s.clone()) }
}

impl From<TypeName> for String {
    fn from(type_name: TypeName) -> Self { type_name.0 }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(TypeName::from("com.acme.order.Order").short_name(), "Order");
        assert_eq!(TypeName::from("com.acme.Outer$Inner").short_name(), "Inner");
        assert_eq!(TypeName::from("acme::order::Order").short_name(), "Order");
        assert_eq!(TypeName::from("int").short_name(), "int");
    }

    #[test]
    fn test_array_component() {
        assert_eq!(
            TypeName::from("com.acme.Item[]").array_component(),
            Some("com.acme.Item")
        );
        assert_eq!(
            TypeName::from("java.util.List<String>[][]").array_component(),
            Some("java.util.List<String>[]")
        );
        assert_eq!(TypeName::from("com.acme.Item").array_component(), None);
        assert_eq!(TypeName::from("[]").array_component(), None);
    }
}
