// ============================================================================
// RECURSION CONSTANTS
// ============================================================================

/// Maximum nesting depth for descriptor resolution to prevent stack overflow
pub const MAX_TYPE_RECURSION_DEPTH: usize = 64;

/// Maximum `<...>` nesting accepted in a signature before it is parsed
pub const MAX_SIGNATURE_NESTING: usize = 128;

/// Depth counter threaded through recursive descriptor resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RecursionDepth(usize);

impl RecursionDepth {
    /// Depth of a top-level conversion request
    pub const ZERO: Self = Self(0);

    /// One level deeper
    pub const fn increment(self) -> Self { Self(self.0 + 1) }

    /// One level shallower, never below zero
    pub const fn decrement(self) -> Self { Self(self.0.saturating_sub(1)) }

    /// Whether this depth is past `limit`
    pub const fn exceeds(self, limit: usize) -> bool { self.0 > limit }

    /// Raw depth value
    pub const fn value(self) -> usize { self.0 }
}

impl std::fmt::Display for RecursionDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

// ============================================================================
// OPENAPI CONSTANTS
// ============================================================================

/// Prefix for `$ref` links into the components section
pub const COMPONENTS_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// `OpenAPI` primitive type names
pub const OPENAPI_INTEGER: &str = "integer";
/// `OpenAPI` number type
pub const OPENAPI_NUMBER: &str = "number";
/// `OpenAPI` string type
pub const OPENAPI_STRING: &str = "string";
/// `OpenAPI` boolean type
pub const OPENAPI_BOOLEAN: &str = "boolean";
/// `OpenAPI` object type
pub const OPENAPI_OBJECT: &str = "object";
/// `OpenAPI` array type
pub const OPENAPI_ARRAY: &str = "array";

// ============================================================================
// TYPE NAME CONSTANTS
// ============================================================================

// Primitive types
pub(crate) const TYPE_BYTE: &str = "byte";
pub(crate) const TYPE_SHORT: &str = "short";
pub(crate) const TYPE_INT: &str = "int";
pub(crate) const TYPE_LONG: &str = "long";
pub(crate) const TYPE_FLOAT: &str = "float";
pub(crate) const TYPE_DOUBLE: &str = "double";
pub(crate) const TYPE_BOOLEAN: &str = "boolean";
pub(crate) const TYPE_CHAR: &str = "char";

// Wrapper types
pub(crate) const TYPE_JAVA_BYTE: &str = "java.lang.Byte";
pub(crate) const TYPE_JAVA_SHORT: &str = "java.lang.Short";
pub(crate) const TYPE_JAVA_INTEGER: &str = "java.lang.Integer";
pub(crate) const TYPE_JAVA_LONG: &str = "java.lang.Long";
pub(crate) const TYPE_JAVA_FLOAT: &str = "java.lang.Float";
pub(crate) const TYPE_JAVA_DOUBLE: &str = "java.lang.Double";
pub(crate) const TYPE_JAVA_BOOLEAN: &str = "java.lang.Boolean";
pub(crate) const TYPE_JAVA_CHARACTER: &str = "java.lang.Character";

// String-like types
pub(crate) const TYPE_STRING: &str = "String";
pub(crate) const TYPE_JAVA_STRING: &str = "java.lang.String";
pub(crate) const TYPE_JAVA_CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub(crate) const TYPE_JAVA_UUID: &str = "java.util.UUID";

// Big numbers
pub(crate) const TYPE_JAVA_BIG_INTEGER: &str = "java.math.BigInteger";
pub(crate) const TYPE_JAVA_BIG_DECIMAL: &str = "java.math.BigDecimal";

// Date and time
pub(crate) const TYPE_JAVA_DATE: &str = "java.util.Date";
pub(crate) const TYPE_JAVA_SQL_DATE: &str = "java.sql.Date";
pub(crate) const TYPE_JAVA_LOCAL_DATE: &str = "java.time.LocalDate";
pub(crate) const TYPE_JAVA_LOCAL_DATE_TIME: &str = "java.time.LocalDateTime";
pub(crate) const TYPE_JAVA_INSTANT: &str = "java.time.Instant";

// Collection types seeded into every catalog
pub(crate) const COLLECTION_TYPES: &[&str] = &[
    "Collection",
    "List",
    "Set",
    "Map",
    "java.lang.Iterable",
    "java.util.Collection",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.Map",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.TreeMap",
    "java.util.concurrent.ConcurrentHashMap",
];
