//! Conversion dispatch and recursive type resolution
//!
//! `ConversionManager` is the single entry point for turning a
//! `TypeDescriptor` into a `Schema`. Concrete types go through first-match
//! dispatch over the ordered converter list. Parameterized types resolve the
//! raw type first and then attach the schema of their LAST type argument as
//! `items`.
//!
//! One manager is one conversion session: it owns the component registry and
//! the collected diagnostics, and is used from a single call stack.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ConversionConfig;
use crate::constants::RecursionDepth;
use crate::converters::{SchemaConverter, default_converters};
use crate::diagnostics::Diagnostic;
use crate::document::ApiSchemaDocument;
use crate::error::Result;
use crate::registry::ComponentRegistry;
use crate::schema::Schema;
use crate::type_descriptor::{TypeCatalog, TypeDescriptor, TypeName, parse_signature};

/// Orchestrates converters over one conversion session
pub struct ConversionManager {
    catalog:     Arc<TypeCatalog>,
    converters:  Arc<[Box<dyn SchemaConverter>]>,
    registry:    ComponentRegistry,
    config:      ConversionConfig,
    depth:       RecursionDepth,
    diagnostics: Vec<Diagnostic>,
}

impl std::fmt::Debug for ConversionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionManager")
            .field("catalog_types", &self.catalog.len())
            .field(
                "converters",
                &self
                    .converters
                    .iter()
                    .map(|converter| converter.name())
                    .collect::<Vec<_>>(),
            )
            .field("components", &self.registry.len())
            .field("config", &self.config)
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

impl AsMut<ComponentRegistry> for ConversionManager {
    fn as_mut(&mut self) -> &mut ComponentRegistry { &mut self.registry }
}

impl ConversionManager {
    /// Start a session over `catalog` with the default converters
    pub fn new(catalog: TypeCatalog) -> Self {
        Self::with_converters(catalog, default_converters())
    }

    /// Start a session with a custom ordered converter list
    pub fn with_converters(
        catalog: TypeCatalog,
        converters: Vec<Box<dyn SchemaConverter>>,
    ) -> Self {
        Self {
            catalog:     Arc::new(catalog),
            converters:  converters.into(),
            registry:    ComponentRegistry::new(),
            config:      ConversionConfig::default(),
            depth:       RecursionDepth::ZERO,
            diagnostics: Vec::new(),
        }
    }

    /// Replace the session configuration
    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve a nominal type through the first converter that claims it
    ///
    /// Returns `None` when no converter produces a schema. Converter faults are
    /// recorded as diagnostics and never returned to the caller.
    pub fn convert_concrete_type(&mut self, type_name: &TypeName) -> Option<Schema> {
        if !self.descend(type_name) {
            return None;
        }
        let schema = self.dispatch(type_name);
        self.ascend();
        schema
    }

    /// Resolve any descriptor, including generic instantiations
    pub fn convert_type_descriptor(&mut self, descriptor: &TypeDescriptor) -> Option<Schema> {
        match descriptor {
            TypeDescriptor::Concrete(type_name) => self.convert_concrete_type(type_name),
            TypeDescriptor::Parameterized { raw, arguments } => {
                if !self.descend(raw) {
                    return None;
                }
                let schema = self.convert_parameterized(raw, arguments);
                self.ascend();
                schema
            }
        }
    }

    /// Parse a generic signature and resolve it
    ///
    /// Only a malformed signature is an error; an unrepresentable type is
    /// `Ok(None)`.
    pub fn convert_signature(&mut self, signature: &str) -> Result<Option<Schema>> {
        let descriptor = parse_signature(signature)?;
        Ok(self.convert_type_descriptor(&descriptor))
    }

    /// Components built so far in this session
    pub const fn registry(&self) -> &ComponentRegistry { &self.registry }

    /// Reflection metadata the session resolves names against
    pub fn catalog(&self) -> &TypeCatalog { &self.catalog }

    /// Active configuration
    pub const fn config(&self) -> &ConversionConfig { &self.config }

    /// Diagnostics recorded so far, oldest first
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    /// Hand the recorded diagnostics to the caller, clearing them
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> { std::mem::take(&mut self.diagnostics) }

    /// Snapshot the populated components and diagnostics as a document
    pub fn document(&self) -> ApiSchemaDocument {
        ApiSchemaDocument::from_registry(&self.registry, &self.diagnostics)
    }

    fn convert_parameterized(
        &mut self,
        raw: &TypeName,
        arguments: &[TypeDescriptor],
    ) -> Option<Schema> {
        // No container schema means nowhere to attach `items`
        let mut parent = self.convert_concrete_type(raw)?;

        let Some(element) = arguments.last() else {
            self.record(Diagnostic::missing_type_arguments(raw));
            if self.config.reject_missing_type_arguments {
                return None;
            }
            return Some(parent);
        };

        let items = self.convert_type_descriptor(element);
        trace!(
            raw = %raw,
            element = %element,
            resolved = items.is_some(),
            "Resolved element type of parameterized type"
        );
        parent.set_items(items);
        Some(parent)
    }

    fn dispatch(&mut self, type_name: &TypeName) -> Option<Schema> {
        let definition = self.catalog.resolve(type_name);
        let converters = Arc::clone(&self.converters);

        for converter in converters.iter() {
            if !converter.can_convert(&definition) {
                continue;
            }

            let checkpoint = self.registry.checkpoint();
            match converter.convert(&definition, self) {
                Ok(Some(schema)) => {
                    trace!(
                        type_name = %type_name,
                        converter = converter.name(),
                        kind = %schema.kind,
                        "Converted type"
                    );
                    return Some(schema);
                }
                Ok(None) => {
                    self.registry.rollback(checkpoint);
                    debug!(
                        type_name = %type_name,
                        converter = converter.name(),
                        "Converter claimed type but produced nothing"
                    );
                }
                Err(report) => {
                    self.registry.rollback(checkpoint);
                    self.record(Diagnostic::converter_fault(
                        converter.name(),
                        type_name,
                        report.current_context(),
                    ));
                }
            }
        }

        debug!(type_name = %type_name, "No converter produced a schema");
        None
    }

    /// Enter one level of nesting; `false` when the depth limit is reached
    fn descend(&mut self, type_name: &TypeName) -> bool {
        let next = self.depth.increment();
        if next.exceeds(self.config.max_depth) {
            self.record(Diagnostic::recursion_limit(
                type_name,
                self.config.max_depth,
            ));
            return false;
        }
        self.depth = next;
        true
    }

    const fn ascend(&mut self) { self.depth = self.depth.decrement(); }

    /// Log `diagnostic` and keep it for the caller
    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use crate::error::Error;
    use crate::schema::SchemaKind;
    use crate::type_descriptor::{FieldDefinition, TypeDefinition};

    /// Claims everything and returns a fixed primitive
    struct FixedConverter {
        name:   &'static str,
        schema: Option<Schema>,
    }

    impl SchemaConverter for FixedConverter {
        fn name(&self) -> &'static str { self.name }

        fn can_convert(&self, _ty: &TypeDefinition) -> bool { true }

        fn convert(
            &self,
            _ty: &TypeDefinition,
            _manager: &mut ConversionManager,
        ) -> Result<Option<Schema>> {
            Ok(self.schema.clone())
        }
    }

    /// Claims everything, reserves a component, then fails
    struct FaultyConverter {
        calls: Arc<AtomicUsize>,
    }

    impl SchemaConverter for FaultyConverter {
        fn name(&self) -> &'static str { "faulty" }

        fn can_convert(&self, _ty: &TypeDefinition) -> bool { true }

        fn convert(
            &self,
            ty: &TypeDefinition,
            manager: &mut ConversionManager,
        ) -> Result<Option<Schema>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            manager.as_mut().reserve(&ty.name);
            Err(Error::conversion_failed(&ty.name, "reflection access denied").into())
        }
    }

    fn fixed(name: &'static str, openapi_type: &str) -> Box<dyn SchemaConverter> {
        Box::new(FixedConverter {
            name,
            schema: Some(Schema::primitive(openapi_type, None)),
        })
    }

    fn catalog(definitions: Vec<TypeDefinition>) -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    fn name(s: &str) -> TypeName { TypeName::from(s) }

    #[test]
    fn test_int_is_primitive_integer() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        let schema = manager.convert_concrete_type(&name("int"));
        assert_eq!(schema.as_ref().map(|s| s.kind), Some(SchemaKind::Primitive));
        assert_eq!(
            schema.as_ref().and_then(|s| s.name.as_deref()),
            Some("integer")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let mut manager = ConversionManager::with_converters(
            TypeCatalog::new(),
            vec![fixed("first", "string"), fixed("second", "integer")],
        );
        assert_eq!(
            manager.convert_concrete_type(&name("anything")),
            Some(Schema::primitive("string", None))
        );
    }

    #[test]
    fn test_absent_result_falls_through() {
        let mut manager = ConversionManager::with_converters(
            TypeCatalog::new(),
            vec![
                Box::new(FixedConverter {
                    name:   "empty",
                    schema: None,
                }),
                fixed("fallback", "integer"),
            ],
        );
        assert_eq!(
            manager.convert_concrete_type(&name("anything")),
            Some(Schema::primitive("integer", None))
        );
        assert!(manager.diagnostics().is_empty());
    }

    #[test]
    fn test_unsupported_type_is_absent_without_diagnostic() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        assert_eq!(
            manager.convert_concrete_type(&name("UnsupportedNativeHandle")),
            None
        );
        assert!(manager.diagnostics().is_empty());
        assert!(manager.registry().is_empty());
    }

    #[test]
    fn test_fault_is_isolated_and_reported_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut manager = ConversionManager::with_converters(
            TypeCatalog::new(),
            vec![
                Box::new(FaultyConverter {
                    calls: Arc::clone(&calls),
                }),
                fixed("fallback", "string"),
            ],
        );

        let schema = manager.convert_concrete_type(&name("com.acme.Fragile"));
        assert_eq!(schema, Some(Schema::primitive("string", None)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The reservation made before the fault is gone
        assert!(manager.registry().is_empty());

        let diagnostics = manager.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::ConverterFault);
        assert_eq!(diagnostics[0].converter, Some("faulty"));
        assert_eq!(diagnostics[0].type_name, name("com.acme.Fragile"));
        assert!(diagnostics[0].message.contains("reflection access denied"));
        assert!(manager.diagnostics().is_empty());
    }

    #[test]
    fn test_fault_with_no_fallback_is_absent() {
        let mut manager = ConversionManager::with_converters(
            TypeCatalog::new(),
            vec![Box::new(FaultyConverter {
                calls: Arc::new(AtomicUsize::new(0)),
            })],
        );
        assert_eq!(manager.convert_concrete_type(&name("com.acme.Fragile")), None);
        assert_eq!(manager.diagnostics().len(), 1);
    }

    #[test]
    fn test_list_of_string() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        let schema = manager.convert_signature("List<String>").ok().flatten();

        assert_eq!(schema.as_ref().map(|s| s.kind), Some(SchemaKind::Array));
        assert_eq!(
            schema.as_ref().and_then(Schema::items),
            Some(&Schema::primitive("string", None))
        );
    }

    #[test]
    fn test_last_type_argument_becomes_items() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        let schema = manager
            .convert_signature("java.util.Map<String, java.lang.Long>")
            .ok()
            .flatten();

        assert_eq!(
            schema.as_ref().and_then(Schema::items),
            Some(&Schema::primitive("integer", Some("int64")))
        );
    }

    #[test]
    fn test_nested_parameterized_types() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        let schema = manager
            .convert_signature("java.util.List<java.util.List<int>>")
            .ok()
            .flatten();

        let inner = schema.as_ref().and_then(Schema::items);
        assert_eq!(inner.map(|s| s.kind), Some(SchemaKind::Array));
        assert_eq!(
            inner.and_then(Schema::items),
            Some(&Schema::primitive("integer", Some("int32")))
        );
    }

    #[test]
    fn test_unrepresentable_raw_type_skips_arguments() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut manager = ConversionManager::with_converters(
            TypeCatalog::new(),
            vec![Box::new(FaultyConverter {
                calls: Arc::clone(&calls),
            })],
        );

        let descriptor = TypeDescriptor::parameterized(
            "com.acme.Box",
            vec![TypeDescriptor::concrete("com.acme.Item")],
        );
        assert_eq!(manager.convert_type_descriptor(&descriptor), None);
        // Only the raw type was attempted
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_type_arguments() {
        let descriptor = TypeDescriptor::parameterized("java.util.List", vec![]);

        let mut lenient = ConversionManager::new(TypeCatalog::new());
        assert_eq!(
            lenient.convert_type_descriptor(&descriptor),
            Some(Schema::array(None))
        );
        assert_eq!(
            lenient.diagnostics().first().map(|d| d.code),
            Some(DiagnosticCode::MissingTypeArguments)
        );

        let mut strict = ConversionManager::new(TypeCatalog::new()).with_config(ConversionConfig {
            reject_missing_type_arguments: true,
            ..ConversionConfig::default()
        });
        assert_eq!(strict.convert_type_descriptor(&descriptor), None);
        assert_eq!(strict.diagnostics().len(), 1);
    }

    #[test]
    fn test_self_referential_bean_terminates() {
        let node = TypeDefinition::bean(
            "com.acme.Node",
            vec![
                FieldDefinition::new("value", TypeDescriptor::concrete("int")),
                FieldDefinition::new("next", TypeDescriptor::concrete("com.acme.Node")),
            ],
        );
        let mut manager = ConversionManager::new(catalog(vec![node]));

        let outer = manager.convert_concrete_type(&name("com.acme.Node"));
        let id = outer.as_ref().and_then(Schema::component_id);
        assert!(id.is_some());

        let component = id.and_then(|id| manager.registry().get(id));
        let next = component.and_then(|schema| schema.property("next"));
        assert_eq!(next.and_then(Schema::component_id), id);
        assert_eq!(manager.registry().len(), 1);
    }

    #[test]
    fn test_mutually_referential_beans_share_components() {
        let customer = TypeDefinition::bean(
            "com.acme.Customer",
            vec![FieldDefinition::new(
                "orders",
                TypeDescriptor::parameterized(
                    "java.util.List",
                    vec![TypeDescriptor::concrete("com.acme.Order")],
                ),
            )],
        );
        let order = TypeDefinition::bean(
            "com.acme.Order",
            vec![FieldDefinition::new(
                "customer",
                TypeDescriptor::concrete("com.acme.Customer"),
            )],
        );
        let mut manager = ConversionManager::new(catalog(vec![customer, order]));

        let root = manager.convert_concrete_type(&name("com.acme.Customer"));
        let customer_id = root.as_ref().and_then(Schema::component_id);
        let order_id = manager.registry().lookup(&name("com.acme.Order"));

        let customer_schema = customer_id.and_then(|id| manager.registry().get(id));
        let items = customer_schema
            .and_then(|schema| schema.property("orders"))
            .and_then(Schema::items);
        assert_eq!(items.and_then(Schema::component_id), order_id);

        let order_schema = order_id.and_then(|id| manager.registry().get(id));
        assert_eq!(
            order_schema
                .and_then(|schema| schema.property("customer"))
                .and_then(Schema::component_id),
            customer_id
        );
    }

    #[test]
    fn test_repeated_conversion_is_identity_equal() {
        let status = TypeDefinition::enumeration("com.acme.Status", ["OPEN", "CLOSED"]);
        let mut manager = ConversionManager::new(catalog(vec![status]));
        let descriptor = TypeDescriptor::parameterized(
            "java.util.Set",
            vec![TypeDescriptor::concrete("com.acme.Status")],
        );

        let first = manager.convert_type_descriptor(&descriptor);
        let second = manager.convert_type_descriptor(&descriptor);
        let first_id = first
            .as_ref()
            .and_then(Schema::items)
            .and_then(Schema::component_id);

        assert!(first_id.is_some());
        assert_eq!(
            second
                .as_ref()
                .and_then(Schema::items)
                .and_then(Schema::component_id),
            first_id
        );
        assert_eq!(manager.registry().len(), 1);
    }

    #[test]
    fn test_arrays_resolve_component() {
        let item = TypeDefinition::bean(
            "com.acme.Item",
            vec![FieldDefinition::new("sku", TypeDescriptor::concrete("String"))],
        );
        let mut manager = ConversionManager::new(catalog(vec![item]));

        let schema = manager.convert_signature("com.acme.Item[]").ok().flatten();
        assert_eq!(schema.as_ref().map(|s| s.kind), Some(SchemaKind::Array));
        assert_eq!(
            schema
                .as_ref()
                .and_then(Schema::items)
                .map(|items| items.kind),
            Some(SchemaKind::Reference)
        );
    }

    #[test]
    fn test_depth_limit_cuts_off_deep_nesting() {
        let mut descriptor = TypeDescriptor::concrete("int");
        for _ in 0..10 {
            descriptor = TypeDescriptor::parameterized("java.util.List", vec![descriptor]);
        }

        let mut manager = ConversionManager::new(TypeCatalog::new()).with_config(ConversionConfig {
            max_depth: 4,
            ..ConversionConfig::default()
        });
        let schema = manager.convert_type_descriptor(&descriptor);

        // The outer levels still resolve, the cut-off branch is left open
        assert_eq!(schema.as_ref().map(|s| s.kind), Some(SchemaKind::Array));
        assert_eq!(
            manager.diagnostics().first().map(|d| d.code),
            Some(DiagnosticCode::RecursionLimitExceeded)
        );

        // Depth is fully unwound afterwards
        assert_eq!(
            manager.convert_concrete_type(&name("int")),
            Some(Schema::primitive("integer", Some("int32")))
        );
    }

    #[test]
    fn test_deeply_nested_signature_is_error() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        let deep = format!("{}int{}", "java.util.List<".repeat(2_000), ">".repeat(2_000));

        let result = manager.convert_signature(&deep);
        assert!(matches!(
            result.as_ref().map_err(error_stack::Report::current_context),
            Err(Error::InvalidSignature { .. })
        ));
        assert!(manager.registry().is_empty());
    }

    #[test]
    fn test_malformed_signature_is_error() {
        let mut manager = ConversionManager::new(TypeCatalog::new());
        assert!(manager.convert_signature("List<").is_err());
        assert!(manager.diagnostics().is_empty());
    }
}
