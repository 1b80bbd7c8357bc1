//! Converter for bean-like object types
//!
//! **Recursion**: YES - every field's declared type is resolved through the
//! manager. The object is registered as a component before its fields are
//! visited, so a field referring back to its own type (directly or through
//! other beans) links to the component instead of unrolling forever.

use tracing::debug;

use super::SchemaConverter;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::{Error, Result};
use crate::manager::ConversionManager;
use crate::registry::ComponentRegistry;
use crate::schema::Schema;
use crate::type_descriptor::{TypeDefinition, TypeShape};

/// Converts `Bean` shapes into `Object` components
pub struct BeanConverter;

impl SchemaConverter for BeanConverter {
    fn name(&self) -> &'static str { "bean" }

    fn can_convert(&self, ty: &TypeDefinition) -> bool {
        matches!(ty.shape, TypeShape::Bean { .. })
    }

    fn convert(
        &self,
        ty: &TypeDefinition,
        manager: &mut ConversionManager,
    ) -> Result<Option<Schema>> {
        let TypeShape::Bean { fields } = &ty.shape else {
            return Err(Error::conversion_failed(&ty.name, "definition is not a bean").into());
        };

        ComponentRegistry::get_or_create(manager, &ty.name, |manager, id| {
            let title = manager
                .registry()
                .component_name(id)
                .unwrap_or_else(|| ty.name.short_name())
                .to_string();
            let mut object = Schema::object(title);

            for field in fields {
                let seen = manager.diagnostics().len();
                let field_schema = manager.convert_type_descriptor(&field.ty);
                if cut_off_inline(&manager.diagnostics()[seen..]) {
                    manager.record(Diagnostic::component_truncated(&ty.name, &field.name));
                }

                let Some(field_schema) = field_schema else {
                    debug!(
                        type_name = %ty.name,
                        field = %field.name,
                        field_type = %field.ty,
                        "Field type is not representable - property omitted"
                    );
                    continue;
                };

                if object
                    .insert_property(field.name.clone(), field_schema)
                    .is_some()
                {
                    return Err(Error::conversion_failed(
                        &ty.name,
                        format!("field '{}' is declared more than once", field.name),
                    )
                    .into());
                }
            }

            Ok(Some(object))
        })
    }
}

/// Whether the depth limit cut off this field's own structure
///
/// A cut-off inside a nested component is already reported against that
/// component and does not truncate this one.
fn cut_off_inline(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|d| d.code == DiagnosticCode::RecursionLimitExceeded)
        && !diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::ComponentTruncated)
}
