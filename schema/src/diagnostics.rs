//! Non-fatal problems observed during a conversion session
//!
//! Diagnostics are emitted to `tracing` when they happen and collected on the
//! manager so an embedding agent can forward them. They never abort a scan.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::{error, warn};

use crate::type_descriptor::TypeName;

/// Classification code carried by every diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// A converter claimed a type and then failed
    ConverterFault,
    /// Descriptor nesting went past the configured depth
    RecursionLimitExceeded,
    /// A parameterized descriptor carried no type arguments
    MissingTypeArguments,
    /// A component was published without part of its structure because a
    /// field ran into the depth limit
    ComponentTruncated,
}

/// One structured report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Classification
    pub code:      DiagnosticCode,
    /// Converter that failed, for converter faults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converter: Option<&'static str>,
    /// Fully-qualified name of the type being converted
    pub type_name: TypeName,
    /// Underlying cause
    pub message:   String,
}

impl Diagnostic {
    /// A converter claimed `type_name` and returned an error
    pub fn converter_fault(
        converter: &'static str,
        type_name: &TypeName,
        cause: impl std::fmt::Display,
    ) -> Self {
        Self {
            code:      DiagnosticCode::ConverterFault,
            converter: Some(converter),
            type_name: type_name.clone(),
            message:   cause.to_string(),
        }
    }

    /// Resolution of `type_name` was cut off at `limit`
    pub fn recursion_limit(type_name: &TypeName, limit: usize) -> Self {
        Self {
            code:      DiagnosticCode::RecursionLimitExceeded,
            converter: None,
            type_name: type_name.clone(),
            message:   format!("type nesting exceeds the maximum depth of {limit}"),
        }
    }

    /// `raw` was used as a parameterized type without arguments
    pub fn missing_type_arguments(raw: &TypeName) -> Self {
        Self {
            code:      DiagnosticCode::MissingTypeArguments,
            converter: None,
            type_name: raw.clone(),
            message:   "parameterized type has no type arguments; element schema skipped"
                .to_string(),
        }
    }

    /// Field `field` of component `type_name` was cut off by the depth limit
    pub fn component_truncated(type_name: &TypeName, field: &str) -> Self {
        Self {
            code:      DiagnosticCode::ComponentTruncated,
            converter: None,
            type_name: type_name.clone(),
            message:   format!(
                "field '{field}' exceeded the maximum depth; the shared component is incomplete"
            ),
        }
    }

    /// Log this diagnostic at the level its code warrants
    pub(crate) fn emit(&self) {
        match self.code {
            DiagnosticCode::ConverterFault => error!(
                code = %self.code,
                converter = self.converter.unwrap_or_default(),
                type_name = %self.type_name,
                cause = %self.message,
                "Schema converter failed"
            ),
            DiagnosticCode::RecursionLimitExceeded
            | DiagnosticCode::MissingTypeArguments
            | DiagnosticCode::ComponentTruncated => warn!(
                code = %self.code,
                type_name = %self.type_name,
                "{}",
                self.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_screaming_snake_case() {
        assert_eq!(DiagnosticCode::ConverterFault.to_string(), "CONVERTER_FAULT");
        assert_eq!(
            serde_json::to_value(DiagnosticCode::MissingTypeArguments).ok(),
            Some(serde_json::json!("MISSING_TYPE_ARGUMENTS"))
        );
    }

    #[test]
    fn test_converter_fault_serialization() {
        let diagnostic =
            Diagnostic::converter_fault("bean", &TypeName::from("com.acme.Order"), "boom");
        assert_eq!(
            serde_json::to_value(&diagnostic).ok(),
            Some(serde_json::json!({
                "code": "CONVERTER_FAULT",
                "converter": "bean",
                "type_name": "com.acme.Order",
                "message": "boom"
            }))
        );
    }
}
