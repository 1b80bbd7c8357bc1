//! # api-schema-dump
//!
//! Loads a type catalog from JSON, converts the requested type signatures in
//! one session and prints the resulting schema document.
//!
//! ```text
//! api-schema-dump <catalog.json> <signature>...
//! ```
//!
//! Set `API_SCHEMA_LOG` to `error`, `warn`, `info`, `debug` or `trace` to choose
//! what goes to the trace log in the temp directory.

use std::path::Path;
use std::process::ExitCode;

use api_schema::support::tracing::{TracingLevel, init_file_tracing, trace_log_path};
use api_schema::{ConversionConfig, ConversionManager, Error, Result, TypeCatalog, TypeDefinition};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use tracing::info;

const LOG_LEVEL_ENV: &str = "API_SCHEMA_LOG";

/// Contents of the catalog file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DumpInput {
    config: ConversionConfig,
    types:  Vec<TypeDefinition>,
}

fn main() -> ExitCode {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| value.parse::<TracingLevel>().ok())
        .unwrap_or(TracingLevel::Warn);
    let _guard = match init_file_tracing(level) {
        Ok(guard) => Some(guard),
        Err(report) => {
            eprintln!("{report:?}");
            None
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((path, signatures)) = args.split_first() else {
        eprintln!("usage: api-schema-dump <catalog.json> <signature>...");
        return ExitCode::FAILURE;
    };

    match run(Path::new(path), signatures) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(report) => {
            eprintln!("{report:?}");
            eprintln!("trace log: {}", trace_log_path().display());
            ExitCode::FAILURE
        }
    }
}

/// Convert `signatures` against the catalog in `path` and render the document
fn run(path: &Path, signatures: &[String]) -> Result<String> {
    if signatures.is_empty() {
        return Err(Report::new(Error::invalid(
            "arguments",
            "at least one type signature is required",
        )));
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| Report::new(Error::io_failed("read", path, e)))?;
    let input: DumpInput = serde_json::from_str(&text)
        .change_context(Error::Serialization(format!("catalog {}", path.display())))?;

    let catalog = TypeCatalog::from_definitions(input.types)?;
    info!(
        path = %path.display(),
        types = catalog.len(),
        signatures = signatures.len(),
        "Loaded type catalog"
    );

    let mut manager = ConversionManager::new(catalog).with_config(input.config);
    let mut roots = Vec::with_capacity(signatures.len());
    for signature in signatures {
        let schema = manager
            .convert_signature(signature)
            .attach(format!("while converting '{signature}'"))?;
        roots.push((signature.clone(), schema));
    }

    let mut document = manager.document();
    for (signature, schema) in roots {
        document.insert_root(signature, schema);
    }

    info!(
        components = document.components.schemas.len(),
        diagnostics = document.diagnostics.len(),
        "Conversion session finished"
    );
    document.to_string_pretty()
}
