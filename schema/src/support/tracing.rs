//! File logging with a level that can be changed while the process runs
//!
//! Nothing is written until a subscriber is installed with
//! `init_file_tracing`; the library itself only emits `tracing` events.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};

use error_stack::Report;
use strum::{AsRefStr, Display, EnumString, FromRepr};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::error::{Error, Result};

const TRACE_LOG_FILE: &str = "api_schema_trace.log";

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(TracingLevel::Warn as u8);

/// Severity threshold for the trace log, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, FromRepr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum TracingLevel {
    /// Converter faults only
    Error = 0,
    /// Faults plus depth cut-offs and malformed descriptors
    Warn = 1,
    /// Session milestones
    Info = 2,
    /// Dispatch decisions and registry changes
    Debug = 3,
    /// Every resolved type
    Trace = 4,
}

impl TracingLevel {
    fn admits(self, level: Level) -> bool {
        let severity = match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        };
        severity as u8 <= self as u8
    }
}

/// Layer that drops events above the level in `CURRENT_LEVEL`
#[derive(Debug, Clone, Copy)]
pub struct DynamicFilter;

impl<S: Subscriber> Layer<S> for DynamicFilter {
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        current_tracing_level().admits(*metadata.level())
    }
}

/// Install the global subscriber writing to `trace_log_path()`
///
/// The returned guard flushes the background writer on drop and must be kept
/// alive for as long as logging is wanted.
pub fn init_file_tracing(level: TracingLevel) -> Result<WorkerGuard> {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);

    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), TRACE_LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    Registry::default()
        .with(DynamicFilter)
        .with(file_layer)
        .try_init()
        .map_err(|e| Report::new(Error::failed_to("install tracing subscriber", e)))?;

    Ok(guard)
}

/// Change the threshold of an installed subscriber
pub fn set_tracing_level(level: TracingLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
    tracing::info!(level = %level, "Tracing level changed");
}

/// Threshold currently in effect
pub fn current_tracing_level() -> TracingLevel {
    TracingLevel::from_repr(CURRENT_LEVEL.load(Ordering::Relaxed)).unwrap_or(TracingLevel::Warn)
}

/// Where `init_file_tracing` writes
pub fn trace_log_path() -> PathBuf { std::env::temp_dir().join(TRACE_LOG_FILE) }
