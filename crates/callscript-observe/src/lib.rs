//! Observability setup for Callscript: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
