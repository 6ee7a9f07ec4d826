//! # Observability
//!
//! Structured logging for secret loading. Events are emitted with `tracing`;
//! secret values are never recorded.

pub mod logging;

pub use logging::init_logging;
