//! Observability helpers for the Dropbox connector.
//!
//! Spans are emitted through `tracing`; this module holds the redaction and
//! body-truncation helpers used on logging paths.

pub mod logging;

pub use logging::*;
