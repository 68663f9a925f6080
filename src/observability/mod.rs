//! # Observability Infrastructure
//!
//! Structured logging for the secrets service. Operations emit `tracing`
//! spans and events; this module installs the subscriber that renders them.

pub mod logging;

pub use logging::{build_filter, init_logging, log_config_info};
