//! Logging bootstrap for programs that host a quill dispatcher.
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! left to the host. [`init`] installs one with a reloadable level filter so
//! the verbosity can be changed while the host keeps running.

mod error;
pub mod logger;

pub use error::TelemetryError;
pub use logger::LogOptions;
pub use logger::init;
pub use logger::reload_log_level;
