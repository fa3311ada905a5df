use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TelemetryError {
	#[error("invalid log level '{0}', expected one of trace, debug, info, warn, error")]
	InvalidLogLevel(String),
	#[error("logger has not been initialized")]
	NotInitialized,
	#[error("a global subscriber is already installed")]
	AlreadyInitialized,
	#[error("failed to reload log filter: {0}")]
	ReloadFailed(String),
}
