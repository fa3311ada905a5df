use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Timestamps rendered as "[YYYY-MM-DD HH:MM:SS.micros]" in local time
struct LocalTime;

impl FormatTime for LocalTime {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now: chrono::DateTime<chrono::Local> = chrono::Local::now();
		write!(w, "{}", now.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

type ReloadHandle = reload::Handle<EnvFilter, Registry>;

static RELOAD_HANDLE: OnceLock<ReloadHandle> = OnceLock::new();

/// Options for [`init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
	/// Initial filter, e.g. "info" or "quill=debug,warn"
	pub level: String,
	/// Print the event target (module path) in front of each message
	pub with_target: bool,
	/// Colorize output
	pub ansi: bool,
}

impl Default for LogOptions {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			with_target: true,
			ansi: true,
		}
	}
}

impl LogOptions {
	pub fn with_level(level: impl Into<String>) -> Self {
		Self {
			level: level.into(),
			..Self::default()
		}
	}
}

/// Install the global console subscriber.
///
/// `RUST_LOG` takes precedence over `options.level` when it is set.
///
/// # Errors
///
/// Returns [`TelemetryError::AlreadyInitialized`] if another global
/// subscriber has been installed.
pub fn init(options: &LogOptions) -> Result<(), TelemetryError> {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

	let (filter_layer, reload_handle) = reload::Layer::new(env_filter);

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(
			fmt::layer()
				.with_timer(LocalTime)
				.with_target(options.with_target)
				.with_ansi(options.ansi)
				.with_thread_ids(false)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|_| TelemetryError::AlreadyInitialized)?;

	let _ = RELOAD_HANDLE.set(reload_handle);
	Ok(())
}

/// Swap the active level filter.
///
/// # Errors
///
/// Fails if `level` is not one of trace, debug, info, warn or error, if
/// [`init`] has not run, or if the subscriber rejects the new filter.
pub fn reload_log_level(level: &str) -> Result<(), TelemetryError> {
	let level = level.to_ascii_lowercase();
	if !VALID_LEVELS.contains(&level.as_str()) {
		return Err(TelemetryError::InvalidLogLevel(level));
	}

	let handle = RELOAD_HANDLE.get().ok_or(TelemetryError::NotInitialized)?;
	handle
		.reload(EnvFilter::new(&level))
		.map_err(|e| TelemetryError::ReloadFailed(e.to_string()))
}
