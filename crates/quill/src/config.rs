//! Dispatcher configuration.
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! prefixes = ["!", "?"]
//! ignore_extra = false
//! case_insensitive = true
//! ```

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file: {0}")]
	Io(#[from] std::io::Error),
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
	/// Text must start with one of these to be handled; the first match
	/// wins. Empty means every text is considered.
	pub prefixes: Vec<String>,
	/// Default for commands that do not choose for themselves.
	pub ignore_extra: bool,
	/// Fold ASCII case when looking command names up.
	pub case_insensitive: bool,
}

impl Default for DispatchConfig {
	fn default() -> Self {
		Self {
			prefixes: Vec::new(),
			ignore_extra: true,
			case_insensitive: false,
		}
	}
}

impl DispatchConfig {
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefixes: vec![prefix.into()],
			..Self::default()
		}
	}

	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path)?;
		Self::from_toml_str(&input)
	}

	/// Split `content` into the matched prefix and the rest.
	///
	/// Prefixes are tried in order; an empty prefix matches any content.
	pub fn strip_prefix<'a>(&'a self, content: &'a str) -> Option<(&'a str, &'a str)> {
		if self.prefixes.is_empty() {
			return Some(("", content));
		}
		self.prefixes
			.iter()
			.find_map(|prefix| {
				content
					.strip_prefix(prefix.as_str())
					.map(|rest| (prefix.as_str(), rest))
			})
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use rstest::rstest;

	use super::*;

	#[test]
	fn test_defaults() {
		let config = DispatchConfig::from_toml_str("").unwrap();
		assert_eq!(config, DispatchConfig::default());
		assert!(config.ignore_extra);
		assert!(!config.case_insensitive);
	}

	#[test]
	fn test_partial_toml() {
		let config = DispatchConfig::from_toml_str("prefixes = [\"!\"]\nignore_extra = false").unwrap();
		assert_eq!(config.prefixes, ["!"]);
		assert!(!config.ignore_extra);
		assert!(!config.case_insensitive);
	}

	#[test]
	fn test_invalid_toml() {
		let err = DispatchConfig::from_toml_str("prefixes = 3").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "case_insensitive = true").unwrap();

		let config = DispatchConfig::from_file(file.path()).unwrap();
		assert!(config.case_insensitive);

		let err = DispatchConfig::from_file("/nonexistent/quill.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}

	#[rstest]
	#[case(&[], "ping", Some(("", "ping")))]
	#[case(&["!"], "!ping", Some(("!", "ping")))]
	#[case(&["!"], "ping", None)]
	#[case(&["?", "!"], "!ping", Some(("!", "ping")))]
	#[case(&["!", "!!"], "!!ping", Some(("!", "!ping")))]
	#[case(&[""], "ping", Some(("", "ping")))]
	#[case(&["!", ""], "!ping", Some(("!", "ping")))]
	#[case(&["!", ""], "ping", Some(("", "ping")))]
	fn test_strip_prefix(
		#[case] prefixes: &[&str],
		#[case] content: &str,
		#[case] expected: Option<(&str, &str)>,
	) {
		let config = DispatchConfig {
			prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
			..DispatchConfig::default()
		};
		assert_eq!(config.strip_prefix(content), expected);
	}
}
