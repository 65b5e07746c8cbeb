//! URL-related settings.
//!
//! Settings are read from the `[urls]` table of a TOML settings file:
//!
//! ```toml
//! [urls]
//! script_prefix = "/mysite/"
//! append_slash = true
//! ```
//!
//! Missing keys fall back to their defaults. The value is handed to
//! [`UrlConf`](crate::UrlConf) at build time; there is no global settings
//! object.

use crate::error::{Result, UrlError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Routing settings, mirroring Django's `FORCE_SCRIPT_NAME` and `APPEND_SLASH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSettings {
	/// Prefix prepended to every reversed URL. Always begins and ends with `/`.
	pub script_prefix: String,
	/// Suggest a redirect to `path + "/"` when only that form resolves.
	pub append_slash: bool,
}

impl Default for UrlSettings {
	fn default() -> Self {
		Self {
			script_prefix: "/".to_string(),
			append_slash: true,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
	#[serde(default)]
	urls: UrlSettings,
}

impl UrlSettings {
	/// Parse settings from TOML text.
	///
	/// # Examples
	///
	/// ```
	/// use polls_urls::UrlSettings;
	///
	/// let settings = UrlSettings::from_toml_str("[urls]\nscript_prefix = \"mysite\"").unwrap();
	/// assert_eq!(settings.script_prefix, "/mysite/");
	/// assert!(settings.append_slash);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let file: SettingsFile =
			toml::from_str(source).map_err(|e| UrlError::Settings(e.to_string()))?;
		Ok(file.urls.normalized())
	}

	/// Read settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.map_err(|e| UrlError::Settings(format!("{}: {}", path.display(), e)))?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(
			path = %path.display(),
			script_prefix = %settings.script_prefix,
			append_slash = settings.append_slash,
			"url settings loaded"
		);
		Ok(settings)
	}

	pub fn with_script_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.script_prefix = prefix.into();
		self.normalized()
	}

	pub fn with_append_slash(mut self, append_slash: bool) -> Self {
		self.append_slash = append_slash;
		self
	}

	/// Ensures the script prefix begins and ends with `/`.
	pub(crate) fn normalized(mut self) -> Self {
		let trimmed = self.script_prefix.trim_matches('/');
		self.script_prefix = if trimmed.is_empty() {
			"/".to_string()
		} else {
			format!("/{}/", trimmed)
		};
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_defaults_when_table_missing() {
		let settings = UrlSettings::from_toml_str("debug = true").unwrap();
		assert_eq!(settings, UrlSettings::default());
	}

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("mysite", "/mysite/")]
	#[case("/mysite", "/mysite/")]
	#[case("/a/b/", "/a/b/")]
	fn test_script_prefix_normalized(#[case] raw: &str, #[case] expected: &str) {
		let settings = UrlSettings::default().with_script_prefix(raw);
		assert_eq!(settings.script_prefix, expected);
	}

	#[rstest]
	fn test_append_slash_override() {
		let settings = UrlSettings::from_toml_str("[urls]\nappend_slash = false").unwrap();
		assert!(!settings.append_slash);
		assert_eq!(settings.script_prefix, "/");
	}

	#[rstest]
	fn test_invalid_toml() {
		let err = UrlSettings::from_toml_str("[urls]\nappend_slash = \"maybe\"").unwrap_err();
		assert!(matches!(err, UrlError::Settings(_)));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[urls]\nscript_prefix = \"/site\"").unwrap();

		let settings = UrlSettings::from_file(file.path()).unwrap();
		assert_eq!(settings.script_prefix, "/site/");
	}

	#[rstest]
	fn test_from_missing_file() {
		let err = UrlSettings::from_file("/nonexistent/settings.toml").unwrap_err();
		assert!(matches!(err, UrlError::Settings(msg) if msg.contains("/nonexistent/settings.toml")));
	}
}
