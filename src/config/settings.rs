//! Settings loading for the polls project.
//!
//! Resolution order:
//! 1. an explicit path (the `--settings` flag)
//! 2. the file named by the `POLLS_SETTINGS` environment variable
//! 3. built-in defaults
//!
//! Only the `[urls]` table is read; see [`UrlSettings`].

use polls_urls::UrlSettings;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file.
pub const SETTINGS_ENV_VAR: &str = "POLLS_SETTINGS";

/// Load URL settings.
///
/// # Errors
///
/// Returns [`polls_urls::UrlError::Settings`] if the chosen file cannot be
/// read or parsed.
pub fn load_settings(explicit: Option<&Path>) -> polls_urls::Result<UrlSettings> {
	let source = explicit
		.map(Path::to_path_buf)
		.or_else(|| env::var_os(SETTINGS_ENV_VAR).map(PathBuf::from));

	match source {
		Some(path) => {
			tracing::info!(path = %path.display(), "loading settings");
			UrlSettings::from_file(&path)
		}
		None => {
			tracing::debug!("no settings file given, using defaults");
			Ok(UrlSettings::default())
		}
	}
}
