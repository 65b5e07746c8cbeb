//! Error types for URL resolution and reversal.

use std::fmt;

/// What a failed lookup was searching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	/// A request path passed to `resolve`.
	Path(String),
	/// A route name (optionally namespaced) passed to `reverse`.
	Name(String),
}

impl fmt::Display for Lookup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Path(path) => write!(f, "path '{}'", path),
			Self::Name(name) => write!(f, "route name '{}'", name),
		}
	}
}

/// Errors raised by route tables and URL configurations.
///
/// Mirrors Django's `Resolver404`, `NoReverseMatch` and `ImproperlyConfigured`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
	/// No route matched the path, or no route carries the name.
	#[error("No match for {0}")]
	NotFound(Lookup),

	/// Reverse lookup received missing, unexpected or ill-typed parameters.
	#[error("Invalid parameters for route '{name}': {reason}")]
	InvalidParams { name: String, reason: String },

	/// A route string could not be parsed.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern { pattern: String, reason: String },

	/// Route tables or URL configurations that violate an invariant.
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	/// Settings could not be read or parsed.
	#[error("Settings error: {0}")]
	Settings(String),
}

impl UrlError {
	/// Returns `true` for errors a dispatcher should turn into a 404 response.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}

	pub(crate) fn path_not_found(path: &str) -> Self {
		Self::NotFound(Lookup::Path(path.to_string()))
	}

	pub(crate) fn name_not_found(name: &str) -> Self {
		Self::NotFound(Lookup::Name(name.to_string()))
	}
}

/// Result alias used throughout this crate.
pub type Result<T, E = UrlError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_not_found_display() {
		assert_eq!(
			UrlError::path_not_found("abc/results/").to_string(),
			"No match for path 'abc/results/'"
		);
		assert_eq!(
			UrlError::name_not_found("polls:missing").to_string(),
			"No match for route name 'polls:missing'"
		);
	}

	#[rstest]
	fn test_invalid_params_display() {
		let err = UrlError::InvalidParams {
			name: "detail".to_string(),
			reason: "missing parameter 'question_id'".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Invalid parameters for route 'detail': missing parameter 'question_id'"
		);
	}

	#[rstest]
	#[case(UrlError::path_not_found("/"), true)]
	#[case(UrlError::name_not_found("index"), true)]
	#[case(UrlError::ImproperlyConfigured("dup".to_string()), false)]
	fn test_is_not_found(#[case] err: UrlError, #[case] expected: bool) {
		assert_eq!(err.is_not_found(), expected);
	}
}
