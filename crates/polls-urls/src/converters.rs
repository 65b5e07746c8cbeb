//! Path converters for typed route segments.
//!
//! The set of converters is closed: `int`, `str`, `slug`, `uuid` and `path`,
//! the same defaults Django ships. Each converter knows the regex fragment it
//! matches, how to turn a captured string into a [`ParamValue`], and how to
//! render a value back into a URL segment during reverse lookup.

use crate::params::ParamValue;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use uuid::Uuid;

/// Characters left untouched when rendering reversed values.
///
/// RFC 3986 unreserved characters and sub-delimiters, plus `/ ~ : @`.
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~')
	.remove(b'!')
	.remove(b'$')
	.remove(b'&')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')')
	.remove(b'*')
	.remove(b'+')
	.remove(b',')
	.remove(b';')
	.remove(b'=')
	.remove(b'/')
	.remove(b':')
	.remove(b'@');

/// The kind of a typed path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
	/// Non-negative integer (`<int:id>`).
	Int,
	/// Any non-empty text without `/` (`<str:name>`, or a bare `<name>`).
	Str,
	/// ASCII letters, digits, hyphens and underscores (`<slug:slug>`).
	Slug,
	/// Lowercase hyphenated UUID (`<uuid:token>`).
	Uuid,
	/// Any non-empty text including `/` (`<path:rest>`).
	Path,
}

impl SegmentKind {
	/// Converter names accepted inside angle brackets.
	pub fn valid_names() -> &'static [&'static str] {
		&["int", "str", "slug", "uuid", "path"]
	}

	/// Looks up a converter by name.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"int" => Some(Self::Int),
			"str" => Some(Self::Str),
			"slug" => Some(Self::Slug),
			"uuid" => Some(Self::Uuid),
			"path" => Some(Self::Path),
			_ => None,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Str => "str",
			Self::Slug => "slug",
			Self::Uuid => "uuid",
			Self::Path => "path",
		}
	}

	pub(crate) fn regex(self) -> &'static str {
		match self {
			Self::Int => "[0-9]+",
			Self::Str => "[^/]+",
			Self::Slug => "[-a-zA-Z0-9_]+",
			Self::Uuid => "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
			Self::Path => ".+",
		}
	}

	/// Converts a captured segment into a typed value.
	///
	/// Text segments are percent-decoded, undoing the encoding applied by
	/// [`to_url`](Self::to_url). Returns `None` when the text cannot be
	/// represented, e.g. an `int` segment that overflows `i64` or an escape
	/// sequence that decodes to invalid UTF-8. The route then does not match.
	pub fn to_value(self, raw: &str) -> Option<ParamValue> {
		match self {
			Self::Int => raw.parse::<i64>().ok().map(ParamValue::Int),
			Self::Uuid => Uuid::parse_str(raw).ok().map(ParamValue::Uuid),
			Self::Str | Self::Slug | Self::Path => {
				let decoded = percent_decode_str(raw).decode_utf8().ok()?;
				Some(ParamValue::Str(decoded.into_owned()))
			}
		}
	}

	/// Renders a value for this segment, or explains why it does not fit.
	pub fn to_url(self, value: &ParamValue) -> Result<String, String> {
		let text = match (self, value) {
			(Self::Int, ParamValue::Int(n)) if *n >= 0 => return Ok(n.to_string()),
			(Self::Int, ParamValue::Int(n)) => {
				return Err(format!("expected a non-negative integer, got {}", n));
			}
			(Self::Int, ParamValue::Str(s)) if is_digits(s) => {
				return s
					.parse::<i64>()
					.map(|n| n.to_string())
					.map_err(|_| format!("'{}' does not fit in a 64-bit integer", s));
			}
			(Self::Uuid, ParamValue::Uuid(id)) => return Ok(id.hyphenated().to_string()),
			(Self::Uuid, ParamValue::Str(s)) => {
				return Uuid::parse_str(s)
					.map(|id| id.hyphenated().to_string())
					.map_err(|e| format!("'{}' is not a valid uuid: {}", s, e));
			}
			(Self::Int | Self::Uuid, other) => {
				return Err(format!(
					"expected {}, got {} value '{}'",
					self.name(),
					other.type_name(),
					other
				));
			}
			(Self::Str | Self::Slug | Self::Path, value) => value.to_string(),
		};

		if !self.accepts(&text) {
			return Err(format!("'{}' does not match the {} converter", text, self.name()));
		}
		Ok(utf8_percent_encode(&text, URL_SAFE).to_string())
	}

	fn accepts(self, text: &str) -> bool {
		if text.is_empty() {
			return false;
		}
		match self {
			Self::Int => is_digits(text),
			Self::Str => !text.contains('/'),
			Self::Slug => text
				.bytes()
				.all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
			Self::Uuid => Uuid::parse_str(text).is_ok(),
			Self::Path => true,
		}
	}
}

impl std::fmt::Display for SegmentKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

fn is_digits(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
