//! Route pattern parsing and matching.
//!
//! Route strings use Django's `path()` syntax: literal text interleaved with
//! typed parameters in angle brackets.
//!
//! - `"specifics/<int:question_id>/"` - integer parameter
//! - `"<slug:slug>/"` - slug parameter
//! - `"<name>/"` - parameter with the default `str` converter
//! - `"files/<path:rest>"` - parameter that may span several segments
//!
//! Parameters are parsed with nom parser combinators, then the pattern is
//! compiled into anchored regexes used for matching.

use crate::converters::SegmentKind;
use crate::error::{Result, UrlError};
use crate::params::PathParams;
use nom::{
	IResult, Parser,
	branch::alt,
	bytes::complete::tag,
	character::complete::{alpha1, alphanumeric1, char},
	combinator::{all_consuming, map, recognize},
	multi::many0_count,
	sequence::{pair, separated_pair},
};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Maximum allowed length for a route string in bytes.
const MAX_ROUTE_LENGTH: usize = 1024;

/// Maximum allowed number of `/`-separated segments in a route string.
const MAX_ROUTE_SEGMENTS: usize = 32;

/// Maximum compiled regex size in bytes.
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A piece of a parsed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Literal text matched exactly (e.g. `"specifics/"`).
	Literal(String),
	/// A named, typed parameter (e.g. `<int:question_id>`).
	Param { name: String, kind: SegmentKind },
}

/// Parse a valid identifier (starts with letter or underscore, followed by alphanumeric or underscore)
fn identifier(input: &str) -> IResult<&str, &str> {
	recognize(pair(
		alt((alpha1, tag("_"))),
		many0_count(alt((alphanumeric1, tag("_")))),
	))
	.parse(input)
}

/// Parse the inside of `<...>`: either `converter:name` or a bare `name`
fn parameter(input: &str) -> IResult<&str, (Option<&str>, &str)> {
	alt((
		map(separated_pair(identifier, char(':'), identifier), |(conv, name)| {
			(Some(conv), name)
		}),
		map(identifier, |name| (None, name)),
	))
	.parse(input)
}

fn parse_parameter(inner: &str) -> std::result::Result<Segment, String> {
	if inner.chars().any(|c| c.is_whitespace()) {
		return Err(format!(
			"route cannot contain whitespace in angle brackets <{}>",
			inner
		));
	}

	let (_, (converter, name)) = all_consuming(parameter)
		.parse(inner)
		.map_err(|_| format!("invalid parameter <{}>", inner))?;

	let kind = match converter {
		None => SegmentKind::Str,
		Some(conv) => SegmentKind::from_name(conv).ok_or_else(|| {
			format!(
				"unknown converter '{}' in <{}>, expected one of {}",
				conv,
				inner,
				SegmentKind::valid_names().join(", ")
			)
		})?,
	};

	Ok(Segment::Param {
		name: name.to_string(),
		kind,
	})
}

fn parse_segments(route: &str) -> std::result::Result<Vec<Segment>, String> {
	let mut segments = Vec::new();
	let mut rest = route;

	while !rest.is_empty() {
		let Some(start) = rest.find('<') else {
			segments.push(Segment::Literal(rest.to_string()));
			break;
		};
		if start > 0 {
			segments.push(Segment::Literal(rest[..start].to_string()));
		}

		let tail = &rest[start..];
		let end = tail.find('>').ok_or_else(|| {
			format!("unclosed '<' at byte {}", route.len() - tail.len())
		})?;
		let segment = parse_parameter(&tail[1..end])?;

		if let Segment::Param { name, .. } = &segment
			&& segments
				.iter()
				.any(|s| matches!(s, Segment::Param { name: n, .. } if n == name))
		{
			return Err(format!("duplicate parameter name '{}'", name));
		}

		segments.push(segment);
		rest = &tail[end + 1..];
	}

	Ok(segments)
}

/// A compiled route pattern.
///
/// # Examples
///
/// ```
/// use polls_urls::{RoutePattern, ParamValue};
///
/// let pattern = RoutePattern::parse("<int:question_id>/results/").unwrap();
/// let params = pattern.match_full("5/results/").unwrap();
/// assert_eq!(params.get("question_id"), Some(&ParamValue::Int(5)));
///
/// assert!(pattern.match_full("abc/results/").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
	route: String,
	segments: Vec<Segment>,
	param_names: Vec<String>,
	full: Regex,
	prefix: Regex,
}

impl RoutePattern {
	/// Parses and compiles a route string.
	///
	/// # Errors
	///
	/// Returns [`UrlError::InvalidPattern`] if the route is too long, has too
	/// many segments, compiles to an oversized regex, has an unclosed `<`, an invalid identifier, whitespace or an unknown converter
	/// inside angle brackets, or repeats a parameter name.
	pub fn parse(route: &str) -> Result<Self> {
		let invalid = |reason: String| UrlError::InvalidPattern {
			pattern: route.to_string(),
			reason,
		};

		if route.len() > MAX_ROUTE_LENGTH {
			return Err(invalid(format!(
				"route length {} exceeds maximum allowed length of {} bytes",
				route.len(),
				MAX_ROUTE_LENGTH
			)));
		}
		let segment_count = route.split('/').count();
		if segment_count > MAX_ROUTE_SEGMENTS {
			return Err(invalid(format!(
				"route has {} path segments, exceeding maximum of {}",
				segment_count, MAX_ROUTE_SEGMENTS
			)));
		}
		if route.starts_with('/') {
			tracing::warn!(
				route,
				"route pattern begins with a '/'; remove it, leading slashes are stripped before matching"
			);
		}

		let segments = parse_segments(route).map_err(invalid)?;

		let mut body = String::new();
		let mut param_names = Vec::new();
		for segment in &segments {
			match segment {
				Segment::Literal(text) => body.push_str(&regex::escape(text)),
				Segment::Param { name, kind } => {
					body.push_str(&format!("(?P<{}>{})", name, kind.regex()));
					param_names.push(name.clone());
				}
			}
		}

		let compile = |source: String| {
			RegexBuilder::new(&source)
				.size_limit(MAX_REGEX_SIZE)
				.build()
				.map_err(|e| invalid(format!("failed to compile regex: {}", e)))
		};
		let full = compile(format!("^{}$", body))?;
		let prefix = compile(format!("^{}", body))?;

		Ok(Self {
			route: route.to_string(),
			segments,
			param_names,
			full,
			prefix,
		})
	}

	/// Returns the original route string.
	pub fn as_str(&self) -> &str {
		&self.route
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns the parameter names in declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns `true` when the pattern contains no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Matches the whole of `path` and converts every captured parameter.
	pub fn match_full(&self, path: &str) -> Option<PathParams> {
		let caps = self.full.captures(path)?;
		self.convert(&caps)
	}

	/// Matches the start of `path`, returning the parameters and the unconsumed tail.
	pub fn match_prefix<'p>(&self, path: &'p str) -> Option<(PathParams, &'p str)> {
		let caps = self.prefix.captures(path)?;
		let end = caps.get(0)?.end();
		let params = self.convert(&caps)?;
		Some((params, &path[end..]))
	}

	fn convert(&self, caps: &regex::Captures<'_>) -> Option<PathParams> {
		let mut params = PathParams::new();
		for segment in &self.segments {
			if let Segment::Param { name, kind } = segment {
				let raw = caps.name(name)?.as_str();
				params.insert(name.clone(), kind.to_value(raw)?);
			}
		}
		Some(params)
	}

	/// Substitutes `params` into the pattern.
	///
	/// Every parameter must be supplied, none may be extra, and each value
	/// must satisfy its converter. The error is a human-readable reason.
	pub(crate) fn render(&self, params: &PathParams) -> std::result::Result<String, String> {
		for name in &self.param_names {
			if !params.contains_key(name) {
				return Err(format!("missing parameter '{}'", name));
			}
		}
		if let Some(extra) = params
			.keys()
			.find(|key| !self.param_names.iter().any(|n| n.as_str() == *key))
		{
			return Err(format!("unexpected parameter '{}'", extra));
		}

		let mut url = String::with_capacity(self.route.len());
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => url.push_str(text),
				Segment::Param { name, kind } => {
					let value = params
						.get(name)
						.ok_or_else(|| format!("missing parameter '{}'", name))?;
					let rendered = kind
						.to_url(value)
						.map_err(|reason| format!("parameter '{}': {}", name, reason))?;
					url.push_str(&rendered);
				}
			}
		}
		Ok(url)
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.route == other.route
	}
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.route)
	}
}
