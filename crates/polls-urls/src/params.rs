//! Typed path parameters extracted from, or substituted into, a route.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A single converted path parameter.
///
/// The variant is chosen by the converter that captured it: `int` yields
/// [`ParamValue::Int`], `uuid` yields [`ParamValue::Uuid`], and `str`, `slug`
/// and `path` yield [`ParamValue::Str`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
	Int(i64),
	Str(String),
	Uuid(Uuid),
}

impl ParamValue {
	/// Returns the integer value, if this is an `Int`.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// Returns the string value, if this is a `Str`.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => Some(value),
			_ => None,
		}
	}

	/// Returns the UUID value, if this is a `Uuid`.
	pub fn as_uuid(&self) -> Option<Uuid> {
		match self {
			Self::Uuid(value) => Some(*value),
			_ => None,
		}
	}

	pub(crate) fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "int",
			Self::Str(_) => "str",
			Self::Uuid(_) => "uuid",
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(value) => write!(f, "{}", value),
			Self::Str(value) => f.write_str(value),
			Self::Uuid(value) => write!(f, "{}", value.hyphenated()),
		}
	}
}

impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Uuid> for ParamValue {
	fn from(value: Uuid) -> Self {
		Self::Uuid(value)
	}
}

/// Named path parameters, kept in the order they appear in the route.
///
/// Equality ignores order, so a match built from `"<int:a>/<int:b>/"` equals
/// a map built with `b` inserted first.
///
/// # Examples
///
/// ```
/// use polls_urls::PathParams;
///
/// let params = PathParams::new().with("question_id", 5);
/// assert_eq!(params.get_int("question_id"), Some(5));
/// assert_eq!(params.get_str("question_id"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams(IndexMap<String, ParamValue>);

impl PathParams {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Inserts a parameter, returning the previous value for that name.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		value: impl Into<ParamValue>,
	) -> Option<ParamValue> {
		self.0.insert(name.into(), value.into())
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.0.get(name)
	}

	pub fn get_int(&self, name: &str) -> Option<i64> {
		self.get(name).and_then(ParamValue::as_int)
	}

	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(ParamValue::as_str)
	}

	pub fn contains_key(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Splits off the parameters whose names appear in `names`.
	pub(crate) fn partition(&self, names: &[String]) -> (PathParams, PathParams) {
		let mut selected = PathParams::new();
		let mut rest = PathParams::new();
		for (name, value) in &self.0 {
			if names.iter().any(|n| n == name) {
				selected.0.insert(name.clone(), value.clone());
			} else {
				rest.0.insert(name.clone(), value.clone());
			}
		}
		(selected, rest)
	}
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		)
	}
}

impl<K, V> Extend<(K, V)> for PathParams
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (name, value) in iter {
			self.insert(name, value);
		}
	}
}

impl IntoIterator for PathParams {
	type Item = (String, ParamValue);
	type IntoIter = indexmap::map::IntoIter<String, ParamValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
