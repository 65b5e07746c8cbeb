//! The route table: ordered routes with forward and reverse lookup.
//!
//! A [`RouteTable`] is built once, validated at construction time, and is
//! immutable afterwards. Lookups take `&self` and never mutate, so a table
//! can be shared across threads behind an `Arc` (or a plain reference)
//! without any locking.

use crate::error::{Result, UrlError};
use crate::params::{ParamValue, PathParams};
use crate::route::{Route, UrlPattern};
use std::collections::HashMap;

/// The result of a successful resolve.
///
/// Similar to Django's `ResolverMatch`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverMatch<'a, H> {
	/// The handler of the matched route.
	pub handler: &'a H,
	/// Converted path parameters.
	pub params: PathParams,
	/// Name of the matched route, if it has one.
	pub url_name: Option<&'a str>,
	/// Namespace the route was reached through.
	pub namespace: Option<&'a str>,
	/// Route string that matched, including any include prefix.
	pub route: String,
}

impl<'a, H> ResolverMatch<'a, H> {
	/// Returns the namespaced route name (e.g. `"polls:detail"`).
	pub fn view_name(&self) -> Option<String> {
		let name = self.url_name?;
		Some(match self.namespace {
			Some(ns) => format!("{}:{}", ns, name),
			None => name.to_string(),
		})
	}

	/// Splits the match into the handler and its parameters.
	pub fn into_parts(self) -> (&'a H, PathParams) {
		(self.handler, self.params)
	}
}

/// Builder for [`RouteTable`].
#[derive(Debug)]
pub struct RouteTableBuilder<H> {
	app_name: Option<String>,
	routes: Vec<Route<H>>,
}

impl<H> RouteTableBuilder<H> {
	/// Set the application namespace, like Django's `app_name`.
	pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
		self.app_name = Some(app_name.into());
		self
	}

	/// Append a route. Routes are tried in the order they are added.
	pub fn route(mut self, route: Route<H>) -> Self {
		self.routes.push(route);
		self
	}

	pub fn routes(mut self, routes: impl IntoIterator<Item = Route<H>>) -> Self {
		self.routes.extend(routes);
		self
	}

	/// Compile every route and check the table's invariants.
	///
	/// # Errors
	///
	/// - [`UrlError::InvalidPattern`] if a route string is malformed
	/// - [`UrlError::ImproperlyConfigured`] if two routes share a name, or
	///   the app name is empty or contains `:`
	pub fn build(self) -> Result<RouteTable<H>> {
		if let Some(app_name) = &self.app_name
			&& (app_name.is_empty() || app_name.contains(':'))
		{
			return Err(UrlError::ImproperlyConfigured(format!(
				"app name '{}' must be non-empty and must not contain ':'",
				app_name
			)));
		}

		let mut patterns = Vec::with_capacity(self.routes.len());
		let mut names = HashMap::new();
		for (index, route) in self.routes.into_iter().enumerate() {
			let pattern = UrlPattern::compile(route)?;
			if let Some(name) = pattern.name() {
				if name.is_empty() || name.contains(':') {
					return Err(UrlError::ImproperlyConfigured(format!(
						"route name '{}' must be non-empty and must not contain ':'",
						name
					)));
				}
				if names.insert(name.to_string(), index).is_some() {
					return Err(UrlError::ImproperlyConfigured(format!(
						"duplicate route name '{}' in {}",
						name,
						describe(self.app_name.as_deref())
					)));
				}
			}
			patterns.push(pattern);
		}

		tracing::info!(
			app_name = self.app_name.as_deref().unwrap_or(""),
			routes = patterns.len(),
			"route table built"
		);

		Ok(RouteTable {
			app_name: self.app_name,
			patterns,
			names,
		})
	}
}

fn describe(app_name: Option<&str>) -> String {
	match app_name {
		Some(app) => format!("route table '{}'", app),
		None => "route table".to_string(),
	}
}

/// An ordered, immutable collection of routes.
///
/// Similar to a Django `urlpatterns` list together with its `app_name`.
///
/// # Examples
///
/// ```
/// use polls_urls::{RouteTable, PathParams, path};
///
/// let table = RouteTable::builder()
///     .app_name("polls")
///     .route(path("", "index").with_name("index"))
///     .route(path("<int:question_id>/vote/", "vote").with_name("vote"))
///     .build()
///     .unwrap();
///
/// let matched = table.resolve("5/vote/").unwrap();
/// assert_eq!(*matched.handler, "vote");
/// assert_eq!(matched.params.get_int("question_id"), Some(5));
///
/// let url = table
///     .reverse("vote", &PathParams::new().with("question_id", 5))
///     .unwrap();
/// assert_eq!(url, "5/vote/");
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
	app_name: Option<String>,
	patterns: Vec<UrlPattern<H>>,
	names: HashMap<String, usize>,
}

impl<H> RouteTable<H> {
	pub fn builder() -> RouteTableBuilder<H> {
		RouteTableBuilder {
			app_name: None,
			routes: Vec::new(),
		}
	}

	pub fn app_name(&self) -> Option<&str> {
		self.app_name.as_deref()
	}

	/// Returns the compiled routes in declaration order.
	pub fn routes(&self) -> &[UrlPattern<H>] {
		&self.patterns
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}

	/// Check if a route name is registered
	pub fn has_route(&self, name: &str) -> bool {
		self.local_name(name)
			.is_some_and(|local| self.names.contains_key(local))
	}

	/// Returns the route names in declaration order.
	pub fn route_names(&self) -> Vec<&str> {
		self.patterns.iter().filter_map(UrlPattern::name).collect()
	}

	/// Resolve a path to the first route that matches it.
	///
	/// Routes are tried in declaration order and the first match wins. A
	/// single leading `/` is ignored so request paths can be passed as-is.
	///
	/// # Errors
	///
	/// Returns [`UrlError::NotFound`] when no route matches, including when a
	/// literal part matches but a typed segment fails to convert.
	pub fn resolve(&self, path: &str) -> Result<ResolverMatch<'_, H>> {
		let relative = path.strip_prefix('/').unwrap_or(path);
		match self.match_relative(relative) {
			Some(matched) => {
				tracing::debug!(path, route = %matched.route, "resolved");
				Ok(matched)
			}
			None => {
				tracing::debug!(path, tried = self.patterns.len(), "no route matched");
				Err(UrlError::path_not_found(path))
			}
		}
	}

	pub(crate) fn match_relative(&self, path: &str) -> Option<ResolverMatch<'_, H>> {
		self.patterns.iter().find_map(|pattern| {
			let params = pattern.pattern().match_full(path)?;
			Some(ResolverMatch {
				handler: pattern.handler(),
				params,
				url_name: pattern.name(),
				namespace: self.app_name.as_deref(),
				route: pattern.pattern().as_str().to_string(),
			})
		})
	}

	/// Reverse a route name to a path, like Django's `reverse()`.
	///
	/// `name` is either a bare route name or `"app_name:name"` matching this
	/// table's app name. The returned path has no leading slash.
	///
	/// # Errors
	///
	/// - [`UrlError::NotFound`] if no route carries the name
	/// - [`UrlError::InvalidParams`] if a parameter is missing, unexpected,
	///   or does not satisfy its converter
	pub fn reverse(&self, name: &str, params: &PathParams) -> Result<String> {
		let index = self
			.local_name(name)
			.and_then(|local| self.names.get(local))
			.ok_or_else(|| UrlError::name_not_found(name))?;

		let url = self.patterns[*index]
			.pattern()
			.render(params)
			.map_err(|reason| UrlError::InvalidParams {
				name: name.to_string(),
				reason,
			})?;

		tracing::debug!(name, url = %url, "reversed");
		Ok(url)
	}

	/// Reverse with parameters given as a slice of pairs.
	///
	/// # Examples
	///
	/// ```
	/// use polls_urls::{RouteTable, path};
	///
	/// let table = RouteTable::builder()
	///     .route(path("specifics/<int:question_id>/", "detail").with_name("detail"))
	///     .build()
	///     .unwrap();
	///
	/// let url = table.reverse_with("detail", &[("question_id", 5)]).unwrap();
	/// assert_eq!(url, "specifics/5/");
	/// ```
	pub fn reverse_with<K, V>(&self, name: &str, params: &[(K, V)]) -> Result<String>
	where
		K: AsRef<str>,
		V: Clone + Into<ParamValue>,
	{
		let params: PathParams = params
			.iter()
			.map(|(k, v)| (k.as_ref().to_string(), v.clone()))
			.collect();
		self.reverse(name, &params)
	}

	/// Strips this table's own namespace from `name`.
	fn local_name<'n>(&self, name: &'n str) -> Option<&'n str> {
		match name.rsplit_once(':') {
			None => Some(name),
			Some((ns, local)) if self.app_name.as_deref() == Some(ns) => Some(local),
			Some(_) => None,
		}
	}
}
