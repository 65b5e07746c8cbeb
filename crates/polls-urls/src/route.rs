//! Route declarations.

use crate::error::Result;
use crate::pattern::RoutePattern;

/// A route declaration: route string, handler and optional name.
///
/// Created with [`path`] and turned into a [`UrlPattern`] when a
/// [`RouteTable`](crate::RouteTable) is built, so that every malformed route
/// in a table is reported from one place.
#[derive(Debug, Clone)]
pub struct Route<H> {
	pub route: String,
	pub handler: H,
	pub name: Option<String>,
}

impl<H> Route<H> {
	/// Set the name of the route, used for reverse lookup
	///
	/// # Examples
	///
	/// ```
	/// use polls_urls::path;
	///
	/// let route = path("", "index").with_name("index");
	/// assert_eq!(route.name.as_deref(), Some("index"));
	/// ```
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}
}

/// Declare a route, like Django's `django.urls.path()`.
///
/// # Examples
///
/// ```
/// use polls_urls::path;
///
/// let route = path("<int:question_id>/vote/", "vote").with_name("vote");
/// assert_eq!(route.route, "<int:question_id>/vote/");
/// assert_eq!(route.handler, "vote");
/// ```
pub fn path<H>(route: impl Into<String>, handler: H) -> Route<H> {
	Route {
		route: route.into(),
		handler,
		name: None,
	}
}

/// A compiled route, owned by a route table.
///
/// Similar to Django's URLPattern.
#[derive(Debug, Clone)]
pub struct UrlPattern<H> {
	pattern: RoutePattern,
	handler: H,
	name: Option<String>,
}

impl<H> UrlPattern<H> {
	pub(crate) fn compile(route: Route<H>) -> Result<Self> {
		Ok(Self {
			pattern: RoutePattern::parse(&route.route)?,
			handler: route.handler,
			name: route.name,
		})
	}

	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}
