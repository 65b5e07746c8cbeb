//! Project-level URL configuration.
//!
//! A [`UrlConf`] mounts route tables under route prefixes, the way a Django
//! project's root `urls.py` uses `include()`. Each mount has an optional
//! namespace (defaulting to the table's app name) used to qualify names
//! during reverse lookup: `"polls:detail"`.
//!
//! # Examples
//!
//! ```
//! use polls_urls::{PathParams, RouteTable, UrlConf, UrlSettings, path};
//!
//! let polls = RouteTable::builder()
//!     .app_name("polls")
//!     .route(path("", "index").with_name("index"))
//!     .route(path("<int:question_id>/vote/", "vote").with_name("vote"))
//!     .build()
//!     .unwrap();
//!
//! let urlconf = UrlConf::builder()
//!     .settings(UrlSettings::default())
//!     .include("polls/", polls)
//!     .build()
//!     .unwrap();
//!
//! let matched = urlconf.resolve("/polls/5/vote/").unwrap();
//! assert_eq!(matched.view_name().as_deref(), Some("polls:vote"));
//!
//! let url = urlconf
//!     .reverse("polls:vote", &PathParams::new().with("question_id", 5))
//!     .unwrap();
//! assert_eq!(url, "/polls/5/vote/");
//! ```

use crate::error::{Result, UrlError};
use crate::params::{ParamValue, PathParams};
use crate::pattern::RoutePattern;
use crate::settings::UrlSettings;
use crate::table::{ResolverMatch, RouteTable};
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct Mount<H> {
	prefix: RoutePattern,
	namespace: Option<String>,
	table: RouteTable<H>,
}

/// One row of [`UrlConf::url_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
	/// Full route string, include prefix and route joined.
	pub route: String,
	/// Namespaced route name, if the route is named.
	pub view_name: Option<String>,
}

/// Builder for [`UrlConf`].
#[derive(Debug)]
pub struct UrlConfBuilder<H> {
	settings: UrlSettings,
	mounts: Vec<(String, Option<String>, RouteTable<H>)>,
}

impl<H> UrlConfBuilder<H> {
	/// Use `settings`; the script prefix is normalized to `/x/`.
	pub fn settings(mut self, settings: UrlSettings) -> Self {
		self.settings = settings.normalized();
		self
	}

	/// Mount `table` under `prefix`, namespaced by the table's app name.
	pub fn include(mut self, prefix: impl Into<String>, table: RouteTable<H>) -> Self {
		self.mounts.push((prefix.into(), None, table));
		self
	}

	/// Mount `table` under `prefix` with an explicit namespace.
	pub fn include_as(
		mut self,
		prefix: impl Into<String>,
		table: RouteTable<H>,
		namespace: impl Into<String>,
	) -> Self {
		self.mounts
			.push((prefix.into(), Some(namespace.into()), table));
		self
	}

	/// Compile prefixes and check namespaces.
	///
	/// # Errors
	///
	/// - [`UrlError::InvalidPattern`] if a prefix is malformed
	/// - [`UrlError::ImproperlyConfigured`] if two mounts share a namespace,
	///   two unnamespaced mounts expose the same route name, or a prefix
	///   parameter collides with a route parameter
	pub fn build(self) -> Result<UrlConf<H>> {
		let mut mounts = Vec::with_capacity(self.mounts.len());
		let mut namespaces = HashSet::new();
		let mut global_names = HashSet::new();

		for (prefix, namespace, table) in self.mounts {
			let prefix = RoutePattern::parse(&prefix)?;
			let namespace = namespace.or_else(|| table.app_name().map(str::to_string));

			match &namespace {
				Some(ns) => {
					if ns.is_empty() || ns.contains(':') {
						return Err(UrlError::ImproperlyConfigured(format!(
							"namespace '{}' must be non-empty and must not contain ':'",
							ns
						)));
					}
					if !namespaces.insert(ns.clone()) {
						return Err(UrlError::ImproperlyConfigured(format!(
							"namespace '{}' is not unique",
							ns
						)));
					}
				}
				None => {
					for name in table.route_names() {
						if !global_names.insert(name.to_string()) {
							return Err(UrlError::ImproperlyConfigured(format!(
								"route name '{}' is defined by more than one unnamespaced include",
								name
							)));
						}
					}
				}
			}

			for route in table.routes() {
				if let Some(clash) = route
					.pattern()
					.param_names()
					.iter()
					.find(|name| prefix.param_names().contains(*name))
				{
					return Err(UrlError::ImproperlyConfigured(format!(
						"parameter '{}' appears in both prefix '{}' and route '{}'",
						clash,
						prefix,
						route.pattern()
					)));
				}
			}

			mounts.push(Mount {
				prefix,
				namespace,
				table,
			});
		}

		tracing::info!(
			mounts = mounts.len(),
			script_prefix = %self.settings.script_prefix,
			"url configuration built"
		);

		Ok(UrlConf {
			settings: self.settings,
			mounts,
		})
	}
}

/// The root URL configuration of a project.
///
/// Immutable once built; lookups only read.
#[derive(Debug, Clone)]
pub struct UrlConf<H> {
	settings: UrlSettings,
	mounts: Vec<Mount<H>>,
}

impl<H> UrlConf<H> {
	pub fn builder() -> UrlConfBuilder<H> {
		UrlConfBuilder {
			settings: UrlSettings::default(),
			mounts: Vec::new(),
		}
	}

	pub fn settings(&self) -> &UrlSettings {
		&self.settings
	}

	/// Returns the namespaces of all mounts, in mount order.
	pub fn namespaces(&self) -> Vec<&str> {
		self.mounts
			.iter()
			.filter_map(|m| m.namespace.as_deref())
			.collect()
	}

	/// Resolve a request path.
	///
	/// `path` is relative to the script prefix (Django's `path_info`); a
	/// single leading `/` is ignored. Mounts are tried in order, and within a
	/// mount the first matching route wins.
	pub fn resolve(&self, path: &str) -> Result<ResolverMatch<'_, H>> {
		let relative = path.strip_prefix('/').unwrap_or(path);

		for mount in &self.mounts {
			let Some((prefix_params, tail)) = mount.prefix.match_prefix(relative) else {
				continue;
			};
			let Some(mut matched) = mount.table.match_relative(tail) else {
				continue;
			};

			let mut params = prefix_params;
			params.extend(matched.params);
			matched.params = params;
			matched.namespace = mount.namespace.as_deref();
			matched.route = format!("{}{}", mount.prefix, matched.route);

			tracing::debug!(path, route = %matched.route, "resolved");
			return Ok(matched);
		}

		tracing::debug!(path, "no route matched");
		Err(UrlError::path_not_found(path))
	}

	/// Reverse a (possibly namespaced) route name to an absolute path.
	///
	/// The result starts with the configured script prefix.
	pub fn reverse(&self, name: &str, params: &PathParams) -> Result<String> {
		let (namespace, local) = match name.rsplit_once(':') {
			Some((ns, local)) => (Some(ns), local),
			None => (None, name),
		};

		let mount = self
			.mounts
			.iter()
			.find(|m| m.namespace.as_deref() == namespace && m.table.has_route(local))
			.ok_or_else(|| UrlError::name_not_found(name))?;

		let (prefix_params, route_params) = params.partition(mount.prefix.param_names());
		let prefix = mount
			.prefix
			.render(&prefix_params)
			.map_err(|reason| UrlError::InvalidParams {
				name: name.to_string(),
				reason,
			})?;
		let route = mount
			.table
			.reverse(local, &route_params)
			.map_err(|err| match err {
				UrlError::InvalidParams { reason, .. } => UrlError::InvalidParams {
					name: name.to_string(),
					reason,
				},
				other => other,
			})?;

		Ok(format!("{}{}{}", self.settings.script_prefix, prefix, route))
	}

	/// Reverse with parameters given as a slice of pairs.
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

	/// Returns the redirect target when `path` only resolves with a trailing slash.
	///
	/// `path` is relative to the script prefix like in [`resolve`](Self::resolve);
	/// the target is absolute and starts with the script prefix. Mirrors
	/// Django's `APPEND_SLASH` handling in `CommonMiddleware`.
	pub fn should_append_slash(&self, path: &str) -> Option<String> {
		if !self.settings.append_slash || path.ends_with('/') || self.resolve(path).is_ok() {
			return None;
		}
		let candidate = format!("{}/", path);
		self.resolve(&candidate).ok()?;

		let relative = candidate.strip_prefix('/').unwrap_or(&candidate);
		let redirect = format!("{}{}", self.settings.script_prefix, relative);
		tracing::debug!(path, redirect = %redirect, "append slash");
		Some(redirect)
	}

	/// Lists every route with its full route string and view name.
	pub fn url_list(&self) -> Vec<UrlEntry> {
		self.mounts
			.iter()
			.flat_map(|mount| {
				mount.table.routes().iter().map(move |route| UrlEntry {
					route: format!("{}{}", mount.prefix, route.pattern()),
					view_name: route.name().map(|name| match &mount.namespace {
						Some(ns) => format!("{}:{}", ns, name),
						None => name.to_string(),
					}),
				})
			})
			.collect()
	}
}
