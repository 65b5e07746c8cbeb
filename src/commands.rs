//! Management command implementations.
//!
//! The `manage` binary parses arguments and delegates here, so each command
//! can be exercised without spawning a process.

use polls_urls::{PathParams, UrlConf, UrlError};
use std::fmt;

use crate::apps::polls::PollsView;

/// Errors from a management command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
	/// A `KEY=VALUE` argument was malformed.
	#[error("Invalid parameter argument '{0}': expected KEY=VALUE")]
	InvalidParamArg(String),

	#[error(transparent)]
	Url(#[from] UrlError),

	#[error(transparent)]
	View(#[from] crate::apps::polls::ViewError),
}

impl CommandError {
	/// Whether the error is a failed lookup.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::Url(err) if err.is_not_found())
	}
}

/// Parse a `KEY=VALUE` argument.
///
/// Values made of ASCII digits become integer parameters; anything else is
/// passed as a string and left to the route's converter.
pub fn parse_param_arg(arg: &str) -> Result<(String, polls_urls::ParamValue), CommandError> {
	let (key, value) = arg
		.split_once('=')
		.filter(|(key, _)| !key.is_empty())
		.ok_or_else(|| CommandError::InvalidParamArg(arg.to_string()))?;

	let value = match value.parse::<i64>() {
		Ok(n) if value.bytes().all(|b| b.is_ascii_digit()) => n.into(),
		_ => value.into(),
	};
	Ok((key.to_string(), value))
}

/// Output of the `resolve` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
	pub view: PollsView,
	pub view_name: Option<String>,
	pub route: String,
	pub params: PathParams,
	pub body: String,
}

impl fmt::Display for Resolved {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "view:   {}", self.view)?;
		writeln!(f, "name:   {}", self.view_name.as_deref().unwrap_or("-"))?;
		writeln!(f, "route:  {}", self.route)?;
		for (key, value) in self.params.iter() {
			writeln!(f, "param:  {}={}", key, value)?;
		}
		write!(f, "body:   {}", self.body)
	}
}

/// List every route as `ROUTE<TAB>NAME` lines, with `-` for unnamed routes.
pub fn show_urls(urlconf: &UrlConf<PollsView>) -> Vec<String> {
	let views = urlconf.url_list();
	views
		.into_iter()
		.map(|entry| {
			format!(
				"/{}{}\t{}",
				urlconf.settings().script_prefix.trim_start_matches('/'),
				entry.route,
				entry.view_name.as_deref().unwrap_or("-")
			)
		})
		.collect()
}

/// Resolve `path` and render the matched view.
pub fn resolve(urlconf: &UrlConf<PollsView>, path: &str) -> Result<Resolved, CommandError> {
	let matched = urlconf.resolve(path)?;
	let view = *matched.handler;
	let body = view.call(&matched.params)?;
	Ok(Resolved {
		view,
		view_name: matched.view_name(),
		route: matched.route,
		params: matched.params,
		body,
	})
}

/// Reverse `name` with `KEY=VALUE` arguments.
pub fn reverse(
	urlconf: &UrlConf<PollsView>,
	name: &str,
	args: &[String],
) -> Result<String, CommandError> {
	let params = args
		.iter()
		.map(|arg| parse_param_arg(arg))
		.collect::<Result<PathParams, _>>()?;
	Ok(urlconf.reverse(name, &params)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use polls_urls::{ParamValue, UrlSettings};
	use rstest::{fixture, rstest};

	#[fixture]
	fn urlconf() -> UrlConf<PollsView> {
		crate::config::urls::root_urlconf(UrlSettings::default()).unwrap()
	}

	#[rstest]
	#[case("question_id=5", "question_id", ParamValue::Int(5))]
	#[case("slug=hello-world", "slug", ParamValue::from("hello-world"))]
	#[case("n=-3", "n", ParamValue::from("-3"))]
	#[case("empty=", "empty", ParamValue::from(""))]
	#[case("eq=a=b", "eq", ParamValue::from("a=b"))]
	fn test_parse_param_arg(#[case] arg: &str, #[case] key: &str, #[case] value: ParamValue) {
		assert_eq!(parse_param_arg(arg).unwrap(), (key.to_string(), value));
	}

	#[rstest]
	#[case("question_id")]
	#[case("=5")]
	fn test_parse_param_arg_invalid(#[case] arg: &str) {
		assert!(matches!(
			parse_param_arg(arg),
			Err(CommandError::InvalidParamArg(_))
		));
	}

	#[rstest]
	fn test_show_urls(urlconf: UrlConf<PollsView>) {
		assert_eq!(
			show_urls(&urlconf),
			vec![
				"/polls/\tpolls:index",
				"/polls/specifics/<int:question_id>/\tpolls:detail",
				"/polls/<int:question_id>/results/\tpolls:results",
				"/polls/<int:question_id>/vote/\tpolls:vote",
			]
		);
	}

	#[rstest]
	fn test_show_urls_unnamed_route() {
		let table = polls_urls::RouteTable::builder()
			.route(polls_urls::path("about/", PollsView::Index))
			.build()
			.unwrap();
		let urlconf = UrlConf::builder().include("", table).build().unwrap();

		let lines = show_urls(&urlconf);
		assert_eq!(lines, vec!["/about/\t-"]);
		assert!(lines.iter().all(|line| line.split('\t').count() == 2));
	}

	#[rstest]
	fn test_resolve(urlconf: UrlConf<PollsView>) {
		let resolved = resolve(&urlconf, "/polls/5/vote/").unwrap();
		assert_eq!(resolved.view, PollsView::Vote);
		assert_eq!(resolved.view_name.as_deref(), Some("polls:vote"));
		assert_eq!(resolved.body, "You're voting on question 5.");
	}

	#[rstest]
	fn test_resolve_not_found(urlconf: UrlConf<PollsView>) {
		let err = resolve(&urlconf, "/polls/abc/vote/").unwrap_err();
		assert!(err.is_not_found());
	}

	#[rstest]
	fn test_reverse(urlconf: UrlConf<PollsView>) {
		let url = reverse(&urlconf, "polls:results", &["question_id=7".to_string()]).unwrap();
		assert_eq!(url, "/polls/7/results/");
	}

	#[rstest]
	fn test_reverse_invalid(urlconf: UrlConf<PollsView>) {
		let err = reverse(&urlconf, "polls:results", &["question_id=x".to_string()]).unwrap_err();
		assert!(matches!(
			err,
			CommandError::Url(UrlError::InvalidParams { .. })
		));
		assert!(!err.is_not_found());
	}
}
