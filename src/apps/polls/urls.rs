//! Route tables of the polls application.
//!
//! Two tables are provided. [`url_patterns`] is the namespaced four-route
//! table mounted by the project. [`minimal_url_patterns`] is a single-route,
//! unnamespaced table serving only the index; it is kept alongside so either
//! can be mounted.

use polls_urls::Result;
use polls_urls::prelude::*;

use super::APP_NAME;
use super::views::PollsView;

/// The polls routes, namespaced as `polls`.
///
/// - `""` → index
/// - `"specifics/<int:question_id>/"` → detail
/// - `"<int:question_id>/results/"` → results
/// - `"<int:question_id>/vote/"` → vote
pub fn url_patterns() -> Result<RouteTable<PollsView>> {
	RouteTable::builder()
		.app_name(APP_NAME)
		// ex: /polls/
		.route(path("", PollsView::Index).with_name("index"))
		// ex: /polls/specifics/5/
		.route(path("specifics/<int:question_id>/", PollsView::Detail).with_name("detail"))
		// ex: /polls/5/results/
		.route(path("<int:question_id>/results/", PollsView::Results).with_name("results"))
		// ex: /polls/5/vote/
		.route(path("<int:question_id>/vote/", PollsView::Vote).with_name("vote"))
		.build()
}

/// A single index route without a namespace.
pub fn minimal_url_patterns() -> Result<RouteTable<PollsView>> {
	RouteTable::builder()
		.route(path("", PollsView::Index).with_name("index"))
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use polls_urls::PathParams;
	use rstest::rstest;

	#[rstest]
	fn test_url_patterns_shape() {
		let table = url_patterns().unwrap();
		assert_eq!(table.app_name(), Some("polls"));
		assert_eq!(table.route_names(), vec!["index", "detail", "results", "vote"]);
	}

	#[rstest]
	fn test_minimal_url_patterns_shape() {
		let table = minimal_url_patterns().unwrap();
		assert_eq!(table.app_name(), None);
		assert_eq!(table.len(), 1);
		assert_eq!(*table.resolve("").unwrap().handler, PollsView::Index);
		assert!(table.resolve("5/results/").is_err());
	}

	#[rstest]
	fn test_tables_agree_on_index() {
		let full = url_patterns().unwrap();
		let minimal = minimal_url_patterns().unwrap();
		assert_eq!(
			full.reverse("index", &PathParams::new()).unwrap(),
			minimal.reverse("index", &PathParams::new()).unwrap()
		);
	}
}
