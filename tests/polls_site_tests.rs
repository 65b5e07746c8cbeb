//! Integration tests for the polls project URL configuration.
//!
//! Covers the tutorial scenario end to end: the root urlconf built from
//! settings, dispatch through `PollsView::call`, and reverse lookups.

use polls_site::apps::polls::{PollsView, urls};
use polls_site::commands;
use polls_site::config::{settings::load_settings, urls::root_urlconf};
use polls_site::polls_urls::{PathParams, UrlConf, UrlError, UrlSettings};
use rstest::{fixture, rstest};
use std::io::Write;
use std::sync::Arc;

#[fixture]
fn urlconf() -> UrlConf<PollsView> {
	root_urlconf(UrlSettings::default()).unwrap()
}

fn question(id: i64) -> PathParams {
	PathParams::new().with("question_id", id)
}

// Test: every tutorial URL dispatches to its view with the converted id
#[rstest]
#[case("/polls/", "Hello, world. You're at the polls index.")]
#[case("/polls/specifics/5/", "You're looking at question 5.")]
#[case("/polls/5/results/", "You're looking at the results of question 5.")]
#[case("/polls/5/vote/", "You're voting on question 5.")]
fn test_dispatch(urlconf: UrlConf<PollsView>, #[case] url: &str, #[case] body: &str) {
	let matched = urlconf.resolve(url).unwrap();
	let (view, params) = matched.into_parts();
	assert_eq!(view.call(&params).unwrap(), body);
}

// Test: reverse then resolve returns the same view and parameters
#[rstest]
#[case("polls:detail", PollsView::Detail)]
#[case("polls:results", PollsView::Results)]
#[case("polls:vote", PollsView::Vote)]
fn test_round_trip(urlconf: UrlConf<PollsView>, #[case] name: &str, #[case] view: PollsView) {
	let url = urlconf.reverse(name, &question(42)).unwrap();
	let matched = urlconf.resolve(&url).unwrap();
	assert_eq!(*matched.handler, view);
	assert_eq!(matched.params, question(42));
	assert_eq!(matched.view_name().as_deref(), Some(name));
}

// Test: the old detail URL shape no longer resolves
#[rstest]
#[case("/polls/5/")]
#[case("/polls/specifics/five/")]
#[case("/polls/5/results/extra/")]
#[case("/poll/")]
#[case("/")]
fn test_not_found(urlconf: UrlConf<PollsView>, #[case] url: &str) {
	let err = urlconf.resolve(url).unwrap_err();
	assert!(err.is_not_found(), "{} should not resolve: {:?}", url, err);
}

// Test: reverse errors distinguish unknown names from bad parameters
#[rstest]
fn test_reverse_errors(urlconf: UrlConf<PollsView>) {
	assert!(
		urlconf
			.reverse("polls:delete", &question(1))
			.unwrap_err()
			.is_not_found()
	);
	assert!(
		urlconf
			.reverse("detail", &question(1))
			.unwrap_err()
			.is_not_found()
	);
	assert!(matches!(
		urlconf.reverse("polls:detail", &PathParams::new()),
		Err(UrlError::InvalidParams { .. })
	));
	assert!(matches!(
		urlconf.reverse("polls:vote", &question(-1)),
		Err(UrlError::InvalidParams { .. })
	));
}

// Test: append slash redirects only to resolvable paths
#[rstest]
fn test_append_slash(urlconf: UrlConf<PollsView>) {
	assert_eq!(
		urlconf.should_append_slash("/polls/5/vote").as_deref(),
		Some("/polls/5/vote/")
	);
	assert_eq!(urlconf.should_append_slash("/polls/5/vote/"), None);
	assert_eq!(urlconf.should_append_slash("/polls/x/vote"), None);

	let disabled = root_urlconf(UrlSettings::default().with_append_slash(false)).unwrap();
	assert_eq!(disabled.should_append_slash("/polls/5/vote"), None);
}

// Test: settings file drives the script prefix of reversed URLs
#[rstest]
fn test_settings_file_script_prefix() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[urls]\nscript_prefix = \"mysite\"").unwrap();

	let urlconf = root_urlconf(load_settings(Some(file.path())).unwrap()).unwrap();
	assert_eq!(
		urlconf.reverse("polls:vote", &question(3)).unwrap(),
		"/mysite/polls/3/vote/"
	);
	assert_eq!(
		commands::show_urls(&urlconf)[0],
		"/mysite/polls/\tpolls:index"
	);
	assert_eq!(
		urlconf.should_append_slash("/polls/3/vote").as_deref(),
		Some("/mysite/polls/3/vote/")
	);
}

// Test: the minimal table can be mounted instead of the namespaced one
#[rstest]
fn test_minimal_table_mounted() {
	let urlconf = UrlConf::builder()
		.include("polls/", urls::minimal_url_patterns().unwrap())
		.build()
		.unwrap();

	assert_eq!(urlconf.namespaces(), Vec::<&str>::new());
	assert_eq!(
		urlconf.reverse("index", &PathParams::new()).unwrap(),
		"/polls/"
	);
	assert!(urlconf.resolve("/polls/5/vote/").is_err());
}

// Test: a shared urlconf resolves concurrently
#[rstest]
fn test_shared_across_threads(urlconf: UrlConf<PollsView>) {
	let urlconf = Arc::new(urlconf);
	let handles: Vec<_> = (0..8)
		.map(|id| {
			let urlconf = Arc::clone(&urlconf);
			std::thread::spawn(move || {
				let url = urlconf.reverse("polls:results", &question(id)).unwrap();
				let matched = urlconf.resolve(&url).unwrap();
				matched.params.get_int("question_id")
			})
		})
		.collect();

	for (id, handle) in handles.into_iter().enumerate() {
		assert_eq!(handle.join().unwrap(), Some(id as i64));
	}
}
