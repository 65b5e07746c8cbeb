//! Reverse/resolve property-based tests
//!
//! Property tests for the round trip between reverse lookup and resolution.

use polls_urls::{PathParams, RouteTable, UrlConf, path};
use proptest::prelude::*;

fn table() -> RouteTable<&'static str> {
	RouteTable::builder()
		.app_name("blog")
		.route(path("", "index").with_name("index"))
		.route(path("<int:year>/<slug:slug>/", "entry").with_name("entry"))
		.route(path("tags/<str:tag>/", "tag").with_name("tag"))
		.route(path("files/<path:rest>", "file").with_name("file"))
		.build()
		.unwrap()
}

proptest! {
	/// Test: int parameters round trip
	///
	/// Category: Property
	/// Verifies that resolve(reverse(name, params)) returns the same route and params.
	#[test]
	fn prop_int_and_slug_round_trip(year in 0i64..=i64::MAX, slug in "[-a-zA-Z0-9_]{1,30}") {
		let table = table();
		let params = PathParams::new().with("year", year).with("slug", slug.as_str());

		let url = table.reverse("entry", &params).unwrap();
		let matched = table.resolve(&url).unwrap();

		prop_assert_eq!(*matched.handler, "entry");
		prop_assert_eq!(matched.params, params);
	}

	/// Test: str parameters round trip
	///
	/// Category: Property
	/// Verifies that any text without `/` survives reverse and resolve
	/// unchanged, including characters that must be percent-encoded.
	#[test]
	fn prop_str_round_trip(tag in "[^/]{1,30}") {
		let table = table();
		let params = PathParams::new().with("tag", tag.as_str());

		let url = table.reverse("tag", &params).unwrap();
		let matched = table.resolve(&url).unwrap();

		prop_assert_eq!(*matched.handler, "tag");
		prop_assert_eq!(matched.params, params);
	}

	/// Test: path parameters keep their slashes
	///
	/// Category: Property
	#[test]
	fn prop_path_round_trip(parts in prop::collection::vec("[a-z0-9]{1,8}", 1..5)) {
		let table = table();
		let rest = parts.join("/");
		let params = PathParams::new().with("rest", rest.as_str());

		let url = table.reverse("file", &params).unwrap();
		prop_assert_eq!(&url, &format!("files/{}", rest));
		prop_assert_eq!(table.resolve(&url).unwrap().params, params);
	}

	/// Test: encoded path parameters round trip
	///
	/// Category: Property
	#[test]
	fn prop_encoded_path_round_trip(parts in prop::collection::vec("[^/]{1,8}", 1..5)) {
		let table = table();
		let rest = parts.join("/");
		let params = PathParams::new().with("rest", rest.as_str());

		let url = table.reverse("file", &params).unwrap();
		prop_assert_eq!(table.resolve(&url).unwrap().params, params);
	}

	/// Test: negative integers never reverse
	///
	/// Category: Property
	#[test]
	fn prop_negative_int_rejected(year in i64::MIN..0i64) {
		let table = table();
		let params = PathParams::new().with("year", year).with("slug", "x");
		prop_assert!(table.reverse("entry", &params).is_err());
	}

	/// Test: namespaced round trip through a URL configuration
	///
	/// Category: Property
	#[test]
	fn prop_urlconf_round_trip(year in 0i64..10_000, slug in "[a-z]{1,12}") {
		let urlconf = UrlConf::builder().include("blog/", table()).build().unwrap();
		let params = PathParams::new().with("year", year).with("slug", slug.as_str());

		let url = urlconf.reverse("blog:entry", &params).unwrap();
		prop_assert!(url.starts_with("/blog/"));

		let matched = urlconf.resolve(&url).unwrap();
		prop_assert_eq!(matched.view_name(), Some("blog:entry".to_string()));
		prop_assert_eq!(matched.params, params);
	}
}
