//! # Polls URLs
//!
//! Django-style URL routing: ordered route tables with typed path
//! converters, name-based reverse lookup, and project-level URL
//! configurations that mount tables under prefixes and namespaces.
//!
//! - **Route tables**: `path()` declarations, first match wins
//! - **Typed segments**: `int`, `str`, `slug`, `uuid` and `path` converters,
//!   validated when the table is built
//! - **Reverse lookup**: `reverse("polls:detail", params)` with parameter
//!   type checking
//! - **Namespaces**: `include()`-style mounting with per-table app names
//!
//! Tables are values built once at startup and passed to whatever dispatches
//! requests; nothing is registered globally.
//!
//! ## Example
//!
//! ```
//! use polls_urls::{PathParams, RouteTable, path};
//!
//! let table = RouteTable::builder()
//!     .app_name("polls")
//!     .route(path("", "index").with_name("index"))
//!     .route(path("specifics/<int:question_id>/", "detail").with_name("detail"))
//!     .route(path("<int:question_id>/results/", "results").with_name("results"))
//!     .route(path("<int:question_id>/vote/", "vote").with_name("vote"))
//!     .build()
//!     .unwrap();
//!
//! let (handler, params) = table.resolve("specifics/5/").unwrap().into_parts();
//! assert_eq!(*handler, "detail");
//! assert_eq!(params, PathParams::new().with("question_id", 5));
//!
//! assert!(table.resolve("abc/results/").is_err());
//! assert_eq!(table.reverse_with("detail", &[("question_id", 5)]).unwrap(), "specifics/5/");
//! ```

pub mod converters;
pub mod error;
pub mod params;
pub mod pattern;
pub mod route;
pub mod settings;
pub mod table;
pub mod urlconf;

pub use converters::SegmentKind;
pub use error::{Lookup, Result, UrlError};
pub use params::{ParamValue, PathParams};
pub use pattern::{RoutePattern, Segment};
pub use route::{Route, UrlPattern, path};
pub use settings::UrlSettings;
pub use table::{ResolverMatch, RouteTable, RouteTableBuilder};
pub use urlconf::{UrlConf, UrlConfBuilder, UrlEntry};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		ParamValue, PathParams, ResolverMatch, RouteTable, UrlConf, UrlError, UrlSettings, path,
	};
}
