//! # Polls site
//!
//! The polls project from Django's tutorial, reduced to its URL layer.
//!
//! - [`apps::polls`] owns the views and the route tables
//! - [`config::urls`] mounts the polls routes under `polls/`
//! - [`config::settings`] loads the `[urls]` settings table
//! - [`commands`] backs the `manage` binary
//!
//! ## Example
//!
//! ```
//! use polls_site::apps::polls::PollsView;
//! use polls_site::config::urls::root_urlconf;
//! use polls_site::polls_urls::{PathParams, UrlSettings};
//!
//! let urlconf = root_urlconf(UrlSettings::default()).unwrap();
//!
//! let matched = urlconf.resolve("/polls/5/results/").unwrap();
//! assert_eq!(*matched.handler, PollsView::Results);
//! assert_eq!(
//!     matched.handler.call(&matched.params).unwrap(),
//!     "You're looking at the results of question 5."
//! );
//!
//! let url = urlconf
//!     .reverse("polls:detail", &PathParams::new().with("question_id", 5))
//!     .unwrap();
//! assert_eq!(url, "/polls/specifics/5/");
//! ```

pub mod apps;
pub mod commands;
pub mod config;

pub use polls_urls;
