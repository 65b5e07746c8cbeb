//! Root URL configuration for the polls project.

use polls_urls::{UrlConf, UrlSettings};

use crate::apps::polls::{self, PollsView};

/// Mount prefix of the polls application.
pub const POLLS_PREFIX: &str = "polls/";

/// Build the project's URL configuration.
///
/// The namespaced polls table is mounted under `polls/`.
pub fn root_urlconf(settings: UrlSettings) -> polls_urls::Result<UrlConf<PollsView>> {
	UrlConf::builder()
		.settings(settings)
		.include(POLLS_PREFIX, polls::urls::url_patterns()?)
		.build()
}
