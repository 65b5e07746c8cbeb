//! Views of the polls application.
//!
//! A route table stores a [`PollsView`] as its handler reference; the
//! dispatcher calls [`PollsView::call`] with the parameters extracted by
//! `resolve`.

use polls_urls::PathParams;
use std::fmt;

/// Errors raised while rendering a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
	/// A required path parameter was absent or not an integer.
	#[error("Missing or invalid path parameter: {0}")]
	MissingParam(&'static str),
}

/// The polls views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollsView {
	/// GET /polls/
	Index,
	/// GET /polls/specifics/{question_id}/
	Detail,
	/// GET /polls/{question_id}/results/
	Results,
	/// POST /polls/{question_id}/vote/
	Vote,
}

impl PollsView {
	/// Returns the view's function name.
	pub fn name(self) -> &'static str {
		match self {
			Self::Index => "index",
			Self::Detail => "detail",
			Self::Results => "results",
			Self::Vote => "vote",
		}
	}

	/// Render the view's response body.
	pub fn call(self, params: &PathParams) -> Result<String, ViewError> {
		let body = match self {
			Self::Index => "Hello, world. You're at the polls index.".to_string(),
			Self::Detail => format!("You're looking at question {}.", question_id(params)?),
			Self::Results => format!(
				"You're looking at the results of question {}.",
				question_id(params)?
			),
			Self::Vote => format!("You're voting on question {}.", question_id(params)?),
		};
		tracing::debug!(view = self.name(), "view rendered");
		Ok(body)
	}
}

impl fmt::Display for PollsView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "polls.views.{}", self.name())
	}
}

fn question_id(params: &PathParams) -> Result<i64, ViewError> {
	params
		.get_int("question_id")
		.ok_or(ViewError::MissingParam("question_id"))
}
