//! The polls application.
//!
//! Routes map to the four views of Django's polls tutorial: the index, a
//! question's detail page, its results, and the vote action.

pub mod urls;
pub mod views;

/// Application namespace used when reversing polls routes (`"polls:detail"`).
pub const APP_NAME: &str = "polls";

pub use views::{PollsView, ViewError};
