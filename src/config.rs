//! Project configuration: settings loading and the root URL configuration.

pub mod settings;
pub mod urls;
