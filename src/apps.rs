//! Installed applications.
//!
//! Each application owns its views and its route table(s); the project's
//! root URL configuration in [`crate::config::urls`] decides where they are
//! mounted.

pub mod polls;
