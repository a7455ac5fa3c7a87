//! goalboard: in-memory goal tracking.
//!
//! [`store::GoalStore`] owns the goal collection, the selected goal and the
//! active filters. Everything else is a caller of the store: fixtures seed it,
//! [`validation`] guards its inputs, [`dashboard`] and [`render`] read from it
//! and [`shell`] drives it from user commands.

pub mod config;
pub mod dashboard;
pub mod models;
pub mod render;
pub mod shell;
pub mod store;
pub mod validation;
