//! Domain models for goalboard.
//!
//! # Core Concepts
//!
//! - [`Goal`]: A trackable objective with a progress/target pair, category,
//!   priority and due date. Owns its milestones and comments.
//! - [`Milestone`]: A checkpoint inside a goal with its own completion flag.
//! - [`Comment`]: An append-only, user-attributed note on a goal.
//! - [`User`] and [`Team`]: Fixture people. Goals refer to them by id, comments
//!   embed the author by value.
//!
//! ## Derived State
//!
//! - [`GoalFilter`]: The conjunction of category, completion and priority
//!   predicates used to compute the filtered view of the store.

mod comment;
mod filter;
mod goal;
mod milestone;
mod user;

pub use comment::*;
pub use filter::*;
pub use goal::*;
pub use milestone::*;
pub use user::*;
