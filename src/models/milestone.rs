use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named checkpoint within a goal.
///
/// Milestone completion is toggled by the user and is independent of the
/// owning goal's completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: DateTime<Utc>,
}

/// Input for adding a milestone to a goal.
///
/// `completed` has no default inside the store; callers decide the initial
/// state (new milestones from the shell start open).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMilestoneInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}
