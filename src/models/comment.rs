use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// A timestamped note attached to a goal.
///
/// The author is embedded by value, so later changes to the user record do
/// not rewrite past comments. Comments are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub user_id: String,
    pub user: User,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
