//! Read models derived from the goal collection for the dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Goal;

pub const DEFAULT_ACTIVITY_LIMIT: usize = 5;

/// Completion counts across the whole collection (filters do not apply).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Completed share in whole percent, rounded. 0 for an empty collection.
    pub completion_rate: u32,
}

impl Summary {
    pub fn of(goals: &[Goal]) -> Self {
        let total = goals.len();
        let completed = goals.iter().filter(|g| g.is_completed).count();
        let completion_rate = if total > 0 {
            (completed as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total,
            completed,
            in_progress: total - completed,
            completion_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    GoalCreated,
    CommentAdded { author: String, content: String },
    MilestoneCompleted { milestone: String },
    ProgressUpdated { progress: f64 },
}

/// One entry in the recent activity feed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityItem {
    pub goal_id: Uuid,
    pub goal_title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

/// Build the activity feed, newest first, keeping at most `limit` items.
///
/// Goals do not record when milestones were completed or progress changed,
/// so completed milestones are dated by their due date and in-flight progress
/// by the goal's creation time.
pub fn recent_activity(goals: &[Goal], limit: usize) -> Vec<ActivityItem> {
    let mut items = Vec::new();

    for goal in goals {
        let item = |timestamp, kind| ActivityItem {
            goal_id: goal.id,
            goal_title: goal.title.clone(),
            timestamp,
            kind,
        };

        items.push(item(goal.created_at, ActivityKind::GoalCreated));

        for comment in &goal.comments {
            items.push(item(
                comment.created_at,
                ActivityKind::CommentAdded {
                    author: comment.user.name.clone(),
                    content: comment.content.clone(),
                },
            ));
        }

        for milestone in goal.milestones.iter().filter(|m| m.completed) {
            items.push(item(
                milestone.due_date,
                ActivityKind::MilestoneCompleted {
                    milestone: milestone.title.clone(),
                },
            ));
        }

        if goal.progress > 0.0 && goal.progress < goal.target {
            items.push(item(
                goal.created_at,
                ActivityKind::ProgressUpdated {
                    progress: goal.progress,
                },
            ));
        }
    }

    // Stable sort keeps per-goal order for equal timestamps.
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(limit);
    items
}
