use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, Milestone};

/// A trackable objective with a numeric progress/target pair.
///
/// Goals are created through [`GoalStore::add`](crate::store::GoalStore::add)
/// and own their milestones and comments by value. Both sequences are kept in
/// insertion order, which is also display order.
///
/// # Completion
/// `is_completed` is stored rather than derived on read. The store recomputes
/// it whenever progress (or target) changes, so that it always equals
/// `progress >= target` after a store mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub priority: GoalPriority,
    pub progress: f64,
    pub target: f64,
    /// Unit label for progress and target, e.g. `%`, `books`, `km`.
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// Owning user.
    pub user_id: String,
    pub team_id: Option<String>,
    pub is_team_goal: bool,
    pub milestones: Vec<Milestone>,
    pub comments: Vec<Comment>,
    pub is_completed: bool,
}

impl Goal {
    /// Progress as a percentage of target. Not clamped, so over-achieved
    /// goals report more than 100.
    pub fn progress_percentage(&self) -> f64 {
        if self.target == 0.0 {
            return 0.0;
        }
        self.progress / self.target * 100.0
    }

    /// Re-establish `is_completed == (progress >= target)`.
    pub(crate) fn refresh_completion(&mut self) {
        self.is_completed = self.progress >= self.target;
    }

    pub fn milestone(&self, id: Uuid) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn completed_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }
}

/// The life area a goal belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Personal,
    Work,
    Health,
    Learning,
    Finance,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 5] = [
        Self::Personal,
        Self::Work,
        Self::Health,
        Self::Learning,
        Self::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Health => "health",
            Self::Learning => "learning",
            Self::Finance => "finance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(Self::Personal),
            "work" => Some(Self::Work),
            "health" => Some(Self::Health),
            "learning" => Some(Self::Learning),
            "finance" => Some(Self::Finance),
            _ => None,
        }
    }
}

/// How urgent a goal is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl GoalPriority {
    pub const ALL: [GoalPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Input for creating a new goal.
///
/// Everything the store assigns itself (id, creation time, progress,
/// completion, milestones, comments) is absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: GoalCategory,
    pub priority: GoalPriority,
    pub target: f64,
    pub unit: String,
    pub due_date: DateTime<Utc>,
    pub user_id: String,
    pub team_id: Option<String>,
    #[serde(default)]
    pub is_team_goal: bool,
}

/// Input for updating an existing goal. All fields are optional for partial updates.
///
/// `team_id` is doubly optional: `None` leaves it alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGoalInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GoalCategory>,
    pub priority: Option<GoalPriority>,
    pub progress: Option<f64>,
    pub target: Option<f64>,
    pub unit: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub team_id: Option<Option<String>>,
    pub is_team_goal: Option<bool>,
}

impl UpdateGoalInput {
    /// Shallow-merge the provided fields onto `goal`.
    pub(crate) fn apply_to(self, goal: &mut Goal) {
        let touches_completion = self.progress.is_some() || self.target.is_some();

        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = description;
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
        if let Some(progress) = self.progress {
            goal.progress = progress;
        }
        if let Some(target) = self.target {
            goal.target = target;
        }
        if let Some(unit) = self.unit {
            goal.unit = unit;
        }
        if let Some(due_date) = self.due_date {
            goal.due_date = due_date;
        }
        if let Some(team_id) = self.team_id {
            goal.team_id = team_id;
        }
        if let Some(is_team_goal) = self.is_team_goal {
            goal.is_team_goal = is_team_goal;
        }

        if touches_completion {
            goal.refresh_completion();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.progress.is_none()
            && self.target.is_none()
            && self.unit.is_none()
            && self.due_date.is_none()
            && self.team_id.is_none()
            && self.is_team_goal.is_none()
    }
}
