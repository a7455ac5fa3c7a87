use serde::{Deserialize, Serialize};

use super::{Goal, GoalCategory, GoalPriority};

/// One filter predicate: either disabled (`All`) or matching a single value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue<T> {
    All,
    Only(T),
}

// Manual impl: deriving would require `T: Default`.
impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> FilterValue<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T> From<Option<T>> for FilterValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Only(v),
            None => Self::All,
        }
    }
}

/// The active filter state: three predicates combined with AND.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GoalFilter {
    pub category: FilterValue<GoalCategory>,
    pub completed: FilterValue<bool>,
    pub priority: FilterValue<GoalPriority>,
}

impl GoalFilter {
    pub fn matches(&self, goal: &Goal) -> bool {
        self.category.matches(&goal.category)
            && self.completed.matches(&goal.is_completed)
            && self.priority.matches(&goal.priority)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category.is_all() && self.completed.is_all() && self.priority.is_all()
    }

    /// Produce the filter that results from applying `update` on top of `self`.
    pub fn merge(&self, update: FilterUpdate) -> GoalFilter {
        GoalFilter {
            category: update.category.unwrap_or(self.category),
            completed: update.completed.unwrap_or(self.completed),
            priority: update.priority.unwrap_or(self.priority),
        }
    }
}

/// A partial filter change. `None` keeps the current predicate,
/// `Some(FilterValue::All)` switches it off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub category: Option<FilterValue<GoalCategory>>,
    pub completed: Option<FilterValue<bool>>,
    pub priority: Option<FilterValue<GoalPriority>>,
}

impl FilterUpdate {
    /// An update that switches every predicate off.
    pub fn reset() -> Self {
        Self {
            category: Some(FilterValue::All),
            completed: Some(FilterValue::All),
            priority: Some(FilterValue::All),
        }
    }
}
