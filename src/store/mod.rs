pub mod fixtures;

use chrono::Utc;
use uuid::Uuid;

use crate::models::*;

/// In-memory goal collection with selection and filter state.
///
/// The store is the single owner of every goal. Mutations go through `&mut self`
/// methods, and each one leaves the filtered view and the selected-goal
/// snapshot consistent with the collection before it returns.
///
/// Unknown ids are not errors: operations on a goal or milestone that does not
/// exist are no-ops. The store also performs no input validation; see
/// [`crate::validation`] for the checks callers run first.
#[derive(Debug, Clone)]
pub struct GoalStore {
    goals: Vec<Goal>,
    /// Indices into `goals` matching `filters`, in collection order.
    filtered: Vec<usize>,
    selected: Option<Goal>,
    filters: GoalFilter,
    current_user: User,
}

impl GoalStore {
    pub fn new(current_user: User) -> Self {
        Self::with_goals(current_user, Vec::new())
    }

    /// Seed the store with an initial collection, e.g. from
    /// [`fixtures::FixtureGenerator`].
    pub fn with_goals(current_user: User, goals: Vec<Goal>) -> Self {
        let mut store = Self {
            goals,
            filtered: Vec::new(),
            selected: None,
            filters: GoalFilter::default(),
            current_user,
        };
        store.apply_filters();
        store
    }

    // ============================================================
    // Reads
    // ============================================================

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Goals matching the active filters, in collection order.
    pub fn filtered_goals(&self) -> Vec<&Goal> {
        self.filtered.iter().map(|&i| &self.goals[i]).collect()
    }

    pub fn selected_goal(&self) -> Option<&Goal> {
        self.selected.as_ref()
    }

    pub fn active_filters(&self) -> GoalFilter {
        self.filters
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn get(&self, goal_id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    /// Find a goal by full id or unambiguous id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> Resolved<'_> {
        let needle = id_or_prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Resolved::NotFound;
        }

        let mut matches = self
            .goals
            .iter()
            .filter(|g| g.id.to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(goal), None) => Resolved::Found(goal),
            (Some(_), Some(_)) => Resolved::Ambiguous,
            (None, _) => Resolved::NotFound,
        }
    }

    // ============================================================
    // Goal operations
    // ============================================================

    pub fn add(&mut self, input: CreateGoalInput) -> Goal {
        let goal = Goal {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            priority: input.priority,
            progress: 0.0,
            target: input.target,
            unit: input.unit,
            created_at: Utc::now(),
            due_date: input.due_date,
            user_id: input.user_id,
            team_id: input.team_id,
            is_team_goal: input.is_team_goal,
            milestones: Vec::new(),
            comments: Vec::new(),
            is_completed: false,
        };

        tracing::info!(goal_id = %goal.id, title = %goal.title, "Goal added");
        self.goals.push(goal.clone());
        self.apply_filters();
        goal
    }

    /// Shallow-merge `input` onto the goal. Returns whether a goal was updated.
    pub fn update(&mut self, goal_id: Uuid, input: UpdateGoalInput) -> bool {
        self.modify(goal_id, |goal| input.apply_to(goal))
    }

    /// Remove a goal. Returns whether a goal was removed.
    pub fn delete(&mut self, goal_id: Uuid) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != goal_id);
        let removed = self.goals.len() != before;

        if self.selected.as_ref().is_some_and(|g| g.id == goal_id) {
            self.selected = None;
        }

        if removed {
            tracing::info!(goal_id = %goal_id, "Goal deleted");
        } else {
            tracing::debug!(goal_id = %goal_id, "Delete ignored, goal not found");
        }

        self.apply_filters();
        removed
    }

    /// Set absolute progress and recompute completion. Values outside
    /// `[0, target]` are stored as given.
    pub fn update_progress(&mut self, goal_id: Uuid, progress: f64) -> bool {
        self.modify(goal_id, |goal| {
            goal.progress = progress;
            goal.refresh_completion();
            tracing::debug!(
                goal_id = %goal.id,
                progress,
                completed = goal.is_completed,
                "Progress updated"
            );
        })
    }

    // ============================================================
    // Comment operations
    // ============================================================

    /// Append a comment authored by the current user.
    ///
    /// Callers are expected to reject blank text before calling; the store
    /// accepts whatever it is given.
    pub fn add_comment(&mut self, goal_id: Uuid, content: impl Into<String>) -> Option<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            goal_id,
            user_id: self.current_user.id.clone(),
            user: self.current_user.clone(),
            content: content.into(),
            created_at: Utc::now(),
        };

        let added = self.modify(goal_id, |goal| goal.comments.push(comment.clone()));
        added.then_some(comment)
    }

    // ============================================================
    // Milestone operations
    // ============================================================

    pub fn add_milestone(
        &mut self,
        goal_id: Uuid,
        input: CreateMilestoneInput,
    ) -> Option<Milestone> {
        let milestone = Milestone {
            id: Uuid::new_v4(),
            goal_id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            due_date: input.due_date,
        };

        let added = self.modify(goal_id, |goal| goal.milestones.push(milestone.clone()));
        added.then_some(milestone)
    }

    /// Flip one milestone's completion flag. The goal's own completion is
    /// untouched. Returns the milestone's new state, or `None` if either id
    /// is unknown.
    pub fn toggle_milestone(&mut self, goal_id: Uuid, milestone_id: Uuid) -> Option<bool> {
        let mut toggled = None;
        self.modify(goal_id, |goal| {
            if let Some(milestone) = goal.milestones.iter_mut().find(|m| m.id == milestone_id) {
                milestone.completed = !milestone.completed;
                toggled = Some(milestone.completed);
            }
        });

        if toggled.is_none() {
            tracing::debug!(%goal_id, %milestone_id, "Toggle ignored, milestone not found");
        }
        toggled
    }

    // ============================================================
    // Filter and selection
    // ============================================================

    /// Merge `update` into the active filters and recompute the filtered view.
    pub fn filter(&mut self, update: FilterUpdate) -> GoalFilter {
        self.filters = self.filters.merge(update);
        self.apply_filters();
        tracing::debug!(
            filters = ?self.filters,
            matched = self.filtered.len(),
            "Filters applied"
        );
        self.filters
    }

    /// Select a goal by id, or clear the selection with `None`.
    ///
    /// The selection is a snapshot; the store refreshes it whenever the
    /// selected goal is mutated and clears it when the goal is deleted.
    pub fn select(&mut self, goal_id: Option<Uuid>) -> Option<&Goal> {
        self.selected = goal_id.and_then(|id| self.get(id).cloned());
        self.selected.as_ref()
    }

    // ============================================================
    // Internals
    // ============================================================

    /// Run `f` on the goal with `goal_id`, then refresh the selection snapshot
    /// and the filtered view. Returns false without calling `f` when the goal
    /// does not exist.
    fn modify(&mut self, goal_id: Uuid, f: impl FnOnce(&mut Goal)) -> bool {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) else {
            tracing::debug!(%goal_id, "Mutation ignored, goal not found");
            return false;
        };

        f(goal);

        if self.selected.as_ref().is_some_and(|s| s.id == goal_id) {
            self.selected = Some(goal.clone());
        }

        self.apply_filters();
        true
    }

    fn apply_filters(&mut self) {
        let filters = self.filters;
        self.filtered = self
            .goals
            .iter()
            .enumerate()
            .filter(|(_, goal)| filters.matches(goal))
            .map(|(i, _)| i)
            .collect();
    }
}

/// Result of looking a goal up by id prefix.
#[derive(Debug)]
pub enum Resolved<'a> {
    Found(&'a Goal),
    Ambiguous,
    NotFound,
}
