//! Input checks the store deliberately leaves to its callers.
//!
//! The store accepts any input. Front ends run these checks first and show
//! the collected messages instead of calling the store when any fail.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{CreateGoalInput, CreateMilestoneInput, UpdateGoalInput};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Due date cannot be in the past")]
    DueDateInPast,

    #[error("Target must be greater than 0")]
    TargetNotPositive,

    #[error("Progress cannot be negative")]
    NegativeProgress,

    #[error("Comment cannot be empty")]
    EmptyComment,
}

impl ValidationError {
    /// The input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired => "title",
            Self::DueDateInPast => "due_date",
            Self::TargetNotPositive => "target",
            Self::NegativeProgress => "progress",
            Self::EmptyComment => "content",
        }
    }
}

/// Check a new goal against `now`. Returns every failure, not just the first.
pub fn validate_goal(input: &CreateGoalInput, now: DateTime<Utc>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.title.trim().is_empty() {
        errors.push(ValidationError::TitleRequired);
    }
    if input.due_date < now {
        errors.push(ValidationError::DueDateInPast);
    }
    if input.target <= 0.0 || input.target.is_nan() {
        errors.push(ValidationError::TargetNotPositive);
    }

    errors
}

/// Check the fields an edit touches. Omitted fields are not checked.
pub fn validate_goal_update(input: &UpdateGoalInput, now: DateTime<Utc>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        errors.push(ValidationError::TitleRequired);
    }
    if input.due_date.is_some_and(|due| due < now) {
        errors.push(ValidationError::DueDateInPast);
    }
    if input.target.is_some_and(|t| t <= 0.0 || t.is_nan()) {
        errors.push(ValidationError::TargetNotPositive);
    }

    errors
}

pub fn validate_milestone(input: &CreateMilestoneInput) -> Vec<ValidationError> {
    if input.title.trim().is_empty() {
        vec![ValidationError::TitleRequired]
    } else {
        Vec::new()
    }
}

/// Over-achievement is allowed, so only the lower bound is checked.
pub fn validate_progress(progress: f64) -> Result<(), ValidationError> {
    if progress < 0.0 || progress.is_nan() {
        return Err(ValidationError::NegativeProgress);
    }
    Ok(())
}

pub fn validate_comment(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(())
}
