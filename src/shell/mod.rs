//! Interactive front end for the goal store.
//!
//! The shell is the store's only caller in the binary: it validates input,
//! invokes store operations and renders the resulting state. The store itself
//! never calls back, so every command reads the state it needs after mutating.

pub mod command;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use thiserror::Error;
use uuid::Uuid;

use crate::dashboard::{recent_activity, Summary};
use crate::models::*;
use crate::render;
use crate::store::{GoalStore, Resolved};
use crate::validation::{self, ValidationError};

use command::{tokenize, ShellCommand, ShellLine};

const PROMPT: &str = "goalboard> ";

/// Errors reported to the user. None of them end the session.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    Parse(String),

    #[error("No goal matches '{0}'")]
    GoalNotFound(String),

    #[error("'{0}' matches more than one goal, use a longer prefix")]
    AmbiguousGoal(String),

    #[error("No milestone matches '{0}'")]
    MilestoneNotFound(String),

    #[error("'{0}' matches more than one milestone, use a longer prefix")]
    AmbiguousMilestone(String),

    #[error("No goal is selected")]
    NoSelection,

    #[error("Nothing to update")]
    EmptyUpdate,

    #[error("{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field(), e))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValidationError> for ShellError {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(vec![e])
    }
}

/// What the caller should do after a line has been executed.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Shell {
    store: GoalStore,
    activity_limit: usize,
}

impl Shell {
    pub fn new(store: GoalStore, activity_limit: usize) -> Self {
        Self {
            store,
            activity_limit,
        }
    }

    pub fn store(&self) -> &GoalStore {
        &self.store
    }

    /// Read commands from `input` until EOF or `quit`, writing results to
    /// `output`. Command errors are written and the loop continues.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        interactive: bool,
    ) -> Result<()> {
        if interactive {
            write!(output, "{}", PROMPT).context("Failed to write prompt")?;
            output.flush().context("Failed to flush output")?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read command")?;

            match self.execute(&line) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue(text)) => {
                    write!(output, "{}", text).context("Failed to write output")?
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Command failed");
                    writeln!(output, "error: {}", e).context("Failed to write output")?
                }
            }

            if interactive {
                write!(output, "{}", PROMPT).context("Failed to write prompt")?;
            }
            output.flush().context("Failed to flush output")?;
        }

        Ok(())
    }

    /// Execute one command line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let words = tokenize(line).map_err(ShellError::Parse)?;
        if words.is_empty() {
            return Ok(Outcome::Continue(String::new()));
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                return Ok(Outcome::Continue(e.render().to_string()));
            }
            Err(e) => {
                let message = e.render().to_string();
                return Err(ShellError::Parse(message.trim_end().to_string()));
            }
        };

        tracing::debug!(command = ?parsed.command, "Executing command");
        self.dispatch(parsed.command)
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<Outcome, ShellError> {
        let text = match command {
            ShellCommand::List => self.list(),
            ShellCommand::All => {
                let goals: Vec<&Goal> = self.store.goals().iter().collect();
                render::render_goal_list(&goals)
            }
            ShellCommand::Show { goal } => {
                let id = self.resolve_goal(&goal)?;
                self.detail(id)
            }
            ShellCommand::Select { goal } => self.select(&goal)?,
            ShellCommand::Add {
                title,
                description,
                category,
                priority,
                target,
                unit,
                due,
                team,
            } => {
                let input = CreateGoalInput {
                    title,
                    description,
                    category,
                    priority,
                    target,
                    unit,
                    due_date: due,
                    user_id: self.store.current_user().id.clone(),
                    is_team_goal: team.is_some(),
                    team_id: team,
                };

                let errors = validation::validate_goal(&input, Utc::now());
                if !errors.is_empty() {
                    return Err(ShellError::Invalid(errors));
                }

                let goal = self.store.add(input);
                format!("Added goal {}: {}\n", render::short_id(&goal.id), goal.title)
            }
            ShellCommand::Edit {
                goal,
                title,
                description,
                category,
                priority,
                target,
                unit,
                due,
                team,
                personal,
            } => {
                let id = self.resolve_goal(&goal)?;

                let (team_id, is_team_goal) = match (team, personal) {
                    (Some(team), _) => (Some(Some(team)), Some(true)),
                    (None, true) => (Some(None), Some(false)),
                    (None, false) => (None, None),
                };

                let input = UpdateGoalInput {
                    title,
                    description,
                    category,
                    priority,
                    progress: None,
                    target,
                    unit,
                    due_date: due,
                    team_id,
                    is_team_goal,
                };
                if input.is_empty() {
                    return Err(ShellError::EmptyUpdate);
                }

                let errors = validation::validate_goal_update(&input, Utc::now());
                if !errors.is_empty() {
                    return Err(ShellError::Invalid(errors));
                }

                self.store.update(id, input);
                self.detail(id)
            }
            ShellCommand::Delete { goal } => {
                let id = self.resolve_goal(&goal)?;
                self.store.delete(id);
                format!("Deleted goal {}\n", render::short_id(&id))
            }
            ShellCommand::Progress { goal, value } => {
                let id = self.resolve_goal(&goal)?;
                validation::validate_progress(value)?;
                self.store.update_progress(id, value);
                self.detail(id)
            }
            ShellCommand::Comment { goal, text } => {
                let id = self.resolve_goal(&goal)?;
                let content = text.join(" ");
                validation::validate_comment(&content)?;
                self.store.add_comment(id, content);
                self.detail(id)
            }
            ShellCommand::Milestone {
                goal,
                title,
                description,
                due,
            } => {
                let id = self.resolve_goal(&goal)?;
                let input = CreateMilestoneInput {
                    title,
                    description,
                    due_date: due,
                    completed: false,
                };

                let errors = validation::validate_milestone(&input);
                if !errors.is_empty() {
                    return Err(ShellError::Invalid(errors));
                }

                self.store.add_milestone(id, input);
                self.detail(id)
            }
            ShellCommand::Toggle { goal, milestone } => {
                let goal_id = self.resolve_goal(&goal)?;
                let milestone_id = self.resolve_milestone(goal_id, &milestone)?;
                self.store.toggle_milestone(goal_id, milestone_id);
                self.detail(goal_id)
            }
            ShellCommand::Filter {
                category,
                completed,
                priority,
                reset,
            } => {
                let update = if reset {
                    FilterUpdate::reset()
                } else {
                    FilterUpdate {
                        category,
                        completed,
                        priority,
                    }
                };
                let filters = self.store.filter(update);
                format!("{}{}", render::render_filters(&filters), self.list())
            }
            ShellCommand::Summary => render::render_summary(&Summary::of(self.store.goals())),
            ShellCommand::Activity => render::render_activity(&recent_activity(
                self.store.goals(),
                self.activity_limit,
            )),
            ShellCommand::Help => {
                let mut help = ShellLine::command();
                help.render_long_help().to_string()
            }
            ShellCommand::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Continue(text))
    }

    fn list(&self) -> String {
        render::render_goal_list(&self.store.filtered_goals())
    }

    fn detail(&self, id: Uuid) -> String {
        // Only called with ids resolved in the same command; a missing goal
        // means it was just deleted.
        match self.store.get(id) {
            Some(goal) => render::render_goal_detail(goal),
            None => format!("Goal {} no longer exists\n", render::short_id(&id)),
        }
    }

    fn select(&mut self, goal: &str) -> Result<String, ShellError> {
        if goal.eq_ignore_ascii_case("none") {
            self.store.select(None);
            return Ok("Selection cleared\n".to_string());
        }

        let id = self.resolve_goal(goal)?;
        Ok(match self.store.select(Some(id)) {
            Some(goal) => render::render_goal_detail(goal),
            None => format!("Goal {} no longer exists\n", render::short_id(&id)),
        })
    }

    fn resolve_goal(&self, needle: &str) -> Result<Uuid, ShellError> {
        if needle == "." {
            return self
                .store
                .selected_goal()
                .map(|g| g.id)
                .ok_or(ShellError::NoSelection);
        }

        match self.store.resolve(needle) {
            Resolved::Found(goal) => Ok(goal.id),
            Resolved::Ambiguous => Err(ShellError::AmbiguousGoal(needle.to_string())),
            Resolved::NotFound => Err(ShellError::GoalNotFound(needle.to_string())),
        }
    }

    fn resolve_milestone(&self, goal_id: Uuid, needle: &str) -> Result<Uuid, ShellError> {
        let prefix = needle.trim().to_ascii_lowercase();
        let not_found = || ShellError::MilestoneNotFound(needle.to_string());
        if prefix.is_empty() {
            return Err(not_found());
        }

        let goal = self.store.get(goal_id).ok_or_else(not_found)?;
        let mut matches = goal
            .milestones
            .iter()
            .filter(|m| m.id.to_string().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(milestone), None) => Ok(milestone.id),
            (Some(_), Some(_)) => Err(ShellError::AmbiguousMilestone(needle.to_string())),
            _ => Err(not_found()),
        }
    }
}
