//! Shell command grammar.
//!
//! Each input line is split into words and parsed with clap, so the shell
//! gets the same help output and error messages as the top-level CLI.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::models::{FilterValue, GoalCategory, GoalPriority};

#[derive(Debug, Parser)]
#[command(
    name = "goalboard",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Goal arguments accept a full id, an unambiguous id prefix, or `.` for the
/// selected goal.
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// List goals matching the active filters
    #[command(alias = "ls")]
    List,
    /// List every goal, ignoring filters
    All,
    /// Show a goal with its milestones and comments
    Show { goal: String },
    /// Select a goal (or `none` to clear the selection)
    Select { goal: String },
    /// Create a goal
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_category, default_value = "personal")]
        category: GoalCategory,
        #[arg(long, value_parser = parse_priority, default_value = "medium")]
        priority: GoalPriority,
        #[arg(long, allow_negative_numbers = true)]
        target: f64,
        #[arg(long, default_value = "")]
        unit: String,
        /// Due date as YYYY-MM-DD or RFC 3339
        #[arg(long, value_parser = parse_due)]
        due: DateTime<Utc>,
        /// Make this a team goal owned by the given team id
        #[arg(long)]
        team: Option<String>,
    },
    /// Change fields of a goal
    Edit {
        goal: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_category)]
        category: Option<GoalCategory>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<GoalPriority>,
        #[arg(long, allow_negative_numbers = true)]
        target: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
        #[arg(long, conflicts_with = "personal")]
        team: Option<String>,
        /// Turn a team goal back into a personal goal
        #[arg(long)]
        personal: bool,
    },
    /// Delete a goal
    #[command(alias = "rm")]
    Delete { goal: String },
    /// Set absolute progress on a goal
    Progress {
        goal: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Comment on a goal as the current user
    Comment {
        goal: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Add a milestone to a goal
    Milestone {
        goal: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_due)]
        due: DateTime<Utc>,
    },
    /// Toggle a milestone's completion
    Toggle { goal: String, milestone: String },
    /// Change the active filters; omitted options keep their current value
    Filter {
        #[arg(long, value_parser = parse_category_filter)]
        category: Option<FilterValue<GoalCategory>>,
        #[arg(long, value_parser = parse_completed_filter)]
        completed: Option<FilterValue<bool>>,
        #[arg(long, value_parser = parse_priority_filter)]
        priority: Option<FilterValue<GoalPriority>>,
        /// Clear every filter
        #[arg(long, conflicts_with_all = ["category", "completed", "priority"])]
        reset: bool,
    },
    /// Completion counts across all goals
    Summary,
    /// Recent activity across all goals
    Activity,
    /// Show available commands
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

pub fn parse_category(s: &str) -> Result<GoalCategory, String> {
    GoalCategory::from_str(&s.to_ascii_lowercase()).ok_or_else(|| {
        format!(
            "unknown category '{}', expected one of: personal, work, health, learning, finance",
            s
        )
    })
}

pub fn parse_priority(s: &str) -> Result<GoalPriority, String> {
    GoalPriority::from_str(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown priority '{}', expected one of: low, medium, high", s))
}

fn parse_filter<T>(
    s: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<FilterValue<T>, String> {
    if s.eq_ignore_ascii_case("all") {
        Ok(FilterValue::All)
    } else {
        parse(s).map(FilterValue::Only)
    }
}

pub fn parse_category_filter(s: &str) -> Result<FilterValue<GoalCategory>, String> {
    parse_filter(s, parse_category)
}

pub fn parse_priority_filter(s: &str) -> Result<FilterValue<GoalPriority>, String> {
    parse_filter(s, parse_priority)
}

pub fn parse_completed_filter(s: &str) -> Result<FilterValue<bool>, String> {
    parse_filter(s, |s| match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "done" | "completed" => Ok(true),
        "false" | "no" | "open" | "in-progress" => Ok(false),
        _ => Err(format!("expected true, false or all, got '{}'", s)),
    })
}

/// Dates without a time are due at the end of that day (UTC).
pub fn parse_due(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("invalid date '{}'", s));
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Split a line into words. Single or double quotes group words; there are
/// no escapes.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
