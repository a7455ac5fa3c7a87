//! Plain-text rendering of goals, summaries and the activity feed.

use crate::dashboard::{ActivityItem, ActivityKind, Summary};
use crate::models::{FilterValue, Goal, GoalFilter, Milestone};

const DONE: char = '●';
const OPEN: char = '○';

/// Characters of a comment shown in the activity feed before truncation.
const ACTIVITY_EXCERPT: usize = 60;

fn status_symbol(completed: bool) -> char {
    if completed {
        DONE
    } else {
        OPEN
    }
}

/// First block of a UUID, used as a display handle.
pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// One line per goal.
///
/// Example output:
/// ```text
/// 3f2a9c1e ○ Read 12 books this year  [learning/medium]  4 / 12 books (33%)
/// ```
pub fn render_goal_list(goals: &[&Goal]) -> String {
    if goals.is_empty() {
        return "No goals match the current filters.\n".to_string();
    }

    let mut output = String::new();
    for goal in goals {
        output.push_str(&format!(
            "{} {} {}  [{}/{}]  {} / {} {} ({:.0}%)\n",
            short_id(&goal.id),
            status_symbol(goal.is_completed),
            goal.title,
            goal.category.as_str(),
            goal.priority.as_str(),
            format_number(goal.progress),
            format_number(goal.target),
            goal.unit,
            goal.progress_percentage(),
        ));
    }
    output
}

/// Full goal view with milestones drawn as a tree.
///
/// Example output:
/// ```text
/// Read 12 books this year (learning, medium priority)
/// Progress: 4 / 12 books (33%)
/// Due: 2026-12-31
/// Milestones (1/2)
/// ├── ● 1a2b3c4d Research phase (due 2026-11-01)
/// └── ○ 5e6f7a8b Final review (due 2026-12-01)
/// Comments
///   Alex Morgan, 2026-10-17 09:30: Great progress on this goal!
/// ```
pub fn render_goal_detail(goal: &Goal) -> String {
    let mut output = format!(
        "{} ({}, {} priority){}\n",
        goal.title,
        goal.category.as_str(),
        goal.priority.as_str(),
        if goal.is_completed { " [completed]" } else { "" },
    );

    if !goal.description.is_empty() {
        output.push_str(&goal.description);
        output.push('\n');
    }

    output.push_str(&format!(
        "Progress: {} / {} {} ({:.0}%)\n",
        format_number(goal.progress),
        format_number(goal.target),
        goal.unit,
        goal.progress_percentage(),
    ));
    output.push_str(&format!("Due: {}\n", goal.due_date.format("%Y-%m-%d")));
    output.push_str(if goal.is_team_goal {
        "Team goal\n"
    } else {
        "Personal goal\n"
    });

    output.push_str(&format!(
        "Milestones ({}/{})\n",
        goal.completed_milestones(),
        goal.milestones.len()
    ));
    if goal.milestones.is_empty() {
        output.push_str("  (none)\n");
    }
    for (i, milestone) in goal.milestones.iter().enumerate() {
        render_milestone(&mut output, milestone, i == goal.milestones.len() - 1);
    }

    output.push_str("Comments\n");
    if goal.comments.is_empty() {
        output.push_str("  (none)\n");
    }
    for comment in &goal.comments {
        output.push_str(&format!(
            "  {}, {}: {}\n",
            comment.user.name,
            comment.created_at.format("%Y-%m-%d %H:%M"),
            comment.content,
        ));
    }

    output
}

fn render_milestone(output: &mut String, milestone: &Milestone, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(branch);
    output.push(status_symbol(milestone.completed));
    output.push(' ');
    output.push_str(&short_id(&milestone.id));
    output.push(' ');
    output.push_str(&milestone.title);
    output.push_str(&format!(" (due {})\n", milestone.due_date.format("%Y-%m-%d")));
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Total: {}  Completed: {}  In progress: {}  Completion rate: {}%\n",
        summary.total, summary.completed, summary.in_progress, summary.completion_rate
    )
}

pub fn render_filters(filters: &GoalFilter) -> String {
    fn show<T>(value: &FilterValue<T>, name: impl Fn(&T) -> String) -> String {
        match value {
            FilterValue::All => "all".to_string(),
            FilterValue::Only(v) => name(v),
        }
    }

    format!(
        "category={} completed={} priority={}\n",
        show(&filters.category, |c| c.as_str().to_string()),
        show(&filters.completed, |c| c.to_string()),
        show(&filters.priority, |p| p.as_str().to_string()),
    )
}

pub fn render_activity(items: &[ActivityItem]) -> String {
    if items.is_empty() {
        return "No recent activity.\n".to_string();
    }

    let mut output = String::new();
    for item in items {
        let line = match &item.kind {
            ActivityKind::GoalCreated => format!("Goal created: \"{}\"", item.goal_title),
            ActivityKind::CommentAdded { author, content } => format!(
                "{} commented on \"{}\": \"{}\"",
                author,
                item.goal_title,
                excerpt(content, ACTIVITY_EXCERPT)
            ),
            ActivityKind::MilestoneCompleted { milestone } => format!(
                "Milestone \"{}\" completed on \"{}\"",
                milestone, item.goal_title
            ),
            ActivityKind::ProgressUpdated { progress } => format!(
                "Progress on \"{}\" updated to {}%",
                item.goal_title,
                format_number(*progress)
            ),
        };
        output.push_str(&format!(
            "{}  {}\n",
            item.timestamp.format("%Y-%m-%d"),
            line
        ));
    }
    output
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
