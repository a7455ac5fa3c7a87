//! Mock users, teams and goals used to seed the store at startup.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::models::*;

const GOAL_TITLES: [&str; 10] = [
    "Complete project documentation",
    "Learn a new programming language",
    "Increase website traffic by 20%",
    "Reduce monthly expenses",
    "Exercise 3 times per week",
    "Read 12 books this year",
    "Launch new product feature",
    "Improve team collaboration",
    "Master public speaking",
    "Save for vacation",
];

const MILESTONE_TITLES: [&str; 5] = [
    "Research phase",
    "Initial planning",
    "Halfway point",
    "Final review",
    "Implementation complete",
];

const COMMENT_TEXTS: [&str; 5] = [
    "Great progress on this goal!",
    "Keep up the good work.",
    "I think we should reconsider our approach here.",
    "Let me know if you need any help with this.",
    "I completed a similar goal last month. Happy to share insights.",
];

const GOAL_DESCRIPTION: &str =
    "This is a detailed description of the goal and what needs to be accomplished.";
const MILESTONE_DESCRIPTION: &str = "Complete this milestone to move forward";

pub fn mock_users() -> Vec<User> {
    [
        ("1", "Alex Morgan", "alex@example.com", "women/1"),
        ("2", "Jamie Chen", "jamie@example.com", "men/2"),
        ("3", "Taylor Swift", "taylor@example.com", "women/3"),
        ("4", "Morgan Freeman", "morgan@example.com", "men/4"),
    ]
    .into_iter()
    .map(|(id, name, email, portrait)| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: format!("https://randomuser.me/api/portraits/{}.jpg", portrait),
    })
    .collect()
}

pub fn mock_teams() -> Vec<Team> {
    let users = mock_users();
    vec![
        Team {
            id: "1".to_string(),
            name: "Marketing Team".to_string(),
            description: "Responsible for all marketing activities".to_string(),
            members: vec![users[0].clone(), users[1].clone()],
            avatar: "https://images.unsplash.com/photo-1522071820081-009f0129c71c".to_string(),
        },
        Team {
            id: "2".to_string(),
            name: "Development Team".to_string(),
            description: "Building and maintaining our products".to_string(),
            members: vec![users[1].clone(), users[2].clone(), users[3].clone()],
            avatar: "https://images.unsplash.com/photo-1600880292203-757bb62b4baf".to_string(),
        },
    ]
}

/// The acting user for comments and newly created goals.
pub fn current_user() -> User {
    mock_users().swap_remove(0)
}

/// Generates a plausible goal collection.
///
/// Seeded generators are deterministic apart from timestamps, which are
/// relative to the moment of generation.
pub struct FixtureGenerator {
    rng: StdRng,
    users: Vec<User>,
    teams: Vec<Team>,
}

impl FixtureGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            users: mock_users(),
            teams: mock_teams(),
        }
    }

    pub fn generate_goals(&mut self, count: usize) -> Vec<Goal> {
        let goals: Vec<Goal> = (0..count).map(|index| self.goal(index)).collect();
        tracing::debug!(count = goals.len(), "Generated fixture goals");
        goals
    }

    fn goal(&mut self, index: usize) -> Goal {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let is_team_goal = index % 3 == 0;
        let progress = f64::from(self.rng.gen_range(0u32..100));
        let target = 100.0;

        let milestone_count = self.rng.gen_range(2..=4);
        let comment_count = self.rng.gen_range(1..=4);

        Goal {
            id,
            title: GOAL_TITLES[index % GOAL_TITLES.len()].to_string(),
            description: GOAL_DESCRIPTION.to_string(),
            category: *self.pick(&GoalCategory::ALL),
            priority: *self.pick(&GoalPriority::ALL),
            progress,
            target,
            unit: "%".to_string(),
            created_at: now - self.random_span(30),
            due_date: now + self.random_span(60),
            user_id: self.users[index % self.users.len()].id.clone(),
            team_id: is_team_goal.then(|| self.teams[index % self.teams.len()].id.clone()),
            is_team_goal,
            milestones: (0..milestone_count)
                .map(|i| self.milestone(id, i))
                .collect(),
            comments: (0..comment_count).map(|i| self.comment(id, i)).collect(),
            is_completed: progress >= target,
        }
    }

    fn milestone(&mut self, goal_id: Uuid, index: usize) -> Milestone {
        Milestone {
            id: Uuid::new_v4(),
            goal_id,
            title: self.pick(&MILESTONE_TITLES).to_string(),
            description: MILESTONE_DESCRIPTION.to_string(),
            completed: self.rng.gen_bool(0.5),
            due_date: Utc::now() + Duration::weeks(index as i64 + 1),
        }
    }

    fn comment(&mut self, goal_id: Uuid, index: usize) -> Comment {
        let user = self.users[index % self.users.len()].clone();
        Comment {
            id: Uuid::new_v4(),
            goal_id,
            user_id: user.id.clone(),
            user,
            content: self.pick(&COMMENT_TEXTS).to_string(),
            created_at: Utc::now() - self.random_span(7),
        }
    }

    /// A random duration of up to `days` days, at second resolution.
    fn random_span(&mut self, days: i64) -> Duration {
        Duration::seconds(self.rng.gen_range(0..days * 24 * 60 * 60))
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        // Fixture tables are never empty.
        items.choose(&mut self.rng).unwrap_or(&items[0])
    }
}
