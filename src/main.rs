use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use goalboard::config::AppConfig;
use goalboard::dashboard::{recent_activity, Summary};
use goalboard::models::{FilterUpdate, FilterValue, GoalCategory, GoalPriority};
use goalboard::render;
use goalboard::shell::command::{
    parse_category_filter, parse_completed_filter, parse_priority_filter,
};
use goalboard::shell::Shell;
use goalboard::store::fixtures::{self, FixtureGenerator};
use goalboard::store::GoalStore;

#[derive(Parser)]
#[command(name = "goalboard")]
#[command(about = "Track goals, milestones and progress from the terminal")]
struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the generated fixture goals
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Print the summary, activity feed and filtered goal list once
    Dashboard {
        #[arg(long, value_parser = parse_category_filter)]
        category: Option<FilterValue<GoalCategory>>,
        #[arg(long, value_parser = parse_completed_filter)]
        completed: Option<FilterValue<bool>>,
        #[arg(long, value_parser = parse_priority_filter)]
        priority: Option<FilterValue<GoalPriority>>,
    },
    /// Print the seeded goal collection as JSON
    Export,
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "goalboard=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = AppConfig::load(cli.config.as_deref());
    if cli.seed.is_some() {
        config.fixture_seed = cli.seed;
    }

    let goals = FixtureGenerator::new(config.fixture_seed).generate_goals(config.fixture_goal_count);
    let mut store = GoalStore::with_goals(fixtures::current_user(), goals);
    tracing::info!(goals = store.goals().len(), "Store seeded");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut shell = Shell::new(store, config.activity_limit);
            shell.run(stdin.lock(), io::stdout().lock(), interactive)?;
        }
        Commands::Dashboard {
            category,
            completed,
            priority,
        } => {
            let filters = store.filter(FilterUpdate {
                category,
                completed,
                priority,
            });

            print!("{}", render::render_summary(&Summary::of(store.goals())));
            println!();
            print!(
                "{}",
                render::render_activity(&recent_activity(store.goals(), config.activity_limit))
            );
            println!();
            print!("{}", render::render_filters(&filters));
            print!("{}", render::render_goal_list(&store.filtered_goals()));
        }
        Commands::Export => {
            let json =
                serde_json::to_string_pretty(store.goals()).context("Failed to serialize goals")?;
            println!("{}", json);
        }
    }

    Ok(())
}
