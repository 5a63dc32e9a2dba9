mod chat;
mod commands;
mod config;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::edit::EditArgs;
use crate::commands::events::Listing;
use crate::commands::new::NewArgs;
use crate::config::AuraConfig;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Plan weather-aware events and ask Aura about the forecast")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming events (including today's)
    Events {
        /// Show past events instead, most recent first
        #[arg(long)]
        past: bool,

        /// Show every event, latest date first
        #[arg(long, conflicts_with = "past")]
        all: bool,
    },
    /// Show how many events are upcoming and past
    Count {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an event (prompts for anything missing)
    New {
        name: Option<String>,

        /// Event date (e.g. "2025-10-11", "tomorrow", "next fri")
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form location
        #[arg(short, long)]
        location: Option<String>,

        /// One of the predefined cities (see `aura locations`)
        #[arg(long, conflicts_with = "location")]
        city: Option<String>,

        /// Attach a weather snapshot
        #[arg(short, long)]
        weather: bool,
    },
    /// Edit an event (prompts for each field if no flags are given)
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long, conflicts_with = "location")]
        city: Option<String>,

        /// Replace the weather snapshot with a fresh one
        #[arg(short, long)]
        weather: bool,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show a single event
    Show { id: String },
    /// Delete all events
    Clear {
        #[arg(short, long)]
        yes: bool,
    },
    /// List or search predefined locations
    Locations {
        query: Option<String>,

        /// Find the location nearest to LAT,LNG
        #[arg(long, value_name = "LAT,LNG", conflicts_with = "query")]
        near: Option<String>,
    },
    /// Ask Aura a question about the weather and your events
    Ask {
        /// Forecast day to talk about (e.g. "wednesday"); defaults to today
        #[arg(long)]
        day: Option<String>,

        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },
    /// Get activity ideas for this week's forecast
    Ideas,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "aura=warn,aura_core=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locations { query, near } => commands::locations::run(query, near),
        Commands::Events { past, all } => {
            let (_, view) = load()?;
            let listing = match (past, all) {
                (true, _) => Listing::Past,
                (_, true) => Listing::All,
                _ => Listing::Upcoming,
            };
            commands::events::run(&view, listing)
        }
        Commands::Count { json } => commands::count::run(&load()?.1, json),
        Commands::New {
            name,
            date,
            location,
            city,
            weather,
        } => commands::new::run(
            &mut load()?.1,
            NewArgs {
                name,
                date,
                location,
                city,
                weather,
            },
        ),
        Commands::Edit {
            id,
            name,
            date,
            location,
            city,
            weather,
        } => commands::edit::run(
            &mut load()?.1,
            EditArgs {
                id,
                name,
                date,
                location,
                city,
                weather,
            },
        ),
        Commands::Delete { id, yes } => commands::delete::run(&mut load()?.1, &id, yes),
        Commands::Show { id } => commands::show::run(&load()?.1, &id),
        Commands::Clear { yes } => commands::clear::run(&mut load()?.1, yes),
        Commands::Ask { day, question } => {
            let (config, view) = load()?;
            commands::ask::run(&view, &config, &question.join(" "), day.as_deref()).await
        }
        Commands::Ideas => {
            let (config, view) = load()?;
            commands::ideas::run(&view, &config).await
        }
    }
}

/// Load the config and mount the events view over its data directory.
fn load() -> Result<(AuraConfig, commands::View)> {
    let config = AuraConfig::load()?;
    tracing::debug!(data_dir = %config.data_path().display(), "loaded config");
    let view = commands::open_view(&config);
    Ok((config, view))
}
