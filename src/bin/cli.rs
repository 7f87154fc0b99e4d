use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nba_stats_cache::{AppState, Config, RefreshSummary, Upstream};

/// Refresh the NBA stats cache without running the server
#[derive(Parser)]
#[command(name = "cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace one (or every) cached collection with fresh provider data
    Populate {
        #[arg(value_enum)]
        target: Target,
    },
    /// Print the raw payload of a provider endpoint
    TestApi {
        /// Relative endpoint path, query string included
        endpoint: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Teams,
    Players,
    Games,
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let state = AppState::from_config(&config).context("Failed to build application state")?;

    match cli.command {
        Command::Populate { target } => {
            let refresher = &state.refresher;
            if matches!(target, Target::Teams | Target::All) {
                let summary = refresher
                    .refresh_teams()
                    .await
                    .context("Failed to populate teams")?;
                print_summary(&summary);
            }
            if matches!(target, Target::Players | Target::All) {
                let summary = refresher
                    .refresh_players()
                    .await
                    .context("Failed to populate players")?;
                print_summary(&summary);
            }
            if matches!(target, Target::Games | Target::All) {
                let summary = refresher
                    .refresh_games()
                    .await
                    .context("Failed to populate games")?;
                print_summary(&summary);
            }
        }
        Command::TestApi { endpoint } => {
            let payload = state
                .upstream
                .fetch(&endpoint)
                .await
                .with_context(|| format!("Request to {} failed", endpoint))?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

fn print_summary(summary: &RefreshSummary) {
    if summary.replaced {
        println!("Populated {} {}", summary.count, summary.kind);
    } else {
        println!("No {} found, stored data left unchanged", summary.kind);
    }
    if let Some(divisions) = &summary.divisions {
        for (division, count) in divisions {
            println!("  - {}: {}", division, count);
        }
    }
    if !summary.failed_divisions.is_empty() {
        println!("  Failed divisions: {}", summary.failed_divisions.join(", "));
    }
    if let Some(endpoint) = &summary.endpoint {
        println!("  Source endpoint: {}", endpoint);
    }
}
