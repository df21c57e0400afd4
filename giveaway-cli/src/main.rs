mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use giveaway_core::{
    AppConfig, AppState, FetchState, GamerPowerClient, GiveawayId, SnapshotFile, SortBy,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "giveaways", version, about = "Browse and bookmark game giveaways")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List active giveaways
    List {
        #[arg(long, default_value = "")]
        platform: String,
        #[arg(long = "type", default_value = "")]
        kind: String,
        #[arg(long, default_value = "date")]
        sort_by: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one giveaway with claim instructions
    Detail { id: GiveawayId },
    /// Total value of the active giveaways
    Worth {
        #[arg(long, default_value = "")]
        platform: String,
        #[arg(long = "type", default_value = "")]
        kind: String,
    },
    /// Bookmark a giveaway, or drop the bookmark if it is already saved
    Save { id: GiveawayId },
    /// Drop a bookmark
    Remove { id: GiveawayId },
    /// Show bookmarked giveaways
    Saved,
    /// Drop every bookmark
    ClearSaved,
    /// Switch between light and dark display
    Theme,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load();
    let client = Arc::new(GamerPowerClient::new(&config.client)?);
    let snapshot_file = SnapshotFile::in_dir(config.data_dir());
    let snapshot = snapshot_file.load().await;
    let mut state = AppState::restore(client, snapshot);

    let changed = run(cli.command, &mut state).await?;
    if changed {
        snapshot_file.persist(&state.snapshot()).await?;
        info!(path = %snapshot_file.path().display(), "state saved");
    }
    Ok(())
}

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Executes one command; returns whether persisted state changed.
async fn run(command: Command, state: &mut AppState) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::List {
            platform,
            kind,
            sort_by,
            search,
        } => {
            let sort_by: SortBy = sort_by.parse()?;
            state.filters.set_platform(platform);
            state.filters.set_kind(kind);
            state.filters.set_sort_by(sort_by);
            state.filters.set_search(search);
            state.refresh_list()?;
            state.giveaways.settle().await;
            match state.giveaways.list() {
                FetchState::Failed(err) => return Err(err.clone().into()),
                _ => render::rows(&state.view(), state.theme.is_dark()),
            }
            Ok(false)
        }
        Command::Detail { id } => {
            state.open_detail(id);
            state.giveaways.settle().await;
            match state.giveaways.detail() {
                FetchState::Ready(detail) => {
                    render::detail(detail, state.saved.contains(id));
                    Ok(false)
                }
                FetchState::Failed(err) => Err(err.clone().into()),
                FetchState::Idle | FetchState::Pending => Ok(false),
            }
        }
        Command::Worth { platform, kind } => {
            state.filters.set_platform(platform);
            state.filters.set_kind(kind);
            state.refresh_worth()?;
            state.giveaways.settle().await;
            match state.giveaways.worth() {
                FetchState::Ready(worth) => render::worth(worth),
                FetchState::Failed(err) => return Err(err.clone().into()),
                FetchState::Idle | FetchState::Pending => {}
            }
            Ok(false)
        }
        Command::Save { id } => {
            if !state.saved.contains(id) {
                state.open_detail(id);
                state.giveaways.settle().await;
                if let FetchState::Failed(err) = state.giveaways.detail() {
                    return Err(err.clone().into());
                }
            }
            match state.toggle_saved_by_id(id) {
                Some(true) => println!("saved {id}"),
                Some(false) => println!("removed {id}"),
                None => println!("giveaway {id} is not available"),
            }
            Ok(true)
        }
        Command::Remove { id } => {
            if state.saved.remove(id) {
                println!("removed {id}");
                Ok(true)
            } else {
                println!("{id} was not saved");
                Ok(false)
            }
        }
        Command::Saved => {
            render::saved(state.saved.entries());
            Ok(false)
        }
        Command::ClearSaved => {
            state.saved.clear();
            println!("cleared saved giveaways");
            Ok(true)
        }
        Command::Theme => {
            state.theme.toggle();
            println!("dark mode {}", if state.theme.is_dark() { "on" } else { "off" });
            Ok(true)
        }
    }
}
