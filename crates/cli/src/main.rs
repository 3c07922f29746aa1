//! wikisearch command-line entry point.
//!
//! Results go to stdout; logging goes to stderr so it never interleaves with
//! rendered cards.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wikisearch_client::{SearchController, SearchState, WikiClient, WikiConfig};
use wikisearch_core::{AppConfig, HistoryStore, KeyValueStore, MemoryStore, SqliteStore, Theme, ThemeStore};

mod clipboard;
mod interactive;
mod view;

#[derive(Parser)]
#[command(name = "wikisearch")]
#[command(about = "Search Wikipedia from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Print search results as JSON instead of styled text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a term and remember it
    #[command(alias = "s")]
    Search {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true)]
        term: Vec<String>,
    },

    /// Show a random article
    #[command(alias = "r")]
    Random,

    /// Show or edit search history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or toggle the color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Live search prompt
    #[command(alias = "i")]
    Interactive,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List remembered terms, most recent first
    List,
    /// Forget a term
    Remove { term: String },
    /// Search a remembered term again by its position (1 is most recent)
    Run { position: usize },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = AppConfig::load()?;
    tracing::debug!(db_path = %config.db_path.display(), language = %config.language, "configuration loaded");

    let store = open_store(&config.db_path).await;
    let themes = ThemeStore::new(store.clone());

    if let Commands::Theme { action } = &cli.command {
        let theme = match action {
            Some(ThemeAction::Toggle) => themes.toggle().await,
            Some(ThemeAction::Show) | None => themes.current().await,
        };
        println!("{theme}");
        return Ok(());
    }

    let history = HistoryStore::load(store).await;
    let client = WikiClient::new(WikiConfig::from(&config))?;
    let controller = Arc::new(SearchController::new(client, history));
    let theme = themes.current().await;
    let json = cli.json;

    match cli.command {
        Commands::Search { term } => {
            let state = controller.submit(&term.join(" ")).await;
            show(&state, theme, json)?;
        }
        Commands::Random => {
            let state = controller.random().await;
            show(&state, theme, json)?;
        }
        Commands::History { action } => match action {
            Some(HistoryAction::List) | None => view::print_history(&controller.history().await, theme),
            Some(HistoryAction::Remove { term }) => {
                if !controller.remove_history(&term).await {
                    println!("'{term}' is not in history");
                }
                view::print_history(&controller.history().await, theme);
            }
            Some(HistoryAction::Run { position }) => {
                let entries = controller.history().await;
                let Some(term) = position.checked_sub(1).and_then(|i| entries.get(i)) else {
                    anyhow::bail!("no history entry at position {position}");
                };
                let state = controller.activate_history(term).await;
                show(&state, theme, json)?;
            }
        },
        Commands::Interactive => interactive::run(controller, themes, config.debounce()).await?,
        Commands::Theme { .. } => {}
    }

    Ok(())
}

/// Open the SQLite store, falling back to an in-memory one for this session.
async fn open_store(path: &Path) -> Arc<dyn KeyValueStore> {
    match SqliteStore::open(path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "storage unavailable, history and theme will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

fn show(state: &SearchState, theme: Theme, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        view::print_state(state, theme);
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
