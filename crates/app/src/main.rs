use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use memorial_page_core::{Action, Page, PageConfig, PageMarkup};
use tracing_subscriber::EnvFilter;

fn main() -> memorial_page_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            page,
            config,
            script,
        } => run_replay(&page, config.as_deref(), script.as_deref()),
        Commands::Bindings { page, config } => run_bindings(&page, config.as_deref()),
    }
}

fn load_page(markup: &Path, config: Option<&Path>) -> memorial_page_core::Result<Page> {
    let config = match config {
        Some(path) => PageConfig::from_path(path)?,
        None => PageConfig::default(),
    };
    let markup = PageMarkup::from_path(markup)?;
    Page::load(&markup, config)
}

fn run_replay(
    markup: &Path,
    config: Option<&Path>,
    script: Option<&Path>,
) -> memorial_page_core::Result<()> {
    tracing::info!(?markup, ?script, "replaying page interactions");

    let mut page = load_page(markup, config)?;
    let actions = match script {
        Some(path) => Action::load_script(path)?,
        None => Vec::new(),
    };
    for action in &actions {
        page.apply(action)?;
    }

    let snapshot = serde_json::to_string_pretty(&page.snapshot())?;
    println!("{snapshot}");
    Ok(())
}

fn run_bindings(markup: &Path, config: Option<&Path>) -> memorial_page_core::Result<()> {
    let page = load_page(markup, config)?;
    for binding in page.bindings() {
        println!("{binding}");
    }
    tracing::info!(count = page.bindings().len(), "listed bindings");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Replays visitor interactions against the memorial page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a page, replay a script of actions and print the resulting state.
    Replay {
        /// Page description (JSON).
        #[arg(short, long)]
        page: PathBuf,
        /// Optional configuration file overriding the page defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// JSON array of actions to replay in order.
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// List every event binding the page wires at start-up.
    Bindings {
        /// Page description (JSON).
        #[arg(short, long)]
        page: PathBuf,
        /// Optional configuration file overriding the page defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
