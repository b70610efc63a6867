use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use roster_infrastructure::{ConfigService, StoreOptions, build_store, open_store};

mod commands;
mod logging;

use commands::{ListArgs, ProfileArgs};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster - browse and edit a local profile directory", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/roster/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the profile collection
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep profiles in memory only
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List profiles, optionally filtered
    List(ListArgs),
    /// Show one profile
    Show {
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a profile
    Create(ProfileArgs),
    /// Change fields of a profile
    Update {
        id: String,
        #[command(flatten)]
        fields: ProfileArgs,
    },
    /// Remove a profile
    Delete { id: String },
    /// Print map markers and the map center as JSON
    Markers {
        /// Profile to highlight and center on
        #[arg(long)]
        selected: Option<String>,
    },
    /// Discard all changes and restore the sample profiles
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service.load()?;
    logging::init(&config.logging);

    let mut options = StoreOptions::from_config(&config);
    if let Some(dir) = cli.data_dir {
        options = options.with_dir(dir);
    }
    if cli.memory {
        options = options.in_memory();
    }

    // Reset never reads the stored value, so it works on unreadable data
    if let Commands::Reset = cli.command {
        let mut store = build_store(&options)?;
        commands::reset::run(&mut store).await?;
        return commands::persisted(store.shutdown().await);
    }

    let mut store = open_store(&options).await.map_err(|e| {
        if e.is_persistence() {
            anyhow!("{} (run `roster reset` to discard the stored profiles)", e)
        } else {
            anyhow!(e)
        }
    })?;

    match cli.command {
        Commands::List(args) => commands::list::run(&store, &args)?,
        Commands::Show { id, json } => commands::show::run(&store, &id, json)?,
        Commands::Create(fields) => commands::edit::create(&mut store, fields, &config).await?,
        Commands::Update { id, fields } => {
            commands::edit::update(&mut store, &id, fields, &config).await?
        }
        Commands::Delete { id } => commands::delete::run(&mut store, &id).await?,
        Commands::Markers { selected } => commands::markers::run(&store, selected.as_deref())?,
        Commands::Reset => unreachable!("handled before loading"),
    }

    commands::persisted(store.shutdown().await)?;
    Ok(())
}
