mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rolezinhos_core::config::RolezinhosConfig;
use rolezinhos_core::{RecordId, Session};
use tracing_subscriber::EnvFilter;

use crate::commands::RoleFields;

#[derive(Parser)]
#[command(name = "rolezinhos")]
#[command(about = "Browse and edit the Mapa dos Rolezinhos event listing")]
struct Cli {
    /// Act as this signed-in user (email), overriding the configured one
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered by category or search term
    List {
        /// Only events in this category (by id)
        #[arg(short, long)]
        category: Option<RecordId>,

        /// Case-insensitive match on name and description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a single event
    Show { id: RecordId },
    /// Featured events, in listing order
    Featured {
        /// How many to show (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List categories with event counts
    Categories,
    /// List favorited events
    Favorites,
    /// Add or remove an event from favorites
    Fav { id: RecordId },
    /// Create a new event (requires a signed-in user)
    New {
        #[command(flatten)]
        fields: RoleFields,
    },
    /// Edit an event you own
    Edit {
        id: RecordId,

        #[command(flatten)]
        fields: RoleFields,
    },
    /// Delete an event you own
    Delete {
        id: RecordId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Copy the baseline into local storage if it is empty
    Seed,
    /// Show configuration paths and session
    Config,
    /// Remember an email as the signed-in user
    Login { email: String },
    /// Forget the signed-in user
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ROLEZINHOS_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RolezinhosConfig::load()?;
    let session = match cli.user {
        Some(user) => Session::signed_in(user),
        None => config.session(),
    };

    match cli.command {
        Commands::List { category, search } => commands::list::run(&config, category, search).await,
        Commands::Show { id } => commands::show::run(&config, &session, id).await,
        Commands::Featured { limit } => commands::featured::run(&config, limit).await,
        Commands::Categories => commands::categories::run(&config).await,
        Commands::Favorites => commands::favorites::list(&config).await,
        Commands::Fav { id } => commands::favorites::toggle(&config, id).await,
        Commands::New { fields } => commands::new::run(&config, &session, fields).await,
        Commands::Edit { id, fields } => commands::edit::run(&config, &session, id, fields).await,
        Commands::Delete { id, force } => {
            commands::delete::run(&config, &session, id, force).await
        }
        Commands::Seed => commands::seed::run(&config).await,
        Commands::Config => commands::config::run(&config, &session),
        Commands::Login { email } => commands::config::login(config, email),
        Commands::Logout => commands::config::logout(config),
    }
}
