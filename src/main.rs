use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostel_rooms::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "hostel-rooms",
    version,
    about = "Hostel room registry with best-fit room allocation",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults to environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// SQLite database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Disable cross-origin requests
        #[arg(long, default_value = "false")]
        no_cors: bool,
    },

    /// Add a room
    Add {
        /// Room number
        #[arg(short, long)]
        room_no: String,

        /// Number of students the room holds
        #[arg(short, long)]
        capacity: u32,

        /// Room has air conditioning
        #[arg(long, default_value = "false")]
        ac: bool,

        /// Room has an attached washroom
        #[arg(long, default_value = "false")]
        washroom: bool,
    },

    /// List all rooms
    List,

    /// Search rooms by capacity and amenities
    Search {
        /// Minimum capacity
        #[arg(short, long)]
        capacity: u32,

        #[arg(long, default_value = "false")]
        ac: bool,

        #[arg(long, default_value = "false")]
        washroom: bool,
    },

    /// Find the smallest room for a group of students
    Allocate {
        /// Group size
        #[arg(short, long)]
        students: u32,

        #[arg(long, default_value = "false")]
        ac: bool,

        #[arg(long, default_value = "false")]
        washroom: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(db) = cli.db {
        config.database.sqlite_path = db;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.validate().context("Invalid configuration")?;

    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose);

    match cli.command {
        Commands::Serve { bind, no_cors } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            if no_cors {
                config.server.enable_cors = false;
            }
            tracing::info!(
                bind = %config.server.bind_address,
                db = %config.database.sqlite_path.display(),
                "Starting serve command"
            );
            commands::serve(config).await?;
        }

        Commands::Add {
            room_no,
            capacity,
            ac,
            washroom,
        } => {
            commands::add(&config, room_no, capacity, ac, washroom).await?;
        }

        Commands::List => commands::list(&config).await?,

        Commands::Search {
            capacity,
            ac,
            washroom,
        } => {
            commands::search(&config, capacity, ac, washroom).await?;
        }

        Commands::Allocate {
            students,
            ac,
            washroom,
        } => {
            commands::allocate(&config, students, ac, washroom).await?;
        }
    }

    Ok(())
}

fn setup_tracing(level: &str, format: &str, verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("hostel_rooms=debug,tower_http=debug,info")
        } else {
            tracing_subscriber::EnvFilter::new(format!("hostel_rooms={level},tower_http={level},warn"))
        }
    });

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
