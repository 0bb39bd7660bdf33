use anyhow::{Context, Result};

use hostel_rooms::api::RoomServer;
use hostel_rooms::config::Config;

/// Start the room API server
pub async fn serve(config: Config) -> Result<()> {
    println!("Starting Room API Server");
    println!("========================");
    println!("  Database: {}", config.database.sqlite_path.display());
    println!();

    let server = RoomServer::from_config(&config).context("Failed to create room server")?;

    println!("{}", server.info().display());
    println!();
    println!("API Endpoints:");
    println!("  POST /api/rooms           - Add a room");
    println!("  GET  /api/rooms           - List all rooms");
    println!("  GET  /api/rooms/search    - Search rooms (capacity, hasAC, hasAttachedWashroom)");
    println!("  GET  /api/rooms/allocate  - Allocate a room (students, needsAC, needsWashroom)");
    println!("  GET  /api/health          - Health check");
    println!();
    println!("Press Ctrl+C to stop.\n");

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Room API server stopped.");
    Ok(())
}
