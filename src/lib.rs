pub mod config;
pub mod error;
pub mod schedule;
pub mod server;

use std::sync::Arc;

use config::Config;
use server::AppState;

/// Load the published schedule and serve the HTTP API until shutdown.
pub async fn run(config: Config) -> std::io::Result<()> {
    // Store is loaded synchronously (snapshot read with std::fs)
    let state = Arc::new(AppState::new(&config));
    server::start_server(state).await
}
