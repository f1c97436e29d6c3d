use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blankdash::{
    api,
    config::AppConfig,
    corpus::{self, QuoteDeck},
    housekeeping,
    state::{AppState, Game},
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blankdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting blankdash...");

    let config = AppConfig::from_env();

    let quotes = match corpus::load_quotes(&config.quotes_file) {
        Ok(quotes) => quotes,
        Err(e) => {
            tracing::error!(path = %config.quotes_file.display(), "Failed to load quotes: {}", e);
            std::process::exit(1);
        }
    };
    let deck = if config.shuffle_quotes {
        QuoteDeck::shuffled(quotes)
    } else {
        QuoteDeck::new(quotes)
    };

    let game = match Game::new(deck, config.player_estimator()) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("Failed to start game: {}", e);
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState::new(game));

    // Stale heartbeats only matter for the estimate window
    housekeeping::spawn_liveness_pruner(state.clone(), config.liveness_window);

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
