use std::sync::Arc;

use anyhow::Context;
use axum::middleware::from_fn;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use notebook_api::config;
use notebook_api::handlers::{health, notes, root};
use notebook_api::middleware::auth_middleware;
use notebook_api::service::NoteService;
use notebook_api::state::AppState;
use notebook_api::store::postgres::PgNoteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Notebook API in {:?} mode", config.environment);

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

    // Store lifecycle is explicit: opened here, closed on shutdown
    let store = PgNoteStore::connect(&database_url, &config.database)
        .await
        .context("failed to connect to notes database")?;
    store.ensure_schema().await.context("failed to prepare notes schema")?;

    let state = AppState {
        notes: NoteService::new(Arc::new(store.clone())),
        store: store.clone(),
    };

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Notebook API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.pool().close().await;
    tracing::info!("Notebook API shut down");

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root::root))
        .route("/health", get(health::health))
        // Protected notes API
        .merge(note_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn note_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};

    Router::new()
        .route("/api/notes/fetchallnotes", get(notes::fetch_all_notes))
        .route("/api/notes/addnote", post(notes::add_note))
        .route("/api/notes/updatenote/:id", put(notes::update_note))
        .route("/api/notes/deletenote/:id", delete(notes::delete_note))
        // Every notes route requires a valid bearer token
        .route_layer(from_fn(auth_middleware))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
