use std::sync::Arc;
use tracing::{error, info};
use webhook_registry::application::context::AppContext;
use webhook_registry::config::{self, Backend, Settings};
use webhook_registry::infrastructure::db::postgres::PostgresDatabase;
use webhook_registry::infrastructure::db::repositories::Repositories;
use webhook_registry::interface::http;
use webhook_registry::interface::http::state::AppState;
use webhook_registry::observability;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "webhook_registry_failed");
        eprintln!("webhook-registry: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Step 1: Load configuration.
    let settings = config::load()?;

    // Step 2: Install logging and the metrics recorder.
    observability::init_tracing(&settings.observability)?;
    let metrics = observability::init_metrics(&settings.observability)?;

    // Step 3: Build repositories for the configured backend.
    let repos = build_repositories(&settings).await?;

    // Step 4: Assemble shared application context and HTTP state.
    let ctx = Arc::new(AppContext::new(repos, settings.subscriptions.clone()));
    let state = AppState::new(ctx, metrics);

    // Step 5: Build the HTTP app.
    let app = http::app(state);
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Step 6: Bind and serve until ctrl-c.
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, backend = ?settings.db.backend, "http_listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("http_stopped");
    Ok(())
}

async fn build_repositories(settings: &Settings) -> Result<Repositories, Box<dyn std::error::Error>> {
    match settings.db.backend {
        Backend::Memory => Ok(Repositories::in_memory()),
        Backend::Postgres => {
            let db = PostgresDatabase::connect(&settings.db.url, settings.db.max_connections).await?;
            db.migrate().await?;
            Ok(Repositories::postgres(Arc::new(db)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "shutdown_signal_failed");
    }
}
