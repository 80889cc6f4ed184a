use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use common::database::{Database, DatabaseConfig};
use users::{AppState, config::ServiceConfig, create_router, repositories::UserRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users=info,common=info,tower_http=info".into()),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting user service");

    let config = ServiceConfig::from_env()?;

    // Initialize database and schema
    let db_config = DatabaseConfig::from_env()?;
    let database = Database::initialize(&db_config).await?;

    let user_repository = UserRepository::new(database.pool().clone());
    let app_state = AppState::new(user_repository, config.bearer_token.as_str());

    let app = create_router(app_state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("User service listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    info!("User service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
