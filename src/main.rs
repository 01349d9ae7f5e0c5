mod model;
mod server;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, scheduler::purchase_expiry,
    service::admin::code::AdminCodeService, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let paypal = startup::setup_paypal_client(&config, http_client.clone());

    let admin_code_service = AdminCodeService::new();

    // Check for admin users and log a login link if none exist
    startup::check_for_admin(&db, &config, &admin_code_service).await?;

    let _scheduler =
        purchase_expiry::start_scheduler(db.clone(), config.purchase_pending_ttl_minutes).await?;

    let app = server::router::router(&config.app_url)?
        .with_state(AppState::new(
            db,
            http_client,
            oauth_client,
            config.oauth_userinfo_url.clone(),
            admin_code_service,
            paypal,
            config.app_url.clone(),
        ))
        .layer(session);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", config.bind_address, e)))?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
}
