use tokio::net::TcpListener;

use signupboard::server::{
    config::Config, error::AppError, router, scheduler::maintenance, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;

    startup::bootstrap_owner(&db, &config).await?;

    let _scheduler = maintenance::start_scheduler(db.clone()).await?;

    let app = router::router(
        AppState::new(db, config.app_url.clone()),
        session,
        config.cors_origin.as_deref(),
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", config.bind_addr, e)))?;
    tracing::info!("Listening on {}", config.bind_addr);

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
