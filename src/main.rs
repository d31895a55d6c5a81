//! Server binary: reads config from env, bootstraps the database, serves the sample pages.

use sample_crud::{
    app, check_connection, ensure_database_exists, ensure_schema, seed, telemetry, views,
    AppConfig, AppState, FlashStore, PgSampleRepository, SampleService,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(config.profile);
    tracing::info!(
        app = %config.app_name,
        profile = config.profile.as_str(),
        "starting"
    );
    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "fatal startup or server error");
        return Err(e);
    }
    Ok(())
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    views::init()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    check_connection(&pool, &config.redacted_database_url()).await?;

    ensure_schema(&pool).await?;
    if config.seed_data {
        seed(&pool).await?;
    }

    let state = AppState {
        service: SampleService::new(Arc::new(PgSampleRepository::new(pool))),
        flash: FlashStore::new(config.flash_ttl),
        app_name: config.app_name.as_str().into(),
        profile: config.profile,
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit)).await?;
    Ok(())
}
