use reelstore_api::{setup, telemetry};
use reelstore_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry();

    let config = Config::from_env()?;
    let port = config.server_port;

    let pool = reelstore_db::connect(&config.database_url).await?;

    let state = setup::build_state(config, pool).await?;
    let router = setup::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port = port, "reelstore-api listening");

    axum::serve(listener, router).await?;

    Ok(())
}
