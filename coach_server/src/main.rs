use coach_core::{logging, Config};
use coach_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_server();

    let config = Config::load()?;
    let app = create_router(AppState::from_config(&config));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("MicroCoach server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
