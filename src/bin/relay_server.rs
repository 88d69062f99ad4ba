use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translate_relay::TranslatorRuntime;
use translate_relay::providers::resolver::GatewayConfig;
use translate_relay::server::{AppState, create_router};

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translate_relay=info,tower_http=info".into()),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let gateway = GatewayConfig::from_env();
    if gateway.api_key.is_none() {
        info!("no gateway api key configured; gateway requests are sent uncredentialed");
    }

    let runtime = TranslatorRuntime::builder().with_gateway(gateway).build()?;
    let app = create_router(AppState {
        runtime: Arc::new(runtime),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
