use landing_server::{Config, SiteLayout, build_router};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landing=debug,landing_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: host={}, port={}, site_dir={:?}",
        config.host, config.port, config.site_dir
    );

    // Missing files only affect their own routes, so keep serving
    let layout = SiteLayout::new(&config.site_dir);
    for problem in layout.check() {
        warn!("{} - requests for it will return 404", problem);
    }

    let app = build_router(&config);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Listening on port {}...", config.port);
    info!("URL: http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
