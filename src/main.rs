//! authgate - Minimal Authentication Gateway
//! Mission: Register, log in, log out, and guard the profile route

use anyhow::{Context, Result};
use authgate::{
    api::{create_router, AppState},
    auth::{JwtHandler, PasswordHasher, RevocationRegistry, SessionService, UserStore},
    config::GatewayConfig,
    feed::PublicFeedClient,
};
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env fallbacks
    let _ = dotenv();
    init_tracing();

    let config = GatewayConfig::parse();

    info!("🚀 authgate starting");

    let (secret, is_dev_secret) = config.secret();
    if is_dev_secret {
        warn!("⚠️  SECRET_KEY not set, using development secret. CHANGE IN PRODUCTION!");
    }

    let hasher = PasswordHasher::new(config.bcrypt_cost).context("Invalid BCRYPT_COST")?;
    let jwt_handler = Arc::new(
        JwtHandler::with_ttl(secret, config.token_ttl_secs).context("Invalid SECRET_KEY")?,
    );
    match config.token_ttl_secs {
        Some(ttl) => info!("🔐 Tokens expire after {}s", ttl),
        None => info!("🔐 Tokens never expire (revoked only on logout)"),
    }

    let sessions = Arc::new(SessionService::new(
        Arc::new(UserStore::new()),
        hasher,
        jwt_handler,
        Arc::new(RevocationRegistry::new()),
    ));

    let feed = Arc::new(
        PublicFeedClient::new(config.feed_url.clone(), config.feed_timeout())
            .context("Failed to build HTTP client")?,
    );
    info!("📡 Public feed proxy -> {}", feed.url());

    let app = create_router(AppState::new(sessions, feed));

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🎯 Server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 authgate stopped");
    Ok(())
}

/// Initialize tracing with env-filter override
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
