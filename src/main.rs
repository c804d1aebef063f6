use aade_publicity::client::{ClientOptions, PublicityClient};
use aade_publicity::config::Config;
use aade_publicity::handlers::{self, AppState};
use aade_publicity::observer::TracingObserver;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the lookup service.
///
/// Initializes tracing, loads configuration, builds the AADE client and
/// serves the HTTP routes.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aade_publicity=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let client = PublicityClient::new(ClientOptions {
        endpoint: config.aade_endpoint.clone(),
        accept_gzip: config.accept_gzip,
        timeout: Some(config.request_timeout),
        observer: Arc::new(TracingObserver),
    })?;
    tracing::info!("✓ AADE client initialized: {}", client.endpoint());

    let app_state = Arc::new(AppState {
        config: config.clone(),
        client,
    });

    // Every lookup spends the shared AADE token: 2 requests/second per IP, burst of 5
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?,
    );

    let protected_routes = Router::new()
        .route("/api/v1/companies/:afm", get(handlers::get_company))
        .layer(ServiceBuilder::new().layer(GovernorLayer {
            config: governor_conf,
        }));

    // Health check bypasses rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // SmartIpKeyExtractor falls back to the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
