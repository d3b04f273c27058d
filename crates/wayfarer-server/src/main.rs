use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use wayfarer_api::stripe::StripeGateway;
use wayfarer_api::{AppState, AppStateInner, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("WAYFARER_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let stripe_secret = std::env::var("STRIPE_SECRET_KEY").unwrap_or_default();
    if stripe_secret.is_empty() {
        tracing::warn!("STRIPE_SECRET_KEY is unset; payment-intent creation will fail");
    }
    let db_path = std::env::var("WAYFARER_DB_PATH").unwrap_or_else(|_| "wayfarer.db".into());
    let host = std::env::var("WAYFARER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("WAYFARER_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = wayfarer_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        payments: Arc::new(StripeGateway::new(stripe_secret)),
    });

    // CORS: explicit browser origin list from env, permissive when unset
    let cors = match std::env::var("WAYFARER_ALLOWED_ORIGINS") {
        Ok(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        Err(_) => CorsLayer::permissive(),
    };

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Wayfarer server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
