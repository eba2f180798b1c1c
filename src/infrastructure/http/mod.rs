pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{convert::ConvertController, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::ObjectStore;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    convert_controller: Arc<ConvertController>,
    object_store: Arc<dyn ObjectStore>,
) -> Router {
    let convert_routes = Router::new()
        .route("/api/convert", post(ConvertController::convert))
        .with_state(convert_controller);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(object_store);

    Router::new()
        .merge(health_routes)
        .merge(convert_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and serve until the process is stopped
pub async fn start_http_server(config: Arc<Config>, app: Router) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
