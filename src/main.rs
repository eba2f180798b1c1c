use std::sync::Arc;
use speech_convert::controllers::convert::ConvertController;
use speech_convert::infrastructure::bootstrap::build_components;
use speech_convert::infrastructure::config::Config;
use speech_convert::infrastructure::http::{build_router, start_http_server};
use speech_convert::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting speech-convert on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    let components = build_components(&config).await?;

    // Verify storage is reachable; readiness keeps reporting it afterwards
    if let Err(e) = components.object_store.check_connection().await {
        tracing::warn!(error = %e, bucket = %config.spaces_bucket, "Object storage not reachable at startup");
    } else {
        tracing::info!("Object storage connection verified");
    }

    tracing::info!("Instantiating controllers...");
    let convert_controller = Arc::new(ConvertController::new(components.conversion_service));

    let app = build_router(convert_controller, components.object_store);

    start_http_server(Arc::new(config), app).await?;

    Ok(())
}
