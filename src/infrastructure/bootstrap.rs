use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::{config::Credentials, Client as S3Client};
use std::sync::Arc;

use crate::{
    domain::conversion::{ConversionService, ConversionServiceApi, ConversionSettings},
    error::AppError,
    infrastructure::{
        config::Config,
        repositories::{AzureSpeechSettings, AzureTtsRepository, ObjectStore, SpacesObjectStore},
    },
};

/// Everything the entry points need once configuration is loaded
pub struct AppComponents {
    pub conversion_service: Arc<dyn ConversionServiceApi>,
    pub object_store: Arc<dyn ObjectStore>,
}

/// Create the S3 client pointed at the configured Spaces endpoint
pub async fn create_s3_client(config: &Config) -> S3Client {
    let credentials = Credentials::new(
        config.spaces_key.clone(),
        config.spaces_secret.clone(),
        None,
        None,
        "spaces",
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.spaces_region.clone()))
        .endpoint_url(config.spaces_endpoint_url())
        .credentials_provider(credentials)
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(config.storage_timeout())
                .build(),
        )
        .load()
        .await;

    tracing::info!(
        region = ?sdk_config.region(),
        endpoint = %config.spaces_endpoint_url(),
        bucket = %config.spaces_bucket,
        "Object storage configuration loaded"
    );

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.spaces_force_path_style)
        .build();

    S3Client::from_conf(s3_config)
}

/// Instantiate repositories and services from configuration
pub async fn build_components(config: &Config) -> Result<AppComponents, AppError> {
    tracing::info!("Instantiating repositories...");
    let tts_repo = AzureTtsRepository::new(AzureSpeechSettings {
        subscription_key: config.azure_speech_key.clone(),
        region: config.azure_speech_region.clone(),
        endpoint: config.azure_speech_endpoint.clone(),
        timeout: config.tts_timeout(),
    })
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let s3_client = Arc::new(create_s3_client(config).await);
    let object_store: Arc<dyn ObjectStore> =
        Arc::new(SpacesObjectStore::new(s3_client, config.spaces_bucket.clone()));

    tracing::info!("Instantiating services...");
    let conversion_service: Arc<dyn ConversionServiceApi> = Arc::new(ConversionService::new(
        Arc::new(tts_repo),
        object_store.clone(),
        ConversionSettings::from(config),
    ));

    Ok(AppComponents {
        conversion_service,
        object_store,
    })
}

pub async fn build_conversion_service(
    config: &Config,
) -> Result<Arc<dyn ConversionServiceApi>, AppError> {
    Ok(build_components(config).await?.conversion_service)
}
