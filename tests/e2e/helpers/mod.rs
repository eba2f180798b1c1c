use axum::Router;
use speech_convert::{
    controllers::convert::ConvertController,
    domain::{
        conversion::{ConversionService, ConversionSettings},
        status::{decode_status, StatusRecord},
    },
    infrastructure::{
        http::build_router,
        repositories::{FakeTtsRepository, InMemoryObjectStore, ObjectStore, TtsRepository},
    },
};
use std::sync::Arc;

pub mod api_client;
pub mod tts_mocks;

use api_client::TestClient;

pub const PUBLIC_BASE_URL: &str = "https://test-bucket.nyc3.digitaloceanspaces.com";

pub fn test_settings() -> ConversionSettings {
    ConversionSettings {
        public_base_url: PUBLIC_BASE_URL.to_string(),
        ..ConversionSettings::default()
    }
}

/// Wire the real router over the given adapters
pub fn create_app(
    tts_repo: Arc<dyn TtsRepository>,
    object_store: Arc<dyn ObjectStore>,
    settings: ConversionSettings,
) -> Router {
    let conversion_service = Arc::new(ConversionService::new(
        tts_repo,
        object_store.clone(),
        settings,
    ));
    let convert_controller = Arc::new(ConvertController::new(conversion_service));

    build_router(convert_controller, object_store)
}

pub struct TestContext {
    pub client: TestClient,
    pub store: Arc<InMemoryObjectStore>,
    pub tts: Arc<FakeTtsRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_tts(FakeTtsRepository::returning(tts_mocks::mock_audio_bytes()))
    }

    pub fn with_tts(tts: FakeTtsRepository) -> Self {
        let tts = Arc::new(tts);
        let store = Arc::new(InMemoryObjectStore::new());
        let app = create_app(tts.clone(), store.clone(), test_settings());

        Self {
            client: TestClient::new(app),
            store,
            tts,
        }
    }

    pub async fn status(&self) -> StatusRecord {
        read_status(&self.store).await
    }
}

pub async fn read_status(store: &InMemoryObjectStore) -> StatusRecord {
    let object = store
        .object("status.json")
        .await
        .expect("status.json was not written");
    decode_status(&object.body).expect("status.json is not a valid status record")
}

/// Object key addressed by a public URL
pub fn key_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
