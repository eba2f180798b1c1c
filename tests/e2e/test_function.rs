use crate::e2e::helpers;

use helpers::{test_settings, tts_mocks};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use speech_convert::{
    controllers::function::{handle, invoke},
    domain::conversion::ConversionService,
    infrastructure::{
        config::Config,
        repositories::{FakeTtsRepository, InMemoryObjectStore},
    },
};
use std::collections::HashMap;
use std::sync::Arc;

fn service() -> (Arc<InMemoryObjectStore>, ConversionService) {
    let store = Arc::new(InMemoryObjectStore::new());
    let service = ConversionService::new(
        Arc::new(FakeTtsRepository::returning(tts_mocks::mock_audio_bytes())),
        store.clone(),
        test_settings(),
    );
    (store, service)
}

#[tokio::test]
async fn it_should_return_envelope_with_url_and_version() {
    let (store, service) = service();

    let response = invoke(&service, json!({ "text": "Hello", "voice": "en-US-AriaNeural" })).await;

    assert_eq!(response.status_code, 200);
    let url = response.body["url"].as_str().unwrap();
    assert!(store.object(helpers::key_from_url(url)).await.is_some());

    let envelope = serde_json::to_value(&response).unwrap();
    assert_eq!(envelope["statusCode"], 200);
    assert_eq!(envelope["headers"], json!({ "Content-Type": "application/json" }));
    assert_eq!(envelope["body"]["version"], 1);
}

#[tokio::test]
async fn it_should_apply_defaults_for_unusable_args() {
    let (_store, service) = service();

    for args in [Value::Null, json!([1, 2]), json!({ "text": null, "voice": 7 })] {
        let response = invoke(&service, args).await;
        assert_eq!(response.status_code, 200);
    }

    // Each invocation produced a new version
    let response = invoke(&service, json!({})).await;
    assert_eq!(response.body["version"], 4);
}

#[tokio::test]
async fn it_should_report_storage_failure_from_real_adapters() {
    let mut server = mockito::Server::new_async().await;
    let _azure = tts_mocks::mock_azure_success(&mut server).await;
    let azure_endpoint = format!("{}{}", server.url(), tts_mocks::AZURE_PATH);

    let vars: HashMap<&str, String> = HashMap::from([
        ("AZURE_SPEECH_KEY", tts_mocks::AZURE_TEST_KEY.to_string()),
        ("AZURE_SPEECH_REGION", "eastus".to_string()),
        ("AZURE_SPEECH_ENDPOINT", azure_endpoint),
        ("SPACES_KEY", "key".to_string()),
        ("SPACES_SECRET", "secret".to_string()),
        ("SPACES_REGION", "nyc3".to_string()),
        ("SPACES_BUCKET", "bucket".to_string()),
        // Non-existent endpoint for testing
        ("SPACES_ENDPOINT", "http://127.0.0.1:9".to_string()),
        ("SPACES_FORCE_PATH_STYLE", "true".to_string()),
        ("STORAGE_TIMEOUT_SECS", "5".to_string()),
    ]);
    let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

    let response = handle(&config, json!({ "text": "Hello" })).await;

    assert_eq!(response.status_code, 500);
    let message = response.body["error"].as_str().unwrap();
    assert!(message.starts_with("Storage error"), "unexpected error: {}", message);
}
