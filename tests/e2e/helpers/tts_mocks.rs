use mockito::{Mock, ServerGuard};
use speech_convert::infrastructure::repositories::{AzureSpeechSettings, AzureTtsRepository};
use std::time::Duration;

pub const AZURE_TEST_KEY: &str = "test-subscription-key";
pub const AZURE_PATH: &str = "/cognitiveservices/v1";

pub fn mock_audio_bytes() -> Vec<u8> {
    // Minimal valid MP3 file (silence)
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, 0x00, // Some padding
    ]
}

pub fn azure_settings(server: &ServerGuard) -> AzureSpeechSettings {
    AzureSpeechSettings {
        subscription_key: AZURE_TEST_KEY.to_string(),
        region: "eastus".to_string(),
        endpoint: Some(format!("{}{}", server.url(), AZURE_PATH)),
        timeout: Duration::from_secs(5),
    }
}

pub fn azure_repository(server: &ServerGuard) -> AzureTtsRepository {
    AzureTtsRepository::new(azure_settings(server)).expect("Failed to build Azure repository")
}

/// Azure endpoint answering every synthesis with `mock_audio_bytes()`
pub async fn mock_azure_success(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", AZURE_PATH)
        .match_header("Ocp-Apim-Subscription-Key", AZURE_TEST_KEY)
        .match_header("Content-Type", "application/ssml+xml")
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(mock_audio_bytes())
        .create_async()
        .await
}

pub async fn mock_azure_rejection(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("POST", AZURE_PATH)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}
