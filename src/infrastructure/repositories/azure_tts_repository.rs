use super::tts_repository::{TtsError, TtsRepository};
use crate::domain::speech::SsmlDocument;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

const PROVIDER: &str = "Azure";

/// 16kHz mono MP3
pub const OUTPUT_FORMAT: &str = "audio-16khz-64kbitrate-mono-mp3";
const SSML_CONTENT_TYPE: &str = "application/ssml+xml";
const USER_AGENT: &str = "speech-convert";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";

#[derive(Debug, Clone)]
pub struct AzureSpeechSettings {
    pub subscription_key: String,
    pub region: String,
    /// Overrides the region-derived endpoint
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl AzureSpeechSettings {
    pub fn endpoint_url(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.region
            )
        })
    }
}

/// Azure Cognitive Services Speech (REST) implementation of the TTS repository
pub struct AzureTtsRepository {
    client: Client,
    endpoint: String,
    subscription_key: String,
}

impl AzureTtsRepository {
    pub fn new(settings: AzureSpeechSettings) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TtsError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: settings.endpoint_url(),
            subscription_key: settings.subscription_key,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> TtsError {
        let message = if err.is_timeout() {
            format!("timed out calling {}", self.endpoint)
        } else {
            err.to_string()
        };
        TtsError::Transport {
            provider: PROVIDER,
            message,
        }
    }
}

#[async_trait]
impl TtsRepository for AzureTtsRepository {
    async fn synthesize(&self, ssml: &SsmlDocument) -> Result<Vec<u8>, TtsError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            endpoint = %self.endpoint,
            output_format = OUTPUT_FORMAT,
            ssml_length = ssml.as_str().len(),
            "Calling Azure Speech synthesis"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, self.subscription_key.as_str())
            .header(header::CONTENT_TYPE, SSML_CONTENT_TYPE)
            .header(OUTPUT_FORMAT_HEADER, OUTPUT_FORMAT)
            .body(ssml.as_str().to_owned())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %self.endpoint, "Azure Speech request failed");
                self.transport_error(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Azure Speech rejected synthesis request"
            );
            return Err(TtsError::Rejected {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_vec();

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "azure",
            latency_ms = duration.as_millis(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}
