use super::dto::{ConversionRequest, ConversionResult, ResolvedRequest};
use super::error::ConversionError;
use crate::domain::speech::{AudioKey, SsmlBuilder};
use crate::domain::status::{decode_status, StatusRecord};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::{
    ObjectStore, PutObject, StoreError, TtsRepository, WriteCondition,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ConversionSettings {
    pub default_text: String,
    pub default_voice: String,
    pub audio_key_prefix: String,
    pub status_key: String,
    pub public_base_url: String,
    /// Guard the status read-modify-write with If-Match / If-None-Match
    pub conditional_writes: bool,
    /// Re-reads allowed after a precondition failure
    pub max_status_retries: u32,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            default_text: "Hello World".to_string(),
            default_voice: "en-US-JennyNeural".to_string(),
            audio_key_prefix: "daily_audio".to_string(),
            status_key: "status.json".to_string(),
            public_base_url: "https://bucket.nyc3.digitaloceanspaces.com".to_string(),
            conditional_writes: true,
            max_status_retries: 3,
        }
    }
}

impl From<&Config> for ConversionSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_text: config.default_text.clone(),
            default_voice: config.default_voice.clone(),
            audio_key_prefix: config.audio_key_prefix.clone(),
            status_key: config.status_key.clone(),
            public_base_url: config.public_base_url(),
            conditional_writes: config.status_conditional_writes,
            max_status_retries: config.status_max_retries,
        }
    }
}

/// Status record as read at the start of an update, plus the precondition
/// that makes the following write safe.
struct StatusSnapshot {
    record: StatusRecord,
    condition: WriteCondition,
}

pub struct ConversionService {
    tts_repo: Arc<dyn TtsRepository>,
    object_store: Arc<dyn ObjectStore>,
    settings: ConversionSettings,
}

impl ConversionService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        object_store: Arc<dyn ObjectStore>,
        settings: ConversionSettings,
    ) -> Self {
        Self {
            tts_repo,
            object_store,
            settings,
        }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Convert text to speech and publish it
    ///
    /// This operation:
    /// - Synthesizes the text with the requested voice
    /// - Uploads the MP3 under a fresh unique key
    /// - Appends the new artifact to the status record
    ///
    /// Returns the public URL of the new audio and its version
    async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError>;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        let start_time = Instant::now();
        let request = request.resolve(&self.settings.default_text, &self.settings.default_voice);

        tracing::info!(
            text_length = request.text.len(),
            voice = %request.voice,
            "Conversion request"
        );

        // 1. Synthesize
        let audio = self.synthesize(&request).await?;

        // 2. Upload audio under a fresh key
        let key = AudioKey::generate(&self.settings.audio_key_prefix);
        self.upload_audio(&key, audio).await?;
        let url = key.public_url(&self.settings.public_base_url);

        // 3. Record it in the status file
        let version = self.update_status(&key, &url).await.map_err(|e| {
            tracing::error!(
                error = %e,
                orphaned_key = %key,
                "Status update failed; uploaded audio is not referenced"
            );
            e
        })?;

        tracing::info!(
            key = %key,
            version = version,
            latency_ms = start_time.elapsed().as_millis(),
            "Conversion completed"
        );

        Ok(ConversionResult { url, version })
    }
}

impl ConversionService {
    async fn synthesize(&self, request: &ResolvedRequest) -> Result<Vec<u8>, ConversionError> {
        let ssml = SsmlBuilder::new(&request.voice).text(&request.text).build();

        self.tts_repo.synthesize(&ssml).await.map_err(|e| {
            tracing::warn!(error = %e, "Synthesis failed");
            ConversionError::from(e)
        })
    }

    async fn upload_audio(&self, key: &AudioKey, audio: Vec<u8>) -> Result<(), ConversionError> {
        let size = audio.len();

        self.object_store
            .put_object(PutObject::audio(key.as_str(), audio))
            .await
            .map_err(|e| ConversionError::Storage(e.to_string()))?;

        tracing::info!(key = %key, audio_size_bytes = size, "Audio uploaded");
        Ok(())
    }

    /// Read-modify-write of the status record. A precondition failure means
    /// another writer got there first: re-read and re-apply.
    async fn update_status(&self, key: &AudioKey, url: &str) -> Result<u64, ConversionError> {
        let mut attempt: u32 = 0;

        loop {
            let snapshot = self.read_status().await;
            let mut record = snapshot.record;
            let entry = record
                .next_entry(key.as_str(), url, Utc::now())
                .ok_or_else(|| {
                    ConversionError::Internal(format!(
                        "{} version counter is exhausted at {}",
                        self.settings.status_key,
                        record.version()
                    ))
                })?;
            let version = entry.version;
            record.append(entry);

            let body = record
                .to_json_pretty()
                .map_err(|e| ConversionError::Internal(e.to_string()))?;
            let condition = if self.settings.conditional_writes {
                snapshot.condition
            } else {
                WriteCondition::None
            };

            let put = PutObject::uncached_json(&self.settings.status_key, body)
                .with_condition(condition);

            match self.object_store.put_object(put).await {
                Ok(_) => {
                    tracing::info!(version = version, attempt = attempt, "Status record updated");
                    return Ok(version);
                }
                Err(StoreError::PreconditionFailed(_))
                    if attempt < self.settings.max_status_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        attempt = attempt,
                        version = version,
                        "Status record changed concurrently, retrying"
                    );
                }
                Err(e) => return Err(ConversionError::from(e)),
            }
        }
    }

    /// Absent, unreadable or corrupt status records all start a fresh record.
    /// A failed fetch never licenses overwriting a record that exists.
    async fn read_status(&self) -> StatusSnapshot {
        let status_key = &self.settings.status_key;

        match self.object_store.get_object(status_key).await {
            Ok(Some(object)) => {
                let condition = object
                    .etag
                    .map(WriteCondition::IfMatch)
                    .unwrap_or(WriteCondition::None);
                let record = decode_status(&object.body).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, key = %status_key, "Status record unreadable, starting fresh");
                    StatusRecord::default()
                });
                StatusSnapshot { record, condition }
            }
            Ok(None) => {
                tracing::info!(key = %status_key, "No status record yet, starting fresh");
                StatusSnapshot {
                    record: StatusRecord::default(),
                    condition: WriteCondition::IfAbsent,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %status_key,
                    "Status record fetch failed, starting fresh only if no record exists"
                );
                StatusSnapshot {
                    record: StatusRecord::default(),
                    condition: WriteCondition::IfAbsent,
                }
            }
        }
    }
}
