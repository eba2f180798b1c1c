use super::tts_repository::{TtsError, TtsRepository};
use crate::domain::speech::SsmlDocument;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

const PROVIDER: &str = "Fake";

enum FakeOutcome {
    Audio(Vec<u8>),
    Rejected { status: u16, body: String },
}

/// TTS repository that never leaves the process.
///
/// Returns fixed audio (or a fixed rejection) and records what it was asked
/// to synthesize.
pub struct FakeTtsRepository {
    outcome: FakeOutcome,
    calls: AtomicUsize,
    last_ssml: Mutex<Option<SsmlDocument>>,
}

impl FakeTtsRepository {
    pub fn returning(audio: Vec<u8>) -> Self {
        Self::with_outcome(FakeOutcome::Audio(audio))
    }

    pub fn rejecting(status: u16, body: impl Into<String>) -> Self {
        Self::with_outcome(FakeOutcome::Rejected {
            status,
            body: body.into(),
        })
    }

    fn with_outcome(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_ssml: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn last_ssml(&self) -> Option<SsmlDocument> {
        self.last_ssml.lock().await.clone()
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    async fn synthesize(&self, ssml: &SsmlDocument) -> Result<Vec<u8>, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ssml.lock().await = Some(ssml.clone());

        tracing::debug!(ssml_length = ssml.as_str().len(), "FakeTtsRepository: returning fixed outcome");

        match &self.outcome {
            FakeOutcome::Audio(audio) => Ok(audio.clone()),
            FakeOutcome::Rejected { status, body } => Err(TtsError::Rejected {
                provider: PROVIDER,
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
