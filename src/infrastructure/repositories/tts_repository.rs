use crate::domain::speech::SsmlDocument;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// The provider answered with a non-success status
    #[error("{provider} Error: {body}")]
    Rejected {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider could not be reached or the response could not be read
    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Azure Speech, or a fake in tests).
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize an SSML document into MP3 audio.
    ///
    /// # Errors
    /// `TtsError::Rejected` when the provider refuses the request,
    /// `TtsError::Transport` when it is unavailable or times out.
    async fn synthesize(&self, ssml: &SsmlDocument) -> Result<Vec<u8>, TtsError>;
}
