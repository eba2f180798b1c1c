use std::fmt;
use uuid::Uuid;

pub const AUDIO_EXTENSION: &str = "mp3";

/// Object key of a synthesized audio file: `<prefix>-<uuid v4>.mp3`.
///
/// Uniqueness relies on the randomness of the UUID; no existence check is made
/// against the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioKey(String);

impl AudioKey {
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}.{}", prefix, Uuid::new_v4(), AUDIO_EXTENSION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL of the object under the given base URL.
    pub fn public_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for AudioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
