use async_trait::async_trait;

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    Private,
    PublicRead,
}

/// Precondition attached to a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCondition {
    /// Unconditional overwrite
    None,
    /// Only replace the object if its ETag still matches
    IfMatch(String),
    /// Only create the object if nothing exists under the key
    IfAbsent,
}

#[derive(Debug, Clone)]
pub struct PutObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    pub acl: ObjectAcl,
    pub cache_control: Option<String>,
    pub condition: WriteCondition,
}

impl PutObject {
    /// Publicly readable MP3 object.
    pub fn audio(key: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            body,
            content_type: AUDIO_CONTENT_TYPE.to_string(),
            acl: ObjectAcl::PublicRead,
            cache_control: None,
            condition: WriteCondition::None,
        }
    }

    /// Publicly readable JSON object that clients must never cache.
    pub fn uncached_json(key: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            body,
            content_type: JSON_CONTENT_TYPE.to_string(),
            acl: ObjectAcl::PublicRead,
            cache_control: Some(NO_CACHE.to_string()),
            condition: WriteCondition::None,
        }
    }

    pub fn with_condition(mut self, condition: WriteCondition) -> Self {
        self.condition = condition;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("precondition failed for {0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    Backend(String),
}

/// Repository over an S3-compatible bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object, returning its new ETag when the backend reports one.
    ///
    /// # Errors
    /// `StoreError::PreconditionFailed` when `condition` does not hold.
    async fn put_object(&self, object: PutObject) -> Result<Option<String>, StoreError>;

    /// Fetch an object; `Ok(None)` when the key does not exist.
    async fn get_object(&self, key: &str) -> Result<Option<StoredObject>, StoreError>;

    /// Verify the bucket is reachable.
    async fn check_connection(&self) -> Result<(), StoreError>;
}
