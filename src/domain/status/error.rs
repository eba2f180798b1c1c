#[derive(Debug, thiserror::Error)]
pub enum StatusDecodeError {
    #[error("status record is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("status record schema_version must be a non-negative integer")]
    InvalidSchemaVersion,

    #[error("unsupported status record schema_version {0}")]
    UnsupportedSchema(u64),
}
