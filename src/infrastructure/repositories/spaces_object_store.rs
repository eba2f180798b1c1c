use super::object_store::{ObjectAcl, ObjectStore, PutObject, StoreError, StoredObject, WriteCondition};
use async_trait::async_trait;
use aws_sdk_s3::{
    config::http::HttpResponse,
    error::{DisplayErrorContext, SdkError},
    primitives::ByteStream,
    types::ObjectCannedAcl,
    Client as S3Client,
};
use std::sync::Arc;

/// DigitalOcean Spaces (or any S3-compatible store) implementation of the object store
pub struct SpacesObjectStore {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl SpacesObjectStore {
    pub fn new(s3_client: Arc<S3Client>, bucket: impl Into<String>) -> Self {
        Self {
            s3_client,
            bucket: bucket.into(),
        }
    }
}

impl From<ObjectAcl> for ObjectCannedAcl {
    fn from(acl: ObjectAcl) -> Self {
        match acl {
            ObjectAcl::Private => ObjectCannedAcl::Private,
            ObjectAcl::PublicRead => ObjectCannedAcl::PublicRead,
        }
    }
}

/// 412 is the S3 answer to a failed If-Match / If-None-Match; 409 is returned
/// when a concurrent conditional write to the same key is in flight.
fn is_precondition_status(status: Option<u16>) -> bool {
    matches!(status, Some(409) | Some(412))
}

fn raw_status<E>(err: &SdkError<E, HttpResponse>) -> Option<u16> {
    err.raw_response().map(|response| response.status().as_u16())
}

#[async_trait]
impl ObjectStore for SpacesObjectStore {
    async fn put_object(&self, object: PutObject) -> Result<Option<String>, StoreError> {
        let size = object.body.len();
        let key = object.key.clone();

        let mut request = self
            .s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(&object.key)
            .body(ByteStream::from(object.body))
            .content_type(&object.content_type)
            .acl(object.acl.into());

        if let Some(cache_control) = object.cache_control {
            request = request.cache_control(cache_control);
        }

        request = match object.condition {
            WriteCondition::None => request,
            WriteCondition::IfMatch(etag) => request.if_match(etag),
            WriteCondition::IfAbsent => request.if_none_match("*"),
        };

        let output = request.send().await.map_err(|e| {
            if is_precondition_status(raw_status(&e)) {
                tracing::warn!(bucket = %self.bucket, key = %key, "Conditional put rejected");
                return StoreError::PreconditionFailed(key.clone());
            }
            tracing::error!(
                error = %DisplayErrorContext(&e),
                bucket = %self.bucket,
                key = %key,
                "S3 put_object failed"
            );
            StoreError::Backend(format!("Failed to upload {}: {}", key, DisplayErrorContext(&e)))
        })?;

        tracing::debug!(bucket = %self.bucket, key = %key, size_bytes = size, "Object uploaded");

        Ok(output.e_tag().map(str::to_owned))
    }

    async fn get_object(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        let result = self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false)
                    || raw_status(&e) == Some(404);
                if missing {
                    tracing::debug!(bucket = %self.bucket, key = %key, "Object not found");
                    return Ok(None);
                }
                return Err(StoreError::Backend(format!(
                    "Failed to fetch {}: {}",
                    key,
                    DisplayErrorContext(&e)
                )));
            }
        };

        let etag = output.e_tag().map(str::to_owned);
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to read {}: {}", key, e)))?
            .into_bytes()
            .to_vec();

        Ok(Some(StoredObject { body, etag }))
    }

    async fn check_connection(&self) -> Result<(), StoreError> {
        self.s3_client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))
    }
}
