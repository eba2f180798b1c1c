use super::object_store::{ObjectAcl, ObjectStore, PutObject, StoreError, StoredObject, WriteCondition};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Object as held by [`InMemoryObjectStore`], metadata included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    pub body: Vec<u8>,
    pub etag: String,
    pub content_type: String,
    pub acl: ObjectAcl,
    pub cache_control: Option<String>,
}

/// In-process object store honouring the same write conditions as S3.
///
/// ETags are opaque, monotonically increasing per store.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, MemoryObject>>,
    etag_counter: AtomicU64,
    puts: AtomicU64,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `key` without going through the write path.
    pub async fn seed(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        let object = MemoryObject {
            body: body.into(),
            etag: self.next_etag(),
            content_type: "application/octet-stream".to_string(),
            acl: ObjectAcl::Private,
            cache_control: None,
        };
        self.objects.write().await.insert(key.into(), object);
    }

    pub async fn object(&self, key: &str) -> Option<MemoryObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of successful writes through [`ObjectStore::put_object`].
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::SeqCst)
    }

    fn next_etag(&self) -> String {
        format!("\"{}\"", self.etag_counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, object: PutObject) -> Result<Option<String>, StoreError> {
        let mut objects = self.objects.write().await;
        let current = objects.get(&object.key).map(|o| o.etag.as_str());

        let allowed = match &object.condition {
            WriteCondition::None => true,
            WriteCondition::IfMatch(etag) => current == Some(etag.as_str()),
            WriteCondition::IfAbsent => current.is_none(),
        };
        if !allowed {
            return Err(StoreError::PreconditionFailed(object.key));
        }

        let etag = self.next_etag();
        objects.insert(
            object.key,
            MemoryObject {
                body: object.body,
                etag: etag.clone(),
                content_type: object.content_type,
                acl: object.acl,
                cache_control: object.cache_control,
            },
        );
        self.puts.fetch_add(1, Ordering::SeqCst);

        Ok(Some(etag))
    }

    async fn get_object(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        Ok(self.objects.read().await.get(key).map(|o| StoredObject {
            body: o.body.clone(),
            etag: Some(o.etag.clone()),
        }))
    }

    async fn check_connection(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
