pub mod azure_tts_repository;
pub mod fake_tts_repository;
pub mod memory_object_store;
pub mod object_store;
pub mod spaces_object_store;
pub mod tts_repository;

pub use azure_tts_repository::{AzureSpeechSettings, AzureTtsRepository};
pub use fake_tts_repository::FakeTtsRepository;
pub use memory_object_store::{InMemoryObjectStore, MemoryObject};
pub use object_store::{ObjectAcl, ObjectStore, PutObject, StoreError, StoredObject, WriteCondition};
pub use spaces_object_store::SpacesObjectStore;
pub use tts_repository::{TtsError, TtsRepository};
