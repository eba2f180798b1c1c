pub mod error;
pub mod migration;
pub mod model;

pub use error::StatusDecodeError;
pub use migration::decode_status;
pub use model::{HistoryEntry, StatusRecord, STATUS_SCHEMA_VERSION};
