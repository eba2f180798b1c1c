pub mod dto;
pub mod error;
pub mod service;

pub use dto::{ConversionRequest, ConversionResult, ResolvedRequest};
pub use error::ConversionError;
pub use service::{ConversionService, ConversionServiceApi, ConversionSettings};
