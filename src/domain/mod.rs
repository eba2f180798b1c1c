pub mod conversion;
pub mod speech;
pub mod status;
