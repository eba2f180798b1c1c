pub mod key;
pub mod ssml;

pub use key::AudioKey;
pub use ssml::{escape_xml, SsmlBuilder, SsmlDocument};
