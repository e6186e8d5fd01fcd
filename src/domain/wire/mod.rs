pub mod envelope;
pub mod fields;
pub mod xml;

use thiserror::Error;

pub use envelope::{ContentItem, WireEnvelope};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("wire xml serialization failed: {0}")]
    Serialization(String),
    #[error("wire xml is not valid utf-8")]
    Encoding,
}
