// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode document: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Failed to decode response: {error} - Raw: {raw}")]
    Decoding {
        #[source]
        error: serde_json::Error,
        raw: String,
    },
}
