// Current module imports
use super::errors::CodecError;
use super::types::{Document, Response};

/// Converts documents to the bytes sent to the registry and registry replies back.
pub trait DocumentCodec: Send + Sync {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, body: &[u8]) -> Result<Response, CodecError>;
}
