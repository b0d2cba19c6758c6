// Current module imports
use super::errors::CodecError;
use super::traits::DocumentCodec;
use super::types::{Document, JsonCodec, Response};

impl DocumentCodec for JsonCodec {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(document).map_err(CodecError::Encoding)
    }

    fn decode(&self, body: &[u8]) -> Result<Response, CodecError> {
        // The registry may acknowledge with an empty body.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Response::default());
        }

        serde_json::from_slice(body).map_err(|error| CodecError::Decoding {
            error,
            raw: String::from_utf8_lossy(body).into_owned(),
        })
    }
}
