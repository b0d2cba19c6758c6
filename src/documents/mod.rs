pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::CodecError;
pub use traits::DocumentCodec;
pub use types::{Description, Document, JsonCodec, Product, Response};
