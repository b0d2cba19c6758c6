pub mod errors;
pub mod impls;
pub mod types;

pub use errors::ClientError;
pub use types::CrptClient;
