pub mod crpt;
pub mod errors;
pub mod traits;
pub mod types;

pub use errors::ApiError;
pub use traits::RequestExecutor;
pub use types::Signature;
