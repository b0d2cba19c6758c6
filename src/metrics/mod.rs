pub mod impls;
pub mod types;

pub use types::{MetricsManager, SubmissionMetrics};
