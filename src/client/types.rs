// Standard library
use std::sync::Arc;

// Project imports
use crate::documents::traits::DocumentCodec;
use crate::metrics::types::MetricsManager;
use crate::providers::traits::RequestExecutor;
use crate::utility::rate_limiter::traits::RateLimiter;

/// Throttled client for the registry's "create document" endpoint.
///
/// Every submission passes through the shared rate limiter before the
/// executor is called, so all clones together stay within one quota.
#[derive(Clone)]
pub struct CrptClient {
    pub(super) limiter: Arc<dyn RateLimiter>,
    pub(super) executor: Arc<dyn RequestExecutor>,
    pub(super) codec: Arc<dyn DocumentCodec>,
    pub(super) metrics: MetricsManager,
}
