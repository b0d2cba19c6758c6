// Standard library
use std::sync::Arc;

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

// Project imports
use crate::documents::traits::DocumentCodec;
use crate::documents::types::{Document, JsonCodec, Response};
use crate::metrics::types::MetricsManager;
use crate::providers::crpt::types::HttpExecutor;
use crate::providers::traits::RequestExecutor;
use crate::providers::types::Signature;
use crate::settings::types::Settings;
use crate::utility::rate_limiter::errors::RateLimitError;
use crate::utility::rate_limiter::traits::RateLimiter;
use crate::utility::rate_limiter::types::SlidingWindowRateLimiter;

// Current module imports
use super::errors::ClientError;
use super::types::CrptClient;

impl CrptClient {
    pub fn new(
        limiter: Arc<dyn RateLimiter>,
        executor: Arc<dyn RequestExecutor>,
        codec: Arc<dyn DocumentCodec>,
    ) -> Self {
        Self {
            limiter,
            executor,
            codec,
            metrics: MetricsManager::new(),
        }
    }

    /// Builds an HTTP-backed client limited by `settings.rate_limit`.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let limiter = SlidingWindowRateLimiter::from_config(&settings.rate_limit)?;
        let executor = HttpExecutor::new(settings.api.clone())?;

        info!(
            endpoint = %executor.endpoint(),
            max_requests = settings.rate_limit.max_requests,
            window_ms = settings.rate_limit.window_ms,
            "Registry client configured"
        );

        Ok(Self::new(
            Arc::new(limiter),
            Arc::new(executor),
            Arc::new(JsonCodec),
        ))
    }

    pub fn metrics(&self) -> &MetricsManager {
        &self.metrics
    }

    /// Submits `document` once a rate limit slot is free.
    ///
    /// The document is encoded and the signature checked before waiting, so a
    /// malformed submission never uses up quota. Failures are returned as-is, nothing is retried.
    pub async fn submit(
        &self,
        document: &Document,
        signature: &Signature,
    ) -> Result<Response, ClientError> {
        self.submit_inner(document, signature, None).await
    }

    /// Like [`CrptClient::submit`], but abandons the wait for a slot when
    /// `shutdown` fires.
    pub async fn submit_until(
        &self,
        document: &Document,
        signature: &Signature,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<Response, ClientError> {
        self.submit_inner(document, signature, Some(shutdown)).await
    }

    async fn submit_inner(
        &self,
        document: &Document,
        signature: &Signature,
        shutdown: Option<&mut broadcast::Receiver<()>>,
    ) -> Result<Response, ClientError> {
        self.metrics.record_attempt().await;

        let encoded = match self.codec.encode(document) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(doc_id = ?document.id, "Failed to encode document: {}", e);
                self.metrics.record_codec_failure().await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.executor.check_signature(signature) {
            warn!(doc_id = ?document.id, "Signature cannot be sent: {}", e);
            self.metrics.record_api_failure().await;
            return Err(e.into());
        }

        let admission = match shutdown {
            Some(rx) => self.limiter.acquire_until(rx).await,
            None => self.limiter.acquire().await,
        };
        let admission = match admission {
            Ok(admission) => admission,
            Err(e) => {
                if e == RateLimitError::Cancelled {
                    self.metrics.record_cancellation().await;
                }
                debug!(doc_id = ?document.id, "Submission not admitted: {}", e);
                return Err(e.into());
            }
        };
        self.metrics.record_admission(admission.waited).await;

        let body = match self.executor.send(encoded, signature).await {
            Ok(body) => body,
            Err(e) => {
                warn!(doc_id = ?document.id, "Registry request failed: {}", e);
                self.metrics.record_api_failure().await;
                return Err(e.into());
            }
        };

        let response = match self.codec.decode(&body) {
            Ok(response) => response,
            Err(e) => {
                warn!(doc_id = ?document.id, "Failed to decode registry response: {}", e);
                self.metrics.record_codec_failure().await;
                return Err(e.into());
            }
        };

        self.metrics.record_success().await;
        info!(
            doc_id = ?document.id,
            registered_as = ?response.value,
            "Document submitted"
        );

        Ok(response)
    }
}
