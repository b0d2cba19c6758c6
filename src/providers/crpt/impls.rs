// Standard library
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::{debug, error, trace};

// Project imports
use crate::providers::errors::ApiError;
use crate::providers::traits::RequestExecutor;
use crate::providers::types::Signature;

// Current module imports
use super::constants::{
    default_base_url, default_create_path, default_timeout_secs, PLACEHOLDER_TOKEN,
};
use super::errors::ApiValidationError;
use super::functions::{create_reqwest_client, interpret_response};
use super::types::{ApiConfig, HttpExecutor};

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            create_path: default_create_path(),
            auth_token: None,
            signature_header: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ApiValidationError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ApiValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        if !self.create_path.starts_with('/') {
            return Err(ApiValidationError::InvalidCreatePath(
                self.create_path.clone(),
            ));
        }

        if self.auth_token.as_deref() == Some(PLACEHOLDER_TOKEN) {
            return Err(ApiValidationError::PlaceholderToken);
        }

        if matches!(self.signature_header.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(ApiValidationError::EmptySignatureHeader);
        }

        if self.timeout_secs == 0 {
            return Err(ApiValidationError::InvalidTimeout);
        }

        Ok(())
    }

    /// Full URL of the "create document" endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim().trim_end_matches('/'),
            self.create_path
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HttpExecutor {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = create_reqwest_client(&config)?;

        let signature_header = config
            .signature_header
            .as_deref()
            .map(|name| HeaderName::from_bytes(name.trim().as_bytes()))
            .transpose()?;

        Ok(Self {
            endpoint: config.endpoint(),
            signature_header,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn signature_value(&self, signature: &Signature) -> Result<Option<HeaderValue>, ApiError> {
        if self.signature_header.is_none() {
            return Ok(None);
        }

        let mut value = HeaderValue::from_str(signature.as_str())?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    fn check_signature(&self, signature: &Signature) -> Result<(), ApiError> {
        self.signature_value(signature).map(|_| ())
    }

    async fn send(&self, encoded: Vec<u8>, signature: &Signature) -> Result<Vec<u8>, ApiError> {
        let mut request = self.client.post(&self.endpoint).body(encoded);

        match (&self.signature_header, self.signature_value(signature)?) {
            (Some(name), Some(value)) => request = request.header(name.clone(), value),
            _ => trace!(
                endpoint = %self.endpoint,
                "No signature header configured, signature not transmitted"
            ),
        }

        debug!(endpoint = %self.endpoint, "Sending document to registry");

        let response = request.send().await.map_err(|e| {
            error!(endpoint = %self.endpoint, "Failed to send document: {}", e);
            ApiError::Transport {
                url: self.endpoint.clone(),
                source: e,
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::Transport {
            url: self.endpoint.clone(),
            source: e,
        })?;

        interpret_response(status, body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_create_endpoint() {
        let config = ApiConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.endpoint(),
            "https://ismp.crpt.ru/api/v3/lk/documents/create"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/".into(),
            ..ApiConfig::default()
        };

        assert_eq!(config.endpoint(), "http://localhost:8080/lk/documents/create");
    }

    #[test]
    fn rejects_invalid_settings() {
        let bad_url = ApiConfig {
            base_url: "ismp.crpt.ru".into(),
            ..ApiConfig::default()
        };
        assert_eq!(
            bad_url.validate(),
            Err(ApiValidationError::InvalidBaseUrl("ismp.crpt.ru".into()))
        );

        let placeholder = ApiConfig {
            auth_token: Some(PLACEHOLDER_TOKEN.into()),
            ..ApiConfig::default()
        };
        assert_eq!(
            placeholder.validate(),
            Err(ApiValidationError::PlaceholderToken)
        );

        let blank_header = ApiConfig {
            signature_header: Some("  ".into()),
            ..ApiConfig::default()
        };
        assert_eq!(
            blank_header.validate(),
            Err(ApiValidationError::EmptySignatureHeader)
        );

        let no_timeout = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(no_timeout.validate(), Err(ApiValidationError::InvalidTimeout));
    }

    #[test]
    fn executor_rejects_malformed_signature_header_name() {
        let config = ApiConfig {
            signature_header: Some("X Signature".into()),
            ..ApiConfig::default()
        };

        assert!(matches!(
            HttpExecutor::new(config),
            Err(ApiError::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn executor_builds_with_token_and_signature_header() {
        let config = ApiConfig {
            auth_token: Some("secret".into()),
            signature_header: Some("X-Signature".into()),
            ..ApiConfig::default()
        };

        let executor = HttpExecutor::new(config).unwrap();
        assert_eq!(
            executor.endpoint(),
            "https://ismp.crpt.ru/api/v3/lk/documents/create"
        );
        assert!(executor.signature_header.is_some());
    }

    #[test]
    fn signature_is_checked_only_when_transmitted() {
        let broken = Signature::new("line one\nline two");

        let with_header = HttpExecutor::new(ApiConfig {
            signature_header: Some("X-Signature".into()),
            ..ApiConfig::default()
        })
        .unwrap();
        assert!(matches!(
            with_header.check_signature(&broken),
            Err(ApiError::InvalidHeaderValue(_))
        ));
        assert!(with_header.check_signature(&Signature::new("c2lnbg==")).is_ok());

        let without_header = HttpExecutor::new(ApiConfig::default()).unwrap();
        assert!(without_header.check_signature(&broken).is_ok());
    }
}
