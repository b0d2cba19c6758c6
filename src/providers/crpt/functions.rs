// 3rd party crates
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{debug, error};

// Project imports
use crate::providers::errors::ApiError;

// Current module imports
use super::types::ApiConfig;

/// Creates a reqwest client with the registry's default headers and timeout.
pub(super) fn create_reqwest_client(config: &ApiConfig) -> Result<Client, ApiError> {
    // Create headers.
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    // Mark security-sensitive headers with `set_sensitive`.
    if let Some(token) = config.auth_token.as_deref() {
        let bearer_token: String = format!("Bearer {}", token);
        let mut auth_value: HeaderValue = HeaderValue::from_str(&bearer_token).map_err(|e| {
            error!(endpoint = %config.base_url, "Invalid API token format: {}", e);
            ApiError::InvalidHeaderValue(e)
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);
    }

    // Build the client.
    let client: Client = Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .build()
        .map_err(|e| {
            error!(endpoint = %config.base_url, "Failed to build HTTP client: {}", e);
            ApiError::HttpClientBuild(e)
        })?;

    Ok(client)
}

/// Splits a registry reply into a success body or an [`ApiError::Status`].
pub fn interpret_response(status: StatusCode, body: Vec<u8>) -> Result<Vec<u8>, ApiError> {
    if status.is_success() {
        debug!(status = status.as_u16(), bytes = body.len(), "Registry accepted document");
        return Ok(body);
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_pass_the_body_through() {
        let body = interpret_response(StatusCode::OK, b"{\"value\":\"1\"}".to_vec()).unwrap();
        assert_eq!(body, b"{\"value\":\"1\"}");

        let body = interpret_response(StatusCode::CREATED, Vec::new()).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn non_success_statuses_carry_the_raw_body() {
        let err = interpret_response(StatusCode::UNAUTHORIZED, b"token expired".to_vec())
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "token expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn redirects_are_not_treated_as_success() {
        let err = interpret_response(StatusCode::FOUND, Vec::new()).unwrap_err();
        assert_eq!(err.status(), Some(302));
    }
}
