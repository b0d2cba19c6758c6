// 3rd party crates
use reqwest::header::HeaderName;
use reqwest::Client;
use serde::Deserialize;

// Current module imports
use super::constants::{default_base_url, default_create_path, default_timeout_secs};

/// Connection settings for the registry API.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_create_path")]
    pub create_path: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Header carrying the document signature; not transmitted when unset
    #[serde(default)]
    pub signature_header: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sends encoded documents to the registry over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    pub client: Client,
    pub(super) endpoint: String,
    pub(super) signature_header: Option<HeaderName>,
}
