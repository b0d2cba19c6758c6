/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "FCRPT_CONFIG_PATH";

/// Prefix of environment variables overriding individual settings
pub const ENV_PREFIX: &str = "FCRPT";

/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Registry API configuration
[api]
base_url = "https://ismp.crpt.ru/api/v3"
create_path = "/lk/documents/create"
# Bearer token, remove the line to send requests without one
auth_token = "your_api_token_here"
# Header carrying the document signature (optional)
# signature_header = "X-Signature"
timeout_secs = 30

# At most `max_requests` documents are sent within any `window_ms` span
[rate_limit]
max_requests = 5
window_ms = 1000
"#;

pub fn default_log_level() -> String {
    "info".to_string()
}
