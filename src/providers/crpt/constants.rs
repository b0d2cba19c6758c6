/// Registry API root
pub const CRPT_API_BASE: &str = "https://ismp.crpt.ru/api/v3";

/// Path of the "create document" endpoint, relative to the API root
pub const CREATE_DOCUMENT_PATH: &str = "/lk/documents/create";

/// Placeholder token written into the default configuration file
pub const PLACEHOLDER_TOKEN: &str = "your_api_token_here";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn default_base_url() -> String {
    CRPT_API_BASE.to_string()
}

pub fn default_create_path() -> String {
    CREATE_DOCUMENT_PATH.to_string()
}

pub fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
