/// Default number of requests allowed per window
pub const DEFAULT_MAX_REQUESTS: u32 = 5;

/// Default window length in milliseconds
pub const DEFAULT_WINDOW_MS: u64 = 1000;

pub fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}

pub fn default_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}
