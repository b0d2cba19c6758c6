// Standard library
use std::fmt;

/// Detached signature accompanying a submitted document.
///
/// Opaque to everything but the executor that transmits it. `Debug` never
/// prints the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&"<redacted>").finish()
    }
}

impl From<String> for Signature {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Signature {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
