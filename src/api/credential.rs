use crate::error::{ClientError, Result};
use std::fmt;

/// API key sent as the `key` query parameter on every request.
///
/// The value is only reachable through [`Credential::expose`]; `Debug` and
/// `Display` both print a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ClientError::MissingCredential);
        }
        Ok(Self(key))
    }

    /// Read the key from an environment variable.
    pub fn from_env(var: &str) -> Result<Self> {
        let key = std::env::var(var).map_err(|_| {
            ClientError::Config(format!("{} environment variable not set", var))
        })?;
        Self::new(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
