//! Application credentials used to authenticate against the tested API

use std::fmt;

/// Application id and secret
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
    /// Application ID
    pub id: String,
    /// Application secret
    pub secret: String,
}

impl AppCredentials {
    /// Create credentials
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("id", &self.id)
            .field("secret", &"***")
            .finish()
    }
}
