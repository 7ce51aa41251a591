use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub logged_in_at: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,
}

/// Verifies teacher credentials. Real verification lives outside this process.
pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Accepts any non-empty credentials after a fixed delay.
pub struct StubAuthenticator {
    delay: Duration,
}

impl StubAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Authenticator for StubAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(Session {
            username: username.to_string(),
            logged_in_at: Utc::now().to_rfc3339(),
        })
    }
}
