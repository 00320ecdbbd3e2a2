//! Session model and the provider seam consumed by the client and the
//! OAuth callback page

pub mod error;
pub mod store;
pub mod supabase;

pub use error::AuthError;
pub use store::{MemorySessionStore, SessionStore};
pub use supabase::{SupabaseAuth, SupabaseConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::Arc;

/// Credential bundle issued by the auth service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Session with only an access token, no expiry
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            token_type: default_token_type(),
            expires_in: None,
            expires_at: None,
            user: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_expires_at(mut self, expires_at: i64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Whether the session is expired, or will be within `margin_secs`, at `now`
    pub fn expires_within(&self, now: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now + margin_secs)
    }

    /// Fill `expires_at` from `expires_in` when the service only sent a lifetime
    pub(crate) fn stamp_expiry(&mut self, now: i64) {
        if self.expires_at.is_none() {
            if let Some(expires_in) = self.expires_in {
                self.expires_at = Some(now + expires_in);
            }
        }
    }
}

/// Source of the current session. Implementations own the session; callers
/// only read it.
#[async_trait(?Send)]
pub trait SessionProvider {
    /// Current session, if one is established
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Ask the auth service for a fresh session
    async fn refresh_session(&self) -> Result<Option<Session>, AuthError>;

    /// Pick up a session delivered in a redirect URL (OAuth implicit grant)
    async fn detect_session_in_url(&self, _url: &str) -> Result<Option<Session>, AuthError> {
        Ok(None)
    }

    /// Forget the current session
    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[async_trait(?Send)]
impl<P: SessionProvider + ?Sized> SessionProvider for Rc<P> {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        (**self).get_session().await
    }

    async fn refresh_session(&self) -> Result<Option<Session>, AuthError> {
        (**self).refresh_session().await
    }

    async fn detect_session_in_url(&self, url: &str) -> Result<Option<Session>, AuthError> {
        (**self).detect_session_in_url(url).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        (**self).sign_out().await
    }
}

#[async_trait(?Send)]
impl<P: SessionProvider + ?Sized> SessionProvider for Arc<P> {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        (**self).get_session().await
    }

    async fn refresh_session(&self) -> Result<Option<Session>, AuthError> {
        (**self).refresh_session().await
    }

    async fn detect_session_in_url(&self, url: &str) -> Result<Option<Session>, AuthError> {
        (**self).detect_session_in_url(url).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        (**self).sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_deserializes_service_payload() {
        let session: Session = serde_json::from_str(
            r#"{"access_token":"abc","token_type":"bearer","expires_in":3600,"refresh_token":"r1","user":{"id":"u1"}}"#,
        )
        .unwrap();

        assert_eq!(session.access_token, "abc");
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.expires_at, None);
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn test_expiry_margin() {
        let session = Session::new("abc").with_expires_at(1_000);
        assert!(!session.expires_within(900, 10));
        assert!(session.expires_within(990, 10));
        assert!(session.expires_within(1_000, 0));
        assert!(!Session::new("abc").expires_within(i64::MAX - 10, 10));
    }

    #[test]
    fn test_stamp_expiry_keeps_existing_timestamp() {
        let mut session = Session::new("abc");
        session.expires_in = Some(60);
        session.stamp_expiry(100);
        assert_eq!(session.expires_at, Some(160));

        session.stamp_expiry(500);
        assert_eq!(session.expires_at, Some(160));
    }
}
