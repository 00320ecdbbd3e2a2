//! Browser-backed session slot

use crate::config::AuthConfig;
use crate::routes::Route;
use critique_http::{AuthError, Session, SessionStore, SupabaseAuth, SupabaseConfig};
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use yew_router::Routable;

/// Keeps the session in `localStorage`, under the same key the auth
/// service's own browser SDK uses
pub struct BrowserSessionStore {
    key: String,
}

impl BrowserSessionStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        match LocalStorage::get::<Session>(&self.key) {
            Ok(session) => Ok(Some(session)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => {
                tracing::warn!(error = %err, key = %self.key, "Discarding unreadable stored session");
                LocalStorage::delete(&self.key);
                Ok(None)
            }
            Err(err) => Err(AuthError::Storage(err.to_string())),
        }
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        LocalStorage::set(&self.key, session).map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<(), AuthError> {
        LocalStorage::delete(&self.key);
        Ok(())
    }
}

fn supabase_config() -> SupabaseConfig {
    SupabaseConfig::new(AuthConfig::SUPABASE_URL, AuthConfig::SUPABASE_ANON_KEY)
}

/// The session provider used in the browser
pub fn create_session_provider() -> Result<SupabaseAuth<BrowserSessionStore>, AuthError> {
    let config = supabase_config();
    let store = BrowserSessionStore::new(config.storage_key());
    SupabaseAuth::new(config, store)
}

/// Sign-in URL for `provider` that lands back on the callback page
pub fn oauth_login_url(provider: &str) -> Result<String, AuthError> {
    let origin = window()
        .location()
        .origin()
        .map_err(|_| AuthError::Configuration("page origin unavailable".into()))?;
    let redirect_to = format!("{origin}{}", Route::AuthCallback.to_path());
    supabase_config().authorize_url(provider, &redirect_to)
}
