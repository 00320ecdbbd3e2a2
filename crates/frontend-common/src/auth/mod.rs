//! Authentication module

pub mod callback;
pub mod context;
pub mod storage;

// Re-export commonly used items
pub use callback::{resolve_callback, CallbackOutcome, OAuthCallback};
pub use context::{use_auth, AuthHandle, AuthProvider, SharedSessionProvider};
pub use storage::{create_session_provider, oauth_login_url, BrowserSessionStore};
