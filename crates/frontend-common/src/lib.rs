pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod cursor;
pub mod routes;
pub mod theme;

pub use auth::{AuthHandle, AuthProvider, OAuthCallback};
pub use client::{create_api_client, SharedClient};
pub use components::{Spinner, ThemeToggle};
pub use config::{ApiConfig, AuthConfig, CursorConfig};
pub use cursor::{CustomCursor, PointerCapability};
pub use routes::Route;
pub use theme::{Theme, ThemeContext, ThemeProvider};
