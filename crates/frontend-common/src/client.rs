//! Client configuration and initialization

use crate::auth::SharedSessionProvider;
use crate::config::ApiConfig;
use critique_http::ApiClient;
pub use critique_http::ClientError;

/// API client authenticated through the shared session provider
pub type SharedClient = ApiClient<SharedSessionProvider>;

/// Build the API client for the configured backend
pub fn create_api_client(provider: SharedSessionProvider) -> Result<SharedClient, ClientError> {
    ApiClient::new(ApiConfig::base_url(), provider)
}
