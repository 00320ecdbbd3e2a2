//! Session provider backed by a Supabase (GoTrue) auth service

use super::{AuthError, Session, SessionProvider, SessionStore};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::collections::HashMap;
use url::Url;

/// Sessions expiring within this many seconds are refreshed on read
const REFRESH_MARGIN_SECS: i64 = 10;

/// Auth service location and public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Project reference, i.e. the first label of the service host
    pub fn project_ref(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| {
                url.host_str()
                    .and_then(|host| host.split('.').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "local".to_string())
    }

    /// Key under which the browser keeps the session
    pub fn storage_key(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }

    /// Where to send the browser to start an OAuth sign-in with `provider`;
    /// the service redirects back to `redirect_to` with the session
    pub fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
        let mut url = Url::parse(&format!("{}/auth/v1/authorize", self.url))
            .map_err(|e| AuthError::Configuration(format!("invalid auth url {}: {e}", self.url)))?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }

    fn token_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=refresh_token", self.url)
    }
}

/// Session provider that reads sessions from a [`SessionStore`] and refreshes
/// them against the auth service's token endpoint
pub struct SupabaseAuth<S> {
    http: Client,
    config: SupabaseConfig,
    store: S,
}

impl<S: SessionStore> SupabaseAuth<S> {
    pub fn new(config: SupabaseConfig, store: S) -> Result<Self, AuthError> {
        Url::parse(&config.url)
            .map_err(|e| AuthError::Configuration(format!("invalid auth url {}: {e}", config.url)))?;
        if config.anon_key.is_empty() {
            return Err(AuthError::Configuration("anon key is required".into()));
        }

        let http = Client::builder().build()?;
        Ok(Self {
            http,
            config,
            store,
        })
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn refresh_with(&self, refresh_token: &str) -> Result<Session, AuthError> {
        debug!("Refreshing session");
        let response = self
            .http
            .post(self.config.token_url())
            .header("apikey", &self.config.anon_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.anon_key),
            )
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            let mut session: Session = response.json().await?;
            session.stamp_expiry(Self::now());
            self.store.save(&session)?;
            Ok(session)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
                // Refresh token is spent or revoked; the stored session is useless now
                self.store.clear()?;
                Err(AuthError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            } else {
                Err(AuthError::Service {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait(?Send)]
impl<S: SessionStore> SessionProvider for SupabaseAuth<S> {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.store.load()? else {
            return Ok(None);
        };

        if !session.expires_within(Self::now(), REFRESH_MARGIN_SECS) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            debug!("Stored session expired without a refresh token");
            self.store.clear()?;
            return Ok(None);
        };

        match self.refresh_with(refresh_token).await {
            Ok(session) => Ok(Some(session)),
            Err(AuthError::Rejected { status, .. }) => {
                warn!(status, "Expired session could not be refreshed");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn refresh_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(refresh_token) = self.store.load()?.and_then(|s| s.refresh_token) else {
            return Ok(None);
        };
        self.refresh_with(&refresh_token).await.map(Some)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        debug!("Signing out");
        self.store.clear()
    }

    async fn detect_session_in_url(&self, url: &str) -> Result<Option<Session>, AuthError> {
        let url = Url::parse(url).map_err(|e| AuthError::Callback(e.to_string()))?;

        let mut params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        if let Some(fragment) = url.fragment() {
            params.extend(url::form_urlencoded::parse(fragment.as_bytes()).into_owned());
        }

        if let Some(error) = params.get("error") {
            let description = params
                .get("error_description")
                .cloned()
                .unwrap_or_else(|| error.clone());
            return Err(AuthError::Callback(description));
        }

        let (Some(access_token), Some(refresh_token)) =
            (params.get("access_token"), params.get("refresh_token"))
        else {
            return Ok(None);
        };

        let mut session = Session::new(access_token.clone()).with_refresh_token(refresh_token.clone());
        if let Some(token_type) = params.get("token_type") {
            session.token_type.clone_from(token_type);
        }
        session.expires_in = params.get("expires_in").and_then(|v| v.parse().ok());
        session.expires_at = params.get("expires_at").and_then(|v| v.parse().ok());
        session.stamp_expiry(Self::now());

        self.store.save(&session)?;
        debug!("Session established from redirect URL");
        Ok(Some(session))
    }
}
