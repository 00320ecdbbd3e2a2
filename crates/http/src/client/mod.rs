//! Bearer-token API client
//!
//! Every call reads the current session from the injected [`SessionProvider`]
//! and sends it as `Authorization: Bearer <token>`. A `401` gets exactly one
//! remediation: refresh the session and replay the request once with the new
//! token. Anything else, including transport errors, goes straight back to
//! the caller.

pub mod error;

use crate::auth::{Session, SessionProvider};
use error::ClientError;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;

/// Per-call headers and body
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header; replaces any earlier value under the same name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON-encode `body` and mark the request as JSON
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ClientError> {
        let encoded = serde_json::to_vec(body)?;
        Ok(self
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .body(encoded))
    }
}

/// API client that authenticates with the provider's current session
#[derive(Clone)]
pub struct ApiClient<P> {
    client: Client,
    base_url: String,
    provider: P,
}

impl<P: SessionProvider> ApiClient<P> {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>, provider: P) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build(provider)
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Send `method path` with the current session, refreshing and replaying
    /// once if the server answers `401`
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let auth = self.current_auth_headers().await?;
        let headers = merge_headers(auth, &options.headers);
        let response = self
            .send(&method, path, headers, options.body.as_deref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(%method, path, "Request unauthorized, refreshing session");
        match self.provider.refresh_session().await {
            Ok(Some(session)) => {
                let headers = merge_headers(bearer_headers(&session)?, &options.headers);
                self.send(&method, path, headers, options.body.as_deref())
                    .await
            }
            Ok(None) => {
                debug!(path, "No session to refresh, returning original response");
                Ok(response)
            }
            Err(err) => {
                warn!(path, error = %err, "Session refresh failed");
                Ok(response)
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response, ClientError> {
        self.request(Method::GET, path, RequestOptions::new()).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
    ) -> Result<Response, ClientError> {
        self.request(Method::POST, path, json_options(body)?).await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
    ) -> Result<Response, ClientError> {
        self.request(Method::PUT, path, json_options(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ClientError> {
        self.request(Method::DELETE, path, RequestOptions::new()).await
    }

    async fn current_auth_headers(&self) -> Result<HeaderMap, ClientError> {
        match self.provider.get_session().await {
            Ok(Some(session)) => bearer_headers(&session),
            Ok(None) => Ok(HeaderMap::new()),
            Err(err) => {
                warn!(error = %err, "Session lookup failed, sending request unauthenticated");
                Ok(HeaderMap::new())
            }
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        headers: HeaderMap,
        body: Option<&[u8]>,
    ) -> Result<Response, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), url).headers(headers);
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }
        Ok(request.send().await?)
    }
}

/// Decode a successful JSON response, or classify the error status
pub async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

fn bearer_headers(session: &Session) -> Result<HeaderMap, ClientError> {
    let mut value = HeaderValue::from_str(&session.bearer())
        .map_err(|_| ClientError::InvalidHeader("access token is not a valid header value".into()))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, value);
    Ok(headers)
}

/// Caller headers win over the auth header on collision
fn merge_headers(mut auth: HeaderMap, caller: &HeaderMap) -> HeaderMap {
    auth.extend(caller.clone());
    auth
}

fn json_options<T: Serialize + ?Sized>(body: Option<&T>) -> Result<RequestOptions, ClientError> {
    match body {
        Some(body) => RequestOptions::new().json(body),
        None => Ok(RequestOptions::new()),
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the client around `provider`
    pub fn build<P: SessionProvider>(self, provider: P) -> Result<ApiClient<P>, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(ApiClient {
            client: Client::builder().build()?,
            base_url,
            provider,
        })
    }
}
