//! Errors surfaced by [`ApiClient`](super::ApiClient) and [`decode`](super::decode)

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: DNS, connection, timeout
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the bearer token, even after a refresh
    #[error("Not signed in: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any other non-success status
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A success response whose body did not match the expected shape
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Classify a non-success response by its status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(body),
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            _ => Self::Status {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// HTTP status behind the error, when there was a response at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidHeader(_) | Self::Configuration(_) => None,
        }
    }

    /// Whether the error means the session is no longer accepted
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, String::new()),
            ClientError::BadRequest(_)
        ));
        assert!(ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()).is_auth_expired());
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, String::new()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into()),
            ClientError::Status { status: 502, .. }
        ));
    }

    #[test]
    fn test_status_reports_response_code() {
        assert_eq!(ClientError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()).status(), Some(429));
        assert_eq!(ClientError::Unauthorized(String::new()).status(), Some(401));
        assert_eq!(ClientError::Configuration("x".into()).status(), None);
    }
}
