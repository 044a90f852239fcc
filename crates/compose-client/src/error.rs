//! Error type for Compose API calls
//!
//! Any response with a status above 202 is turned into one of the status
//! variants below, carrying the raw response body as its message.

use thiserror::Error;

/// Errors returned by [`ComposeClient`](crate::ComposeClient)
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict ({code}): {message}")]
    Conflict { code: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Server error ({code}): {message}")]
    ServerError { code: u16, message: String },

    /// Any other status above 202
    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Empty token. Please export $COMPOSE_TOKEN")]
    MissingToken,

    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result alias for Compose API calls
pub type Result<T> = std::result::Result<T, ComposeError>;

impl ComposeError {
    /// Classify a non-success HTTP status and its body
    pub fn from_status(code: u16, message: String) -> Self {
        match code {
            400 => ComposeError::BadRequest { message },
            401 => ComposeError::AuthenticationFailed { message },
            403 => ComposeError::Forbidden { message },
            404 => ComposeError::NotFound { message },
            409 | 412 => ComposeError::Conflict { code, message },
            429 => ComposeError::RateLimited { message },
            500..=599 => ComposeError::ServerError { code, message },
            _ => ComposeError::ApiError { code, message },
        }
    }

    /// HTTP status code, if the error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ComposeError::BadRequest { .. } => Some(400),
            ComposeError::AuthenticationFailed { .. } => Some(401),
            ComposeError::Forbidden { .. } => Some(403),
            ComposeError::NotFound { .. } => Some(404),
            ComposeError::RateLimited { .. } => Some(429),
            ComposeError::Conflict { code, .. }
            | ComposeError::ServerError { code, .. }
            | ComposeError::ApiError { code, .. } => Some(*code),
            ComposeError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ComposeError::NotFound { .. })
    }

    /// 401 or 403
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ComposeError::AuthenticationFailed { .. } | ComposeError::Forbidden { .. }
        )
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, ComposeError::ServerError { .. })
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ComposeError::RateLimited { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, ComposeError::Conflict { .. })
    }

    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ComposeError::BadRequest { .. })
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ComposeError::RequestFailed(e) if e.is_timeout())
    }

    /// The response body or error text, without the variant prefix
    pub fn message(&self) -> String {
        match self {
            ComposeError::BadRequest { message }
            | ComposeError::AuthenticationFailed { message }
            | ComposeError::Forbidden { message }
            | ComposeError::NotFound { message }
            | ComposeError::RateLimited { message }
            | ComposeError::Conflict { message, .. }
            | ComposeError::ServerError { message, .. }
            | ComposeError::ApiError { message, .. } => message.clone(),
            ComposeError::ConnectionError(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(ComposeError::from_status(400, "bad".into()).is_bad_request());
        assert!(ComposeError::from_status(401, "nope".into()).is_unauthorized());
        assert!(ComposeError::from_status(403, "nope".into()).is_unauthorized());
        assert!(ComposeError::from_status(404, "gone".into()).is_not_found());
        assert!(ComposeError::from_status(409, "dup".into()).is_conflict());
        assert!(ComposeError::from_status(412, "pre".into()).is_conflict());
        assert!(ComposeError::from_status(429, "slow".into()).is_rate_limited());
        assert!(ComposeError::from_status(503, "down".into()).is_server_error());
    }

    #[test]
    fn test_statuses_just_above_accepted_are_generic() {
        let err = ComposeError::from_status(204, String::new());
        assert!(matches!(err, ComposeError::ApiError { code: 204, .. }));
        assert_eq!(err.status_code(), Some(204));
    }

    #[test]
    fn test_message_is_raw_body() {
        let err = ComposeError::from_status(422, r#"{"errors":"invalid units"}"#.into());
        assert_eq!(err.message(), r#"{"errors":"invalid units"}"#);
        assert!(err.to_string().contains("422"));
    }

    #[test]
    fn test_missing_token_message() {
        assert_eq!(
            ComposeError::MissingToken.to_string(),
            "Empty token. Please export $COMPOSE_TOKEN"
        );
        assert_eq!(ComposeError::MissingToken.status_code(), None);
    }
}
