//! Typed errors for the catalog API client.

use thiserror::Error;

/// Failure modes surfaced by API calls.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message from the response body, or a generic fallback.
        message: String,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the failure means the session token is missing or rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status: 401 | 403,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn display_prefers_the_server_message() {
        let err = ApiError::Api {
            status: 422,
            message: "price must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn unauthorized_covers_both_auth_statuses() {
        let unauthorized = ApiError::Api {
            status: 401,
            message: "expired".to_string(),
        };
        let forbidden = ApiError::Api {
            status: 403,
            message: "nope".to_string(),
        };
        let transport = ApiError::Transport("offline".to_string());
        assert!(unauthorized.is_unauthorized());
        assert!(forbidden.is_unauthorized());
        assert!(!transport.is_unauthorized());
        assert_eq!(transport.status(), None);
    }
}
