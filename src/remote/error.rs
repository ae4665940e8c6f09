use std::sync::Arc;

use reqwest::StatusCode;

/// Failure of a call to the notes or auth service.
///
/// Sources are held in `Arc` so errors can ride along in UI messages, which
/// must be `Clone`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No response was received: connect failure, timeout, or a body that could not be read.
    #[error("request failed: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    /// A note endpoint answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Remote { status: StatusCode, body: String },

    /// An auth endpoint rejected the request (bad credentials, duplicate user, expired token).
    #[error("authentication failed ({status}): {body}")]
    Auth { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[source] Arc<serde_json::Error>),

    #[error("invalid server URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("title {0:?} would be routed as a note id")]
    AmbiguousTitle(String),
}

impl ApiError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Remote { status, .. } | ApiError::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(Arc::new(e))
    }
}

/// Which family of endpoint produced a response; decides how a rejection is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Auth,
    Notes,
}

/// Pass a 2xx body through, turn anything else into the matching error kind.
pub(crate) fn check_status(
    status: StatusCode,
    body: String,
    endpoint: Endpoint,
) -> Result<String, ApiError> {
    if status.is_success() {
        return Ok(body);
    }
    match endpoint {
        Endpoint::Auth => Err(ApiError::Auth { status, body }),
        Endpoint::Notes => Err(ApiError::Remote { status, body }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_passes_body_through() {
        let body = check_status(StatusCode::CREATED, "{}".into(), Endpoint::Notes).unwrap();
        assert_eq!(body, "{}");
        assert!(check_status(StatusCode::NO_CONTENT, String::new(), Endpoint::Notes).is_ok());
    }

    #[test]
    fn rejection_kind_follows_endpoint() {
        let err = check_status(
            StatusCode::NOT_FOUND,
            r#"{"detail":"Note not found or unauthorized"}"#.into(),
            Endpoint::Notes,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Remote { status, .. } if status == StatusCode::NOT_FOUND));

        let err = check_status(StatusCode::UNAUTHORIZED, String::new(), Endpoint::Auth).unwrap_err();
        assert!(matches!(err, ApiError::Auth { .. }));
        assert!(err.is_unauthorized());
        assert!(!err.is_transport());
    }

    #[test]
    fn decode_errors_keep_their_source() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ApiError::from(parse_err);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.status(), None);
    }
}
