use bytes::Bytes;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::types::CustomerId;

/// Errors the rest of the application branches on
///
/// Every failed remote call ends up as exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The remote service has no customer with this id
    #[error("customer [id={0}] is not found")]
    CustomerNotFound(CustomerId),

    /// The remote service rejected the trade
    #[error("invalid trade request: {0}")]
    InvalidTradeRequest(String),

    /// The remote service failed or could not be reached
    #[error("customer service fault: {0}")]
    RemoteServiceFault(String),
}

/// Errors raised while constructing a client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Base URL cannot have request paths appended to it
    #[error("invalid base URL {0}: it cannot be used as a base")]
    InvalidBaseUrl(Url),

    /// Underlying HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Transport failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NotFound,
    BadRequest,
    InternalServerError,
    Other,
}

/// Failure reported by the HTTP layer, before interpretation
///
/// `message` is the raw transport text: a status line such as
/// `404 Not Found from GET http://host/customers/42`, or the connection
/// error. `body` is `None` when the response had no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    NotFound {
        message: String,
        body: Option<Bytes>,
    },
    BadRequest {
        message: String,
        body: Option<Bytes>,
    },
    InternalServerError {
        message: String,
        body: Option<Bytes>,
    },
    /// Any other status, or no response at all when `status` is `None`
    Other {
        status: Option<StatusCode>,
        message: String,
        body: Option<Bytes>,
    },
}

impl RemoteFailure {
    /// Build a failure from a non-success HTTP response
    pub fn from_response(method: &Method, url: &Url, status: StatusCode, body: Bytes) -> Self {
        let message = format!("{status} from {method} {url}");
        let body = (!body.is_empty()).then_some(body);

        match status {
            StatusCode::NOT_FOUND => Self::NotFound { message, body },
            StatusCode::BAD_REQUEST => Self::BadRequest { message, body },
            StatusCode::INTERNAL_SERVER_ERROR => Self::InternalServerError { message, body },
            status => Self::Other {
                status: Some(status),
                message,
                body,
            },
        }
    }

    /// Build a failure from an error raised before a usable response arrived
    ///
    /// Covers connection errors, timeouts and undecodable success bodies.
    pub fn from_transport(error: &reqwest::Error) -> Self {
        Self::Other {
            status: error.status(),
            message: error.to_string(),
            body: None,
        }
    }

    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::BadRequest { .. } => FailureKind::BadRequest,
            Self::InternalServerError { .. } => FailureKind::InternalServerError,
            Self::Other { .. } => FailureKind::Other,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            Self::InternalServerError { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Other { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::BadRequest { message, .. }
            | Self::InternalServerError { message, .. }
            | Self::Other { message, .. } => message,
        }
    }

    pub const fn body(&self) -> Option<&Bytes> {
        match self {
            Self::NotFound { body, .. }
            | Self::BadRequest { body, .. }
            | Self::InternalServerError { body, .. }
            | Self::Other { body, .. } => body.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16, body: &'static str) -> RemoteFailure {
        RemoteFailure::from_response(
            &Method::POST,
            &Url::parse("http://localhost:6060/customers/7/trade").unwrap(),
            StatusCode::from_u16(status).unwrap(),
            Bytes::from_static(body.as_bytes()),
        )
    }

    #[test]
    fn status_selects_variant() {
        assert_eq!(failure(404, "").kind(), FailureKind::NotFound);
        assert_eq!(failure(400, "").kind(), FailureKind::BadRequest);
        assert_eq!(failure(500, "").kind(), FailureKind::InternalServerError);
        assert_eq!(failure(503, "").kind(), FailureKind::Other);
        assert_eq!(failure(422, "").status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[test]
    fn message_reads_like_a_status_line() {
        let failure = failure(400, "{}");

        assert_eq!(
            failure.message(),
            "400 Bad Request from POST http://localhost:6060/customers/7/trade"
        );
    }

    #[test]
    fn empty_body_is_absent() {
        assert!(failure(404, "").body().is_none());
        assert_eq!(failure(400, "oops").body().map(|b| &b[..]), Some(b"oops".as_slice()));
    }

    #[test]
    fn domain_error_messages() {
        assert_eq!(
            DomainError::CustomerNotFound(CustomerId(42)).to_string(),
            "customer [id=42] is not found"
        );
        assert_eq!(
            DomainError::InvalidTradeRequest("insufficient funds".to_owned()).to_string(),
            "invalid trade request: insufficient funds"
        );
    }
}
