//! Errors of the subgraph adapter.

use thiserror::Error;

use crate::error::DomainError;

/// Failure to fetch or interpret subgraph data.
///
/// Unlike [`DomainError`], some of these are transient:
/// [`SubgraphError::is_retryable`] tells them apart.
#[derive(Debug, Error)]
pub enum SubgraphError {
    /// The request never produced an HTTP response (DNS, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("http status {status}: {message}")]
    Http { status: u16, message: String },

    /// The server reported GraphQL errors.
    #[error("graphql errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// The queried pool or position does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A numeric field did not parse.
    #[error("cannot parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },

    /// The response JSON did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response envelope lacked a required member.
    #[error("malformed response: {0}")]
    Malformed(&'static str),

    /// A parsed value was rejected by the engine.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SubgraphError {
    /// Returns `true` for failures worth retrying: transport errors,
    /// rate limiting and server-side HTTP errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(feature = "subgraph")]
impl From<ureq::Error> for SubgraphError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => Self::Http {
                status,
                message: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}
