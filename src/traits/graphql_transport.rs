//! Transport seam between the subgraph client and the network.
//!
//! [`GraphqlTransport`] is the only thing
//! [`SubgraphClient`](crate::subgraph::SubgraphClient) needs from the
//! outside world: run one GraphQL query and hand back its `data` object.
//! The blocking HTTP implementation is
//! [`UreqTransport`](crate::subgraph::UreqTransport) (feature `subgraph`);
//! tests plug in canned JSON instead.
//!
//! # Contract
//!
//! - `variables` is a JSON object whose keys match the query's `$`
//!   parameters.
//! - On success the returned value is the response's `data` member, not
//!   the whole envelope.
//! - A response carrying a non-empty `errors` array is a failure
//!   ([`SubgraphError::Graphql`]) even if `data` is also present.
//! - Retrying is the transport's business; the client issues each query
//!   once.

use serde_json::Value;

use crate::subgraph::SubgraphError;

/// Executes GraphQL queries against a subgraph endpoint.
///
/// # Errors
///
/// Implementations return [`SubgraphError::Transport`] or
/// [`SubgraphError::Http`] for delivery failures and
/// [`SubgraphError::Graphql`] for errors reported by the server.
pub trait GraphqlTransport {
    /// Runs `query` with `variables` and returns the `data` object.
    fn execute(&self, query: &str, variables: &Value) -> Result<Value, SubgraphError>;
}

impl<T: GraphqlTransport + ?Sized> GraphqlTransport for &T {
    fn execute(&self, query: &str, variables: &Value) -> Result<Value, SubgraphError> {
        (**self).execute(query, variables)
    }
}

impl<T: GraphqlTransport + ?Sized> GraphqlTransport for Box<T> {
    fn execute(&self, query: &str, variables: &Value) -> Result<Value, SubgraphError> {
        (**self).execute(query, variables)
    }
}
