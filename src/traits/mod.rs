//! Trait seams of the crate.
//!
//! The engine itself is free functions over value types and needs no
//! traits. The one abstraction is at the I/O boundary: [`GraphqlTransport`]
//! decouples the subgraph client from HTTP.

mod graphql_transport;

pub use graphql_transport::GraphqlTransport;
