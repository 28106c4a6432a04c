//! Blocking HTTP transport built on `ureq`.

use core::time::Duration;
use std::thread;

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{data_from_envelope, SubgraphClient, SubgraphError};
use crate::config::{ConfigError, SubgraphConfig};
use crate::traits::GraphqlTransport;

/// Delay before the first retry; later retries wait proportionally longer.
const BASE_BACKOFF: Duration = Duration::from_millis(500);

/// Posts GraphQL queries to a subgraph endpoint.
///
/// Retryable failures (see [`SubgraphError::is_retryable`]) are retried up
/// to the configured count with a linearly growing delay.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    endpoint: String,
    retries: u32,
    backoff: Duration,
}

impl UreqTransport {
    /// Builds a transport from validated settings.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `config` does not validate.
    pub fn new(config: &SubgraphConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.timeout())
            .timeout(config.timeout())
            .build();
        Ok(Self {
            agent,
            endpoint: config.endpoint.clone(),
            retries: config.retries,
            backoff: BASE_BACKOFF,
        })
    }

    /// Overrides the base retry delay.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, body: &str) -> Result<Value, SubgraphError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(body)?;
        let text = response
            .into_string()
            .map_err(|err| SubgraphError::Transport(err.to_string()))?;
        data_from_envelope(serde_json::from_str(&text)?)
    }
}

impl GraphqlTransport for UreqTransport {
    fn execute(&self, query: &str, variables: &Value) -> Result<Value, SubgraphError> {
        let body = json!({ "query": query, "variables": variables }).to_string();
        let mut attempt: u32 = 0;
        loop {
            debug!(endpoint = %self.endpoint, attempt, "posting query");
            match self.post(&body) {
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    let delay = self.backoff.saturating_mul(attempt);
                    warn!(error = %err, attempt, retries = self.retries, ?delay, "subgraph request failed, retrying");
                    thread::sleep(delay);
                }
                result => return result,
            }
        }
    }
}

impl SubgraphClient<UreqTransport> {
    /// Client over HTTP with the page size from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`UreqTransport::new`].
    pub fn from_config(config: &SubgraphConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(UreqTransport::new(config)?).with_page_size(config.page_size))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};

    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let config = SubgraphConfig {
            endpoint: String::new(),
            ..SubgraphConfig::default()
        };
        assert!(matches!(UreqTransport::new(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn client_from_config_uses_page_size() {
        let config = SubgraphConfig {
            page_size: 250,
            ..SubgraphConfig::default()
        };
        let Ok(client) = SubgraphClient::from_config(&config) else {
            panic!("expected Ok");
        };
        assert_eq!(client.page_size(), 250);
        assert_eq!(client.transport().endpoint(), config.endpoint);
    }

    // -- Loopback server --------------------------------------------------

    /// Answers one connection per `(status, body)` pair, then stops.
    fn serve(replies: Vec<(&'static str, &'static str)>) -> (String, thread::JoinHandle<()>) {
        let Ok(listener) = TcpListener::bind("127.0.0.1:0") else {
            panic!("bind loopback");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("local address");
        };
        let handle = thread::spawn(move || {
            for (status, body) in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                read_request(&stream);
                let reply = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = (&stream).write_all(reply.as_bytes());
            }
        });
        (format!("http://{addr}/"), handle)
    }

    fn read_request(stream: &TcpStream) {
        let mut reader = BufReader::new(stream);
        let mut length = 0;
        loop {
            let mut line = String::new();
            let Ok(n) = reader.read_line(&mut line) else {
                return;
            };
            if n == 0 || line.trim().is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    length = value.trim().parse().unwrap_or(0);
                }
            }
        }
        let mut body = vec![0; length];
        let _ = reader.read_exact(&mut body);
    }

    fn transport(endpoint: String, retries: u32) -> UreqTransport {
        let config = SubgraphConfig {
            endpoint,
            retries,
            timeout_secs: 5,
            ..SubgraphConfig::default()
        };
        let Ok(transport) = UreqTransport::new(&config) else {
            panic!("expected Ok");
        };
        transport.with_backoff(Duration::ZERO)
    }

    #[test]
    fn returns_data_member() {
        let (endpoint, server) = serve(vec![("200 OK", r#"{"data":{"pool":{"id":"0xabc"}}}"#)]);
        let Ok(data) = transport(endpoint, 0).execute(crate::subgraph::queries::POOL, &json!({})) else {
            panic!("expected Ok");
        };
        assert_eq!(data, json!({"pool": {"id": "0xabc"}}));
        let _ = server.join();
    }

    #[test]
    fn server_error_without_retries_is_retryable_http_error() {
        let (endpoint, server) = serve(vec![("503 Service Unavailable", "busy")]);
        let Err(err) = transport(endpoint, 0).execute(crate::subgraph::queries::POOL, &json!({})) else {
            panic!("expected Err");
        };
        assert!(matches!(err, SubgraphError::Http { status: 503, .. }));
        assert!(err.is_retryable());
        let _ = server.join();
    }

    #[test]
    fn retries_after_server_error() {
        let (endpoint, server) = serve(vec![
            ("503 Service Unavailable", "busy"),
            ("200 OK", r#"{"data":{"ok":true}}"#),
        ]);
        let Ok(data) = transport(endpoint, 1).execute(crate::subgraph::queries::POOL, &json!({})) else {
            panic!("expected Ok after one retry");
        };
        assert_eq!(data, json!({"ok": true}));
        let _ = server.join();
    }
}
