//! The stage that actually puts a request on the wire.
//!
//! `Transport` is the seam between the client and an HTTP library.
//! `UreqTransport` is the one the client ships with; tests plug in fakes.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns whatever the server answered.
///
/// A non-2xx status is a successful round trip and must come back as an
/// `HttpResponse`; `Err` is reserved for failures below HTTP (connect, DNS,
/// timeout, broken body stream).
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    max_body_size: u64,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.call_timeout))
            .timeout_recv_response(Some(config.read_timeout))
            .timeout_recv_body(Some(config.read_timeout))
            .build()
            .new_agent();
        Self {
            agent,
            max_body_size: config.max_body_size,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                let body = request.body.as_deref().unwrap_or_default();
                builder.send(body.as_bytes())
            }
        };
        let mut response = result.map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = match response
            .body_mut()
            .with_config()
            .limit(self.max_body_size)
            .read_to_vec()
        {
            Ok(body) => body,
            // The status alone decides a non-2xx outcome, so an error page we
            // cannot read must not turn it into a transport failure.
            Err(e) if !status.is_success() => {
                log::debug!("dropping unreadable {status} body from {}: {e}", request.url);
                Vec::new()
            }
            Err(e) => return Err(ClientError::Transport(format!("reading response body: {e}"))),
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            message: status_message(status),
            headers,
            body,
        })
    }
}

/// Reason phrase for `status`, or `HTTP <code>` when it has none.
fn status_message(status: ureq::http::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {}", status.as_u16()),
    }
}
