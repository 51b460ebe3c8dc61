//! HTTP request and response values passed between the builder, the
//! interceptor chain and the transport.
//!
//! # Design
//! Requests and responses are plain owned data. Interceptors rewrite an
//! `HttpRequest` by value, and a `Transport` turns it into an `HttpResponse`
//! without interpreting the status; deciding what counts as success is left
//! to `SimpleClient`.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content types the client knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
}

impl MediaType {
    /// Wire value for the `Content-Type` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json; charset=utf-8",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing HTTP request.
///
/// `url` is always absolute with the query string already applied. Headers
/// keep insertion order and may repeat a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Append a header line, keeping any existing lines with the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Replace every line named `name` with a single `name: value` line.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }
}

/// A received HTTP response. `message` is the status reason phrase.
///
/// `body` holds the raw bytes; nothing assumes they are UTF-8 or JSON until
/// the client decodes a 2xx body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub message: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "https://api.example.com/items".to_string(),
            headers: vec![
                ("Accept".to_string(), "text/plain".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ],
            body: None,
        }
    }

    #[test]
    fn json_media_type_wire_value() {
        assert_eq!(MediaType::Json.as_str(), "application/json; charset=utf-8");
        assert_eq!(MediaType::Json.to_string(), MediaType::Json.as_str());
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(request().header("accept"), Some("text/plain"));
        assert_eq!(request().header("missing"), None);
    }

    #[test]
    fn add_header_keeps_duplicates() {
        let mut req = request();
        req.add_header("x-trace", "2");
        let traces: Vec<_> = req
            .headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case("x-trace"))
            .collect();
        assert_eq!(traces.len(), 2);
    }

    #[test]
    fn set_header_overwrites_every_line_with_that_name() {
        let mut req = request();
        req.add_header("x-trace", "2");
        req.set_header("X-TRACE", "3");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.header("x-trace"), Some("3"));
    }

    #[test]
    fn success_is_exactly_2xx() {
        let mut resp = HttpResponse {
            status: 200,
            message: "OK".to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        };
        for (status, ok) in [(199, false), (200, true), (201, true), (299, true), (300, false), (404, false)] {
            resp.status = status;
            assert_eq!(resp.is_success(), ok, "status {status}");
        }
    }
}
