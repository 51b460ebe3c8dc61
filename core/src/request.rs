//! Builds `HttpRequest` values from a URL, the optional per-call arguments
//! and, for POST, a body value.
//!
//! # Design
//! `RequestOptions` collects the optional arguments. Leaving a field empty is
//! the same as not passing it: `RequestOptions::default()` means no single
//! header, no header list and no query parameters.
//!
//! Query parameters live in a map, so setting a key twice keeps the last
//! value. Header lines live in a list, so repeated names are all sent.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use crate::codec::JsonCodec;
use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, MediaType};

/// Optional arguments shared by every GET and POST call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub header: Option<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub params: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the single leading header. Calling it again replaces the pair.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header = Some((name.into(), value.into()));
        self
    }

    /// Append header lines. Every entry becomes its own line.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Build a GET request for `url`.
pub fn build_get(url: &str, options: &RequestOptions) -> Result<HttpRequest> {
    Ok(HttpRequest {
        method: HttpMethod::Get,
        url: build_url(url, &options.params)?.into(),
        headers: build_headers(options),
        body: None,
    })
}

/// Build a POST request for `url` carrying `body` encoded as JSON.
pub fn build_post<V: Serialize + ?Sized>(
    url: &str,
    options: &RequestOptions,
    body: &V,
    codec: &JsonCodec,
) -> Result<HttpRequest> {
    let url = build_url(url, &options.params)?;
    let body = codec.encode(body)?;
    let mut request = HttpRequest {
        method: HttpMethod::Post,
        url: url.into(),
        headers: build_headers(options),
        body: Some(body),
    };
    request.set_header("Content-Type", MediaType::Json.as_str());
    Ok(request)
}

fn build_url(raw: &str, params: &BTreeMap<String, String>) -> Result<Url> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(url)
}

fn build_headers(options: &RequestOptions) -> Vec<(String, String)> {
    options
        .header
        .iter()
        .chain(options.headers.iter())
        .cloned()
        .collect()
}
