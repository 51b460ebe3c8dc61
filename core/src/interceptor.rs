//! Request interceptors.
//!
//! # Design
//! Interceptors run in the order they were installed on the client. Each one
//! receives the request by value together with a `Chain` holding the stages
//! after it, and calls `Chain::proceed` to pass a (possibly rewritten)
//! request on. The last stage of every chain is the transport, so whatever an
//! interceptor returns is what the caller sees.

use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// A pipeline stage that sees every outgoing request before the transport.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse>;
}

/// The stages remaining after the current interceptor.
pub struct Chain<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    transport: &'a dyn Transport,
}

impl<'a> Chain<'a> {
    pub fn new(interceptors: &'a [Arc<dyn Interceptor>], transport: &'a dyn Transport) -> Self {
        Self {
            interceptors,
            transport,
        }
    }

    /// Hand `request` to the next interceptor, or to the transport once none
    /// are left.
    pub fn proceed(self, request: HttpRequest) -> Result<HttpResponse> {
        match self.interceptors.split_first() {
            Some((next, rest)) => next.intercept(request, Chain::new(rest, self.transport)),
            None => self.transport.execute(&request),
        }
    }
}

/// Sets one fixed header on every request.
///
/// Any header already on the request with the same name is replaced.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    name: String,
    value: String,
}

impl AuthInterceptor {
    pub const API_KEY_HEADER: &'static str = "X-Api-Key";

    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Interceptor sending `value` as `X-Api-Key`.
    pub fn api_key(value: impl Into<String>) -> Self {
        Self::new(Self::API_KEY_HEADER, value)
    }

    pub fn header_name(&self) -> &str {
        &self.name
    }

    pub fn header_value(&self) -> &str {
        &self.value
    }
}

impl Interceptor for AuthInterceptor {
    fn intercept(&self, mut request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse> {
        request.set_header(self.name.as_str(), self.value.as_str());
        chain.proceed(request)
    }
}

/// Logs each request line and its outcome at debug level. Never touches the
/// request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn intercept(&self, request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse> {
        let method = request.method;
        let url = request.url.clone();
        let started = Instant::now();
        log::debug!("--> {method} {url} ({} headers)", request.headers.len());

        let result = chain.proceed(request);
        match &result {
            Ok(response) => log::debug!(
                "<-- {} {} {method} {url} in {:?}",
                response.status,
                response.message,
                started.elapsed()
            ),
            Err(e) => log::debug!("<-- failed {method} {url} in {:?}: {e}", started.elapsed()),
        }
        result
    }
}
