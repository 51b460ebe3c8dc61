//! The client facade: GET and POST, blocking or on a worker thread.
//!
//! # Design
//! `SimpleClient` is a cheap handle around one shared `Inner` holding the
//! transport, the interceptor list, the JSON codec and the worker pool. All
//! of it is fixed at `build()` time, so handles can be cloned and used from
//! any thread without locking.
//!
//! Every call goes through the same three steps: build an `HttpRequest`,
//! run it through the interceptor chain into the transport, then decode a 2xx
//! body into the caller's type. The blocking variants return the outcome,
//! the `_async` variants hand it to a `ResponseCallback` on a pool thread,
//! and the `_or_none` variants log it and return `None` on any failure.
//!
//! Asynchronous jobs hold a reference to `Inner`, so the pool outlives every
//! job it has accepted even if the caller drops its last handle.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::{de::DeserializeOwned, Serialize};

use crate::callback::{deliver, ResponseCallback};
use crate::codec::JsonCodec;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::interceptor::{Chain, Interceptor};
use crate::request::{build_get, build_post, RequestOptions};
use crate::transport::{Transport, UreqTransport};
use crate::worker::WorkerPool;

static GLOBAL: OnceLock<SimpleClient> = OnceLock::new();
static GLOBAL_INIT: Mutex<()> = Mutex::new(());

/// JSON-over-HTTP client with blocking and callback-based entry points.
#[derive(Clone)]
pub struct SimpleClient {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Box<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    codec: JsonCodec,
    pool: WorkerPool,
}

/// Configures and builds a `SimpleClient`.
pub struct SimpleClientBuilder {
    config: ClientConfig,
    interceptors: Vec<Arc<dyn Interceptor>>,
    transport: Option<Box<dyn Transport>>,
}

impl SimpleClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a stage after the ones already installed.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Replace the default ureq transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn build(self) -> Result<SimpleClient> {
        self.config.validate()?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(UreqTransport::new(&self.config)),
        };
        let pool = WorkerPool::new(self.config.max_in_flight)?;
        log::debug!(
            "simple client ready: {} interceptors, call timeout {:?}, read timeout {:?}",
            self.interceptors.len(),
            self.config.call_timeout,
            self.config.read_timeout
        );
        Ok(SimpleClient {
            inner: Arc::new(Inner {
                transport,
                interceptors: self.interceptors,
                codec: JsonCodec::new(),
                pool,
            }),
        })
    }
}

impl SimpleClient {
    /// Client with the default configuration and no interceptors.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Client configured from `SIMPLE_CLIENT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::builder().config(ClientConfig::from_env()?).build()
    }

    pub fn builder() -> SimpleClientBuilder {
        SimpleClientBuilder {
            config: ClientConfig::default(),
            interceptors: Vec::new(),
            transport: None,
        }
    }

    /// The process-wide client, created with `SimpleClient::new` on first use.
    pub fn global() -> Result<&'static SimpleClient> {
        Self::global_or_init(Self::new)
    }

    /// The process-wide client, created with `init` on first use.
    ///
    /// Concurrent first callers are serialized, so `init` runs at most once
    /// per successful initialization. Once a client is installed, later
    /// `init` functions are ignored. A failed `init` leaves the slot empty.
    pub fn global_or_init<F>(init: F) -> Result<&'static SimpleClient>
    where
        F: FnOnce() -> Result<SimpleClient>,
    {
        if let Some(client) = GLOBAL.get() {
            return Ok(client);
        }
        let _guard = GLOBAL_INIT.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = GLOBAL.get() {
            return Ok(client);
        }
        let client = init()?;
        Ok(GLOBAL.get_or_init(|| client))
    }

    /// Blocking GET decoding a 2xx body as `T`.
    pub fn get<T: DeserializeOwned>(&self, url: &str, options: &RequestOptions) -> Result<T> {
        let request = build_get(url, options)?;
        self.inner.call(request)
    }

    /// Blocking POST of `body` as JSON, decoding a 2xx body as `T`.
    pub fn post<T, V>(&self, url: &str, options: &RequestOptions, body: &V) -> Result<T>
    where
        T: DeserializeOwned,
        V: Serialize + ?Sized,
    {
        let request = build_post(url, options, body, &self.inner.codec)?;
        self.inner.call(request)
    }

    /// Like `get`, but every failure is logged and becomes `None`.
    pub fn get_or_none<T: DeserializeOwned>(&self, url: &str, options: &RequestOptions) -> Option<T> {
        swallow("GET", url, self.get(url, options))
    }

    /// Like `post`, but every failure is logged and becomes `None`.
    pub fn post_or_none<T, V>(&self, url: &str, options: &RequestOptions, body: &V) -> Option<T>
    where
        T: DeserializeOwned,
        V: Serialize + ?Sized,
    {
        swallow("POST", url, self.post(url, options, body))
    }

    /// GET on a worker thread. `callback` is told the outcome exactly once,
    /// on that worker thread, including when `url` is malformed.
    pub fn get_async<T, C>(&self, url: &str, options: &RequestOptions, callback: C)
    where
        T: DeserializeOwned + Send + 'static,
        C: ResponseCallback<T>,
    {
        self.submit(build_get(url, options), callback);
    }

    /// POST on a worker thread. `body` is encoded before this returns; an
    /// encoding failure is reported through `callback` like any other.
    pub fn post_async<T, V, C>(&self, url: &str, options: &RequestOptions, body: &V, callback: C)
    where
        T: DeserializeOwned + Send + 'static,
        V: Serialize + ?Sized,
        C: ResponseCallback<T>,
    {
        self.submit(build_post(url, options, body, &self.inner.codec), callback);
    }

    fn submit<T, C>(&self, request: Result<HttpRequest>, callback: C)
    where
        T: DeserializeOwned + Send + 'static,
        C: ResponseCallback<T>,
    {
        let inner = Arc::clone(&self.inner);
        self.inner.pool.submit(move || {
            let outcome: Result<T> = request.and_then(|request| inner.call(request));
            deliver(callback, outcome);
        });
    }
}

impl Inner {
    fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = Chain::new(&self.interceptors, self.transport.as_ref()).proceed(request)?;
        check_status(&response)?;
        self.codec.decode(&response.body)
    }
}

impl fmt::Debug for SimpleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleClient")
            .field("interceptors", &self.inner.interceptors.len())
            .finish_non_exhaustive()
    }
}

/// Map a status outside 2xx to `ClientError::Response`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ClientError::Response {
        code: response.status,
        message: response.message.clone(),
    })
}

fn swallow<T>(method: &str, url: &str, outcome: Result<T>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{method} {url} failed, returning nothing: {e}");
            None
        }
    }
}
