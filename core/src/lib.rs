//! Small JSON-over-HTTP client with blocking and callback-based GET/POST.
//!
//! # Overview
//! `SimpleClient` builds a request from a URL and `RequestOptions`, passes it
//! through the installed interceptors into a transport (ureq by default),
//! and decodes a 2xx JSON body into any `serde` type the caller names.
//!
//! ```no_run
//! use serde::Deserialize;
//! use simple_client::{AuthInterceptor, RequestOptions, SimpleClient};
//!
//! #[derive(Debug, Deserialize)]
//! struct ItemList {
//!     items: Vec<serde_json::Value>,
//! }
//!
//! let client = SimpleClient::builder()
//!     .interceptor(AuthInterceptor::api_key("secret123"))
//!     .build()?;
//! let options = RequestOptions::new().param("limit", "10");
//!
//! let list: ItemList = client.get("https://api.example.com/items", &options)?;
//! println!("{list:?}");
//!
//! client.get_async(
//!     "https://api.example.com/items",
//!     &options,
//!     |outcome: simple_client::Result<ItemList>| match outcome {
//!         Ok(list) => println!("{} items", list.items.len()),
//!         Err(e) => eprintln!("{e}"),
//!     },
//! );
//! # Ok::<(), simple_client::ClientError>(())
//! ```
//!
//! # Design
//! - Blocking calls return `Result<T, ClientError>`; `get_or_none` and
//!   `post_or_none` trade the error for `None` when callers only care
//!   whether a value came back.
//! - Asynchronous calls run on the client's worker pool and report through
//!   a `ResponseCallback`, exactly once.
//! - Transports return non-2xx responses as data; status handling lives in
//!   the client.

pub mod callback;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod request;
pub mod transport;
mod worker;

pub use callback::ResponseCallback;
pub use client::{SimpleClient, SimpleClientBuilder};
pub use codec::JsonCodec;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, MediaType};
pub use interceptor::{AuthInterceptor, Chain, Interceptor, LoggingInterceptor};
pub use request::{build_get, build_post, RequestOptions};
pub use transport::{Transport, UreqTransport};
