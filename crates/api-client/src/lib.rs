//! Authenticated HTTP dispatch for the identity service
//!
//! Every API call flows through `Client::do_request`: URL composition, header
//! and cookie merging, credential attachment, send through the pooled
//! transport, then classification of the response into a typed `Error` or a
//! decoded body. There are no retries at this layer; one call is one attempt
//! and one deterministic classification.
//!
//! Request flow:
//! 1. Caller (usually a management façade) picks a path from `Routes`
//! 2. `Client::do_post` / `do_get` serialize the body and default headers
//! 3. `Client::do_request` attaches the project credential and sends through `Transport`
//! 4. `decode::decode` maps 401/404/error envelopes/raw bodies onto `Error`
//! 5. `HttpResponse::bind` deserializes successful bodies into the caller's type

pub mod client;
pub mod decode;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod options;
pub mod routes;
pub mod transport;

pub use client::{Client, ClientParams, DEFAULT_BASE_URL, DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEOUT};
pub use decode::HttpResponse;
pub use error::{Error, Result};
pub use options::{Cookie, RequestOptions};
pub use reqwest::Method;
pub use routes::Routes;
pub use transport::{BoxFuture, ReqwestTransport, Transport};
