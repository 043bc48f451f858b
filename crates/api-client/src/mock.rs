//! Recording transport double
//!
//! Records every request it receives and answers with a programmable reply.
//! Tracks how many sends are in flight at once so tests can check the
//! client's connection bound. Compiled for this crate's tests and, through the
//! `test-util` feature, for downstream test suites; no production path uses it.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::error::{Error, Result};
use crate::transport::{BoxFuture, Transport};

/// What the double saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    fn from_request(request: &reqwest::Request) -> Self {
        Self {
            method: request.method().clone(),
            url: request.url().to_string(),
            headers: request.headers().clone(),
            body: request
                .body()
                .and_then(|b| b.as_bytes())
                .map(|b| b.to_vec()),
        }
    }

    /// Body parsed as JSON, if any.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Canned reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response { status: u16, body: String },
    Failure(Error),
    /// Never completes; exercises the client's timeout.
    Hang,
}

impl MockReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        MockReply::Response {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        MockReply::Response {
            status,
            body: value.to_string(),
        }
    }

    pub fn ok_empty() -> Self {
        MockReply::status(200, "{}")
    }
}

type Responder = Box<dyn Fn(&RecordedRequest) -> MockReply + Send + Sync>;

pub struct MockTransport {
    responder: Responder,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&RecordedRequest) -> MockReply + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            delay: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Answer every request with the same reply.
    pub fn always(reply: MockReply) -> Self {
        Self::new(move |_| reply.clone())
    }

    /// Hold each send for `delay` before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    /// Highest number of concurrent sends observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn send(&self, request: reqwest::Request) -> BoxFuture<'_, Result<reqwest::Response>> {
        let recorded = RecordedRequest::from_request(&request);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(recorded.clone());

        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            let _guard = InFlight(&self.in_flight);
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            match (self.responder)(&recorded) {
                MockReply::Response { status, body } => http::Response::builder()
                    .status(status)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
                    .map(reqwest::Response::from)
                    .map_err(|e| Error::Transport(format!("mock response: {e}"))),
                MockReply::Failure(err) => Err(err),
                MockReply::Hang => std::future::pending().await,
            }
        })
    }
}
