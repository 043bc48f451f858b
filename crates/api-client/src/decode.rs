//! Response classification and decoding
//!
//! Success band is 200..300. Failures are classified first-match-wins:
//! 401 and 404 are decided from the status alone without touching the body;
//! anything else has its body read exactly once and is parsed as the service's
//! structured error envelope, falling back to the raw text. The response is
//! consumed or dropped before returning on every path, which releases the
//! connection back to the pool.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Successful response with the body already read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// URL the request was sent to
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Deserialize the body into the caller's result shape.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            debug!(url = %self.url, error = %e, "response body did not match result shape");
            Error::Decode(e.to_string())
        })
    }
}

/// Wire shape of a structured error body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "errorCode")]
    code: String,
    #[serde(rename = "errorDescription", default)]
    description: Option<String>,
    #[serde(rename = "errorMessage", default)]
    message: Option<String>,
}

pub fn is_success(status: StatusCode) -> bool {
    (200..300).contains(&status.as_u16())
}

/// Classify a raw response into a decoded success or a typed error.
pub async fn decode(url: &str, response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status();
    if is_success(status) {
        let headers = response.headers().clone();
        let body = read_body(url, response).await?;
        return Ok(HttpResponse {
            url: url.to_string(),
            status,
            headers,
            body,
        });
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
        StatusCode::NOT_FOUND => Err(Error::NotFound {
            url: url.to_string(),
        }),
        _ => {
            let body = read_body(url, response).await?;
            Err(parse_error_body(&body))
        }
    }
}

/// Map a non-2xx, non-401/404 body onto `Remote` or `Validation`.
pub fn parse_error_body(body: &str) -> Error {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => Error::Remote {
            code: envelope.code,
            message: envelope
                .message
                .or(envelope.description)
                .unwrap_or_default(),
        },
        Err(e) => {
            info!(error = %e, "failed to load error from response");
            Error::Validation(body.to_string())
        }
    }
}

async fn read_body(url: &str, response: reqwest::Response) -> Result<String> {
    let bytes = response.bytes().await.map_err(|e| {
        info!(url, error = %e, "failed reading response body");
        Error::Transport(format!("reading response body: {e}"))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
