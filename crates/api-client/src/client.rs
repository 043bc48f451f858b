//! Transport client: the single chokepoint every API call flows through
//!
//! Owns the transport, default headers, the route table, and the project
//! identifier. Immutable after construction; share it behind an `Arc`.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::decode::{self, HttpResponse};
use crate::error::{Error, Result};
use crate::options::{Cookie, RequestOptions};
use crate::routes::Routes;
use crate::transport::{ReqwestTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.descope.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONNECTIONS: usize = 100;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Construction parameters for `Client`.
pub struct ClientParams {
    pub project_id: String,
    /// Defaults to `DEFAULT_BASE_URL`
    pub base_url: Option<String>,
    pub default_headers: Vec<(String, String)>,
    /// Overall bound on one call, including the wait for a connection slot
    pub timeout: Duration,
    /// Concurrent requests allowed through this client
    pub max_connections: usize,
    pub max_idle_per_host: usize,
    /// Replaces the pooled reqwest transport (test doubles)
    pub transport: Option<Arc<dyn Transport>>,
    pub routes: Routes,
}

impl ClientParams {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            base_url: None,
            default_headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_idle_per_host: DEFAULT_MAX_CONNECTIONS,
            transport: None,
            routes: Routes::default(),
        }
    }

    /// Parameters from a loaded `SdkConfig`.
    pub fn from_config(config: &common::SdkConfig) -> Self {
        Self {
            project_id: config.client.project_id.clone(),
            base_url: Some(config.client.base_url.clone()),
            default_headers: config
                .headers
                .iter()
                .map(|h| (h.name.clone(), h.value.clone()))
                .collect(),
            timeout: Duration::from_secs(config.client.timeout_secs),
            max_connections: config.client.max_connections,
            max_idle_per_host: config.client.max_idle_per_host,
            transport: None,
            routes: Routes::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: String,
    headers: HeaderMap,
    project_id: String,
    routes: Routes,
    timeout: Duration,
    limiter: Semaphore,
}

impl Client {
    pub fn new(params: ClientParams) -> Result<Self> {
        if params.project_id.trim().is_empty() {
            return Err(Error::invalid_argument("project_id"));
        }
        if params.max_connections == 0 {
            return Err(Error::invalid_argument("max_connections"));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &params.default_headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let transport = match params.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                params.timeout,
                params.max_idle_per_host,
            )?),
        };

        let base_url = params
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        debug!(
            base_url = %base_url,
            max_connections = params.max_connections,
            timeout_ms = params.timeout.as_millis() as u64,
            "created api client"
        );

        Ok(Self {
            transport,
            base_url,
            headers,
            project_id: params.project_id,
            routes: params.routes,
            timeout: params.timeout,
            limiter: Semaphore::new(params.max_connections),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub async fn do_get(&self, path: &str, options: &RequestOptions) -> Result<HttpResponse> {
        self.do_request(Method::GET, path, None, options).await
    }

    /// POST with a JSON body. Defaults `Content-Type` to `application/json`
    /// unless the caller set one.
    pub async fn do_post<B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<HttpResponse>
    where
        B: Serialize + ?Sized,
    {
        let mut options = options.clone();
        if !options.has_header(CONTENT_TYPE.as_str()) {
            options
                .headers
                .push((CONTENT_TYPE.as_str().to_string(), JSON_MEDIA_TYPE.to_string()));
        }

        let payload = match body {
            Some(body) => Some(serde_json::to_vec(body).map_err(|e| {
                Error::Validation(format!("serializing request body: {e}"))
            })?),
            None => None,
        };

        self.do_request(Method::POST, path, payload, &options).await
    }

    /// GET and bind the body into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.do_get(path, options).await?.bind()
    }

    /// POST and bind the body into `T`.
    pub async fn post_json<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.do_post(path, body, options).await?.bind()
    }

    /// Build, authenticate, send and classify one request. Never retries.
    pub async fn do_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<HttpResponse> {
        let url = self.compose_url(path, options)?;
        let timeout = options.timeout.unwrap_or(self.timeout);
        let request = self.build_request(method, url, body, options, timeout)?;
        let url = request.url().to_string();

        debug!(url = %url, "sending request");

        let exchange = async {
            // Held until the body is read, i.e. for the life of the connection use
            let _permit = self
                .limiter
                .acquire()
                .await
                .map_err(|e| Error::Transport(format!("connection limiter closed: {e}")))?;
            let response = self.transport.send(request).await.inspect_err(|e| {
                info!(url = %url, error = %e, "failed sending request");
            })?;
            decode::decode(&url, response).await
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => {
                debug!(url = %url, error = %err, "request failed");
                Err(err)
            }
            Err(_) => {
                info!(url = %url, timeout_ms = timeout.as_millis() as u64, "request timed out");
                Err(Error::Transport(format!(
                    "request to [{url}] timed out after {}ms",
                    timeout.as_millis()
                )))
            }
        }
    }

    /// `{base}/{path}` with one leading slash trimmed from the path, plus any
    /// per-call query pairs.
    fn compose_url(&self, path: &str, options: &RequestOptions) -> Result<Url> {
        let base = options
            .base_url
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(|b| b.trim_end_matches('/'))
            .unwrap_or(&self.base_url);
        let path = path.strip_prefix('/').unwrap_or(path);

        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|e| Error::Validation(format!("invalid request url: {e}")))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&options.query);
        }
        Ok(url)
    }

    fn build_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
        timeout: Duration,
    ) -> Result<reqwest::Request> {
        let mut headers = self.headers.clone();
        for (name, value) in &options.headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        if !options.cookies.is_empty() {
            let joined = options
                .cookies
                .iter()
                .map(cookie_pair)
                .collect::<Result<Vec<_>>>()?
                .join("; ");
            let merged = match headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
                Some(existing) => format!("{existing}; {joined}"),
                None => joined,
            };
            let value = HeaderValue::from_str(&merged)
                .map_err(|e| Error::Validation(format!("invalid cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        // The project credential always wins over any caller-supplied header
        headers.insert(AUTHORIZATION, self.credential(options)?);

        let mut request = reqwest::Request::new(method, url);
        *request.headers_mut() = headers;
        *request.timeout_mut() = Some(timeout);
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        Ok(request)
    }

    /// Basic `project_id:` for plain calls, `Bearer project_id:key` when a
    /// management key is supplied.
    fn credential(&self, options: &RequestOptions) -> Result<HeaderValue> {
        let raw = match options.management_key.as_ref().filter(|k| !k.is_empty()) {
            Some(key) => format!("Bearer {}:{}", self.project_id, key.expose()),
            None => format!(
                "Basic {}",
                STANDARD.encode(format!("{}:", self.project_id))
            ),
        };
        let mut value = HeaderValue::from_str(&raw)
            .map_err(|e| Error::Validation(format!("invalid credential: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// `name=value` for one cookie. The name must be an HTTP token and the value
/// cookie-octets only (RFC 6265 §4.1.1), so one cookie can never smuggle in
/// another.
fn cookie_pair(cookie: &Cookie) -> Result<String> {
    let is_tchar = |b: u8| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b);
    let is_octet = |b: u8| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E);

    if cookie.name.is_empty() || !cookie.name.bytes().all(is_tchar) {
        return Err(Error::Validation(format!(
            "invalid cookie name {:?}",
            cookie.name
        )));
    }
    if !cookie.value.bytes().all(is_octet) {
        return Err(Error::Validation(format!(
            "invalid value for cookie {}",
            cookie.name
        )));
    }
    Ok(format!("{}={}", cookie.name, cookie.value))
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_str(name)
        .map_err(|e| Error::Validation(format!("invalid header name {name:?}: {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::Validation(format!("invalid header value for {name}: {e}")))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockReply, MockTransport};
    use common::Secret;
    use serde_json::json;

    const BASE: &str = "https://api.example.test";
    const PROJECT: &str = "P2abc";

    fn client_with(mock: Arc<MockTransport>) -> Client {
        Client::new(
            ClientParams::new(PROJECT)
                .with_base_url(BASE)
                .with_header("x-sdk-name", "rust")
                .with_transport(mock),
        )
        .unwrap()
    }

    fn basic_credential() -> String {
        format!("Basic {}", STANDARD.encode(format!("{PROJECT}:")))
    }

    #[tokio::test]
    async fn every_verb_carries_project_credential() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());
        let options = RequestOptions::new();

        client.do_get("/v1/keys/P2abc", &options).await.unwrap();
        client
            .do_post("v1/auth/signin/otp", Some(&json!({"loginId": "a"})), &options)
            .await
            .unwrap();
        client
            .do_request(Method::DELETE, "/v1/anything", None, &options)
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        for request in requests {
            assert_eq!(
                request.header("authorization"),
                Some(basic_credential().as_str()),
                "missing credential on {} {}",
                request.method,
                request.url
            );
        }
    }

    #[tokio::test]
    async fn management_key_switches_to_bearer() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());
        let options = RequestOptions::new().with_management_key(Secret::from("mgmt-key"));

        client.do_get("/v1/mgmt/role/all", &options).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.header("authorization"),
            Some("Bearer P2abc:mgmt-key")
        );
    }

    #[tokio::test]
    async fn caller_cannot_replace_credential() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());
        let options = RequestOptions::new().with_header("Authorization", "Bearer forged");

        client.do_get("/v1/keys", &options).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.header("authorization"),
            Some(basic_credential().as_str())
        );
    }

    #[tokio::test]
    async fn per_call_headers_merge_over_defaults() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = Client::new(
            ClientParams::new(PROJECT)
                .with_base_url(BASE)
                .with_header("x-sdk-name", "rust")
                .with_header("x-sdk-version", "0.1.0")
                .with_transport(mock.clone()),
        )
        .unwrap();
        let options = RequestOptions::new()
            .with_header("X-SDK-Version", "override")
            .with_header("x-trace", "t1");

        client.do_get("/v1/keys", &options).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.header("x-sdk-name"), Some("rust"));
        assert_eq!(request.header("x-sdk-version"), Some("override"));
        assert_eq!(request.header("x-trace"), Some("t1"));
    }

    #[tokio::test]
    async fn post_defaults_json_content_type() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());

        client
            .do_post("/v1/mgmt/role/create", Some(&json!({"name": "admin"})), &RequestOptions::new())
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.json(), Some(json!({"name": "admin"})));
    }

    #[tokio::test]
    async fn post_keeps_caller_content_type_and_allows_no_body() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());
        let options = RequestOptions::new().with_header("Content-Type", "text/plain");

        client
            .do_post::<serde_json::Value>("/v1/logoutall", None, &options)
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn url_composition_trims_one_leading_slash() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());

        client.do_get("/v1/keys/P2abc", &RequestOptions::new()).await.unwrap();
        client
            .do_get(
                "v1/mgmt/user",
                &RequestOptions::new()
                    .with_base_url("https://eu.example.test/")
                    .with_query("loginId", "a b@c.d"),
            )
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].url, "https://api.example.test/v1/keys/P2abc");
        assert_eq!(
            requests[1].url,
            "https://eu.example.test/v1/mgmt/user?loginId=a+b%40c.d"
        );
    }

    #[tokio::test]
    async fn cookies_are_attached() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());
        let options = RequestOptions::new()
            .with_cookie(Cookie::new("DS", "session-jwt"))
            .with_cookie(Cookie::new("DSR", "refresh-jwt"));

        client.do_post::<()>("/v1/refresh", None, &options).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.header("cookie"),
            Some("DS=session-jwt; DSR=refresh-jwt")
        );
    }

    #[tokio::test]
    async fn cookie_cannot_inject_another_cookie() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());

        let forged = RequestOptions::new().with_cookie(Cookie::new("DS", "session; DSR=forged"));
        let err = client
            .do_post::<()>("/v1/refresh", None, &forged)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("cookie DS")));

        let bad_name = RequestOptions::new().with_cookie(Cookie::new("D S", "v"));
        assert!(matches!(
            client.do_get("/v1/keys", &bad_name).await,
            Err(Error::Validation(_))
        ));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn empty_per_call_base_url_falls_back_to_default() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());

        client
            .do_get("/v1/keys", &RequestOptions::new().with_base_url(""))
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            format!("{BASE}/v1/keys")
        );
    }

    #[tokio::test]
    async fn status_classification() {
        let mock = Arc::new(MockTransport::new(|request| {
            if request.url.ends_with("/unauthorized") {
                MockReply::status(401, r#"{"errorCode":"E1"}"#)
            } else if request.url.ends_with("/missing") {
                MockReply::status(404, "")
            } else if request.url.ends_with("/structured") {
                MockReply::json(
                    400,
                    &json!({"errorCode": "E011003", "errorMessage": "name is required"}),
                )
            } else {
                MockReply::status(502, "bad gateway")
            }
        }));
        let client = client_with(mock);
        let options = RequestOptions::new();

        assert_eq!(
            client.do_get("/unauthorized", &options).await.unwrap_err(),
            Error::Unauthorized
        );
        assert_eq!(
            client.do_get("/missing", &options).await.unwrap_err(),
            Error::NotFound {
                url: format!("{BASE}/missing")
            }
        );
        assert_eq!(
            client.do_get("/structured", &options).await.unwrap_err(),
            Error::Remote {
                code: "E011003".into(),
                message: "name is required".into()
            }
        );
        assert_eq!(
            client.do_get("/raw", &options).await.unwrap_err(),
            Error::Validation("bad gateway".into())
        );
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let mock = Arc::new(MockTransport::always(MockReply::Failure(Error::Transport(
            "connection reset".into(),
        ))));
        let client = client_with(mock.clone());

        let err = client
            .do_get("/v1/keys", &RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err, Error::Transport("connection reset".into()));
        assert_eq!(mock.requests().len(), 1, "exactly one attempt");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_yields_transport_failure() {
        let mock = Arc::new(MockTransport::always(MockReply::Hang));
        let client = Client::new(
            ClientParams::new(PROJECT)
                .with_base_url(BASE)
                .with_timeout(Duration::from_secs(2))
                .with_transport(mock.clone()),
        )
        .unwrap();

        let err = client
            .do_get("/v1/keys", &RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(ref msg) if msg.contains("timed out")), "got: {err:?}");

        let err = client
            .do_get(
                "/v1/keys",
                &RequestOptions::new().with_timeout(Duration::from_millis(50)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_calls_respect_connection_bound() {
        let mock = Arc::new(
            MockTransport::always(MockReply::ok_empty()).with_delay(Duration::from_millis(50)),
        );
        let client = Arc::new(
            Client::new(
                ClientParams::new(PROJECT)
                    .with_base_url(BASE)
                    .with_max_connections(3)
                    .with_transport(mock.clone()),
            )
            .unwrap(),
        );

        let mut handles = vec![];
        for i in 0..20 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client
                    .do_get(&format!("/v1/keys/{i}"), &RequestOptions::new())
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(mock.requests().len(), 20);
        assert!(
            mock.peak_in_flight() <= 3,
            "peak in-flight {} exceeded bound",
            mock.peak_in_flight()
        );
        assert!(mock.peak_in_flight() >= 1);
    }

    #[tokio::test]
    async fn json_binding() {
        #[derive(serde::Deserialize)]
        struct Keys {
            keys: Vec<String>,
        }

        let mock = Arc::new(MockTransport::always(MockReply::json(
            200,
            &json!({"keys": ["k1", "k2"]}),
        )));
        let client = client_with(mock);

        let keys: Keys = client
            .get_json("/v1/keys/P2abc", &RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(keys.keys, vec!["k1", "k2"]);

        let mismatch: Result<Vec<u32>> = client
            .post_json("/v1/keys", Some(&json!({})), &RequestOptions::new())
            .await;
        assert!(matches!(mismatch, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn invalid_header_fails_without_sending() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = client_with(mock.clone());

        let err = client
            .do_get("/v1/keys", &RequestOptions::new().with_header("bad header", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn construction_validates_params() {
        assert!(matches!(
            Client::new(ClientParams::new("")),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Client::new(ClientParams::new(PROJECT).with_max_connections(0)),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Client::new(ClientParams::new(PROJECT).with_header("x-ok", "bad\nvalue")),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn default_base_url_and_routes() {
        let mock = Arc::new(MockTransport::always(MockReply::ok_empty()));
        let client = Client::new(ClientParams::new(PROJECT).with_transport(mock.clone())).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.project_id(), PROJECT);

        let path = client.routes().keys(PROJECT);
        client.do_get(&path, &RequestOptions::new()).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.descope.com/v1/keys/P2abc"
        );
    }

    /// Local server that echoes request metadata as JSON.
    async fn start_echo_server() -> (String, tokio::task::JoinHandle<()>) {
        use axum::body::Body;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            let app = axum::Router::new().fallback(|request: axum::http::Request<Body>| async move {
                let authorization = request
                    .headers()
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                let path = request.uri().path().to_string();
                if path == "/v1/missing" {
                    return (axum::http::StatusCode::NOT_FOUND, String::new());
                }
                let body = json!({ "authorization": authorization, "path": path });
                (axum::http::StatusCode::OK, body.to_string())
            });
            axum::serve(listener, app).await.unwrap();
        });

        (url, handle)
    }

    #[tokio::test]
    async fn reqwest_transport_end_to_end() {
        let (url, server) = start_echo_server().await;
        let client = Client::new(ClientParams::new(PROJECT).with_base_url(&url)).unwrap();

        let echoed: serde_json::Value = client
            .get_json("/v1/keys/P2abc", &RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(echoed["path"], "/v1/keys/P2abc");
        assert_eq!(echoed["authorization"], basic_credential());

        let err = client
            .do_get("/v1/missing", &RequestOptions::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::NotFound {
                url: format!("{url}/v1/missing")
            }
        );

        server.abort();
    }
}
