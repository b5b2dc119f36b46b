//! HTTP transport seam shared by every auth/settings call.
//!
//! Browser (hydrate): `gloo-net` fetch with `credentials: include`, relative
//! same-origin paths.
//! Native: `reqwest` with an in-memory cookie jar against an absolute base URL.
//!
//! ERROR HANDLING
//! ==============
//! Only failures to complete the exchange are errors. A well-formed non-2xx
//! response is returned as `Ok(ApiResponse)` and classified by the caller.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use reqwest::cookie::{CookieStore, Jar};

#[cfg(not(target_arch = "wasm32"))]
use super::config::ClientConfig;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Form(Vec<(&'static str, String)>),
    Json(serde_json::Value),
}

/// A request against a fixed API path.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: &'static str) -> Self {
        Self { method: Method::Get, path, body: RequestBody::Empty }
    }

    pub fn post(path: &'static str, body: RequestBody) -> Self {
        Self { method: Method::Post, path, body }
    }
}

/// Raw response: status code plus the full body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP exchange itself could not be completed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, aborted fetch, or a body
    /// cut off mid-read.
    #[error("network request failed: {0}")]
    Network(String),
    /// The request could not be built or the client could not be created.
    #[error("request could not be prepared: {0}")]
    Request(String),
}

/// Sends API requests and hands back the raw status/body.
pub trait HttpTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

/// Encode key/value pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Same-origin browser fetch that always sends cookies.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "hydrate")]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let builder = match request.method {
            Method::Get => gloo_net::http::Request::get(request.path),
            Method::Post => gloo_net::http::Request::post(request.path),
        }
        .credentials(web_sys::RequestCredentials::Include);

        let sent = match request.body {
            RequestBody::Empty => builder.send().await,
            RequestBody::Form(pairs) => {
                builder
                    .header("Content-Type", FORM_CONTENT_TYPE)
                    .body(encode_form(&pairs))
                    .map_err(|e| TransportError::Request(e.to_string()))?
                    .send()
                    .await
            }
            RequestBody::Json(value) => {
                builder
                    .json(&value)
                    .map_err(|e| TransportError::Request(e.to_string()))?
                    .send()
                    .await
            }
        };
        let resp = sent.map_err(|e| TransportError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

/// Native transport used by the CLI and integration tests.
///
/// Cookies set by one response (e.g. the session cookie from login) are
/// replayed on later requests made through the same instance. A cookie
/// from `config.session_cookie` seeds the jar so a session can outlive
/// the process that logged in.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    /// Build a cookie-carrying client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Request` if the underlying client cannot be
    /// built, or a session cookie was given for an unparsable base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = config.session_cookie.as_deref() {
            let origin = reqwest::Url::parse(&base_url)
                .map_err(|e| TransportError::Request(format!("invalid base URL {base_url:?}: {e}")))?;
            jar.add_cookie_str(cookie, &origin);
        }
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client, jar, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cookies the jar would send to the base URL, as a `Cookie` header value.
    pub fn session_cookie(&self) -> Option<String> {
        let origin = match reqwest::Url::parse(&self.base_url) {
            Ok(origin) => origin,
            Err(e) => {
                log::debug!("no cookie origin for {:?}: {e}", self.base_url);
                return None;
            }
        };
        let value = self.jar.cookies(&origin)?;
        match value.to_str() {
            Ok(text) => Some(text.to_owned()),
            Err(e) => {
                log::warn!("session cookie is not valid text: {e}");
                None
            }
        }
    }
}

/// Builder failures mean the request was never sent; everything else is the network.
#[cfg(not(target_arch = "wasm32"))]
fn classify_reqwest_error(err: &reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Request(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder
                .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encode_form(&pairs)),
            RequestBody::Json(value) => builder.json(&value),
        };

        let response = builder.send().await.map_err(|e| classify_reqwest_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify_reqwest_error(&e))?;
        log::debug!("{:?} {} -> {}", request.method, request.path, status);
        Ok(ApiResponse { status, body })
    }
}
