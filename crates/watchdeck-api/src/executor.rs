// Request executor -- issues HTTP calls against the watchdeck backend.
//
// Every domain client funnels through `Executor::execute`: base-URL joining,
// the JSON content-type default, session-cookie credentials, per-request
// timeout cancellation, and response normalization all live here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;

/// Default per-request timeout (60s, matching the backend's slowest report
/// endpoints).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

// ── Request descriptor ───────────────────────────────────────────────

/// HTTP method for a [`RequestSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// Only mutating verbs carry a JSON body.
    pub fn takes_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

/// Immutable description of a single request.
///
/// Built per call via the chained setters, consumed by
/// [`Executor::execute`], and discarded when the call completes.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub path: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Append one query pair. Call repeatedly for repeated keys; absent
    /// optional parameters are simply never appended.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body. Ignored at execution time unless the method is
    /// POST/PUT/PATCH.
    pub fn body<B: Serialize>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::Unexpected(format!("unserializable request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Override or add a request header (wins over the JSON content-type
    /// default).
    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override the executor's default timeout for this request only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ── Response envelope ────────────────────────────────────────────────

/// Parsed response body: JSON when the response content-type says so,
/// raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    /// Decode the JSON payload into a typed value.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(|e| Error::Parse {
                message: e.to_string(),
                body: String::new(),
            }),
            Self::Text(text) => Err(Error::Parse {
                message: "expected a JSON response body".into(),
                body: text,
            }),
        }
    }
}

/// Normalized successful response. Ownership transfers to the caller;
/// the executor retains nothing.
#[derive(Debug)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMap,
    pub payload: Payload,
}

// ── Executor ─────────────────────────────────────────────────────────

/// Issues requests with timeout and cancellation, normalizing responses
/// and errors. Credentials are browser-style session cookies held in a
/// shared jar; no tokens are constructed or attached.
pub struct Executor {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl Executor {
    /// Build an executor with the default 60s timeout.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build an executor with an explicit default timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar)
            .user_agent(concat!("watchdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            timeout,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages the cookie jar).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Join a relative path (e.g. `"api/v1/ssl"`) onto the base URL and
    /// append the supplied query pairs.
    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
        // base_url always ends with `/`; a leading slash on the path would
        // otherwise discard any base path segment.
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Execute a [`RequestSpec`], returning a [`ResponseEnvelope`] or a
    /// typed [`Error`].
    ///
    /// The timeout covers connect, send, and body read; when it elapses the
    /// transport future is dropped, aborting the in-flight request -- a
    /// timed-out call can never also resolve successfully later.
    pub async fn execute(&self, spec: RequestSpec) -> Result<ResponseEnvelope, Error> {
        let url = self.url(&spec.path, &spec.query)?;
        debug!(method = ?spec.method, %url, "executing request");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(spec.headers);

        let mut request = self
            .http
            .request(spec.method.to_reqwest(), url)
            .headers(headers);

        if spec.method.takes_body() {
            if let Some(ref body) = spec.body {
                request = request.body(
                    serde_json::to_vec(body)
                        .map_err(|e| Error::Unexpected(format!("body serialization: {e}")))?,
                );
            }
        }

        let timeout = spec.timeout.unwrap_or(self.timeout);
        let transfer = async {
            let resp = request.send().await?;
            let status = resp.status();
            let headers = resp.headers().clone();
            let text = resp.text().await?;
            Ok::<_, Error>((status, headers, text))
        };

        let (status, headers, text) = tokio::time::timeout(timeout, transfer)
            .await
            .map_err(|_| Error::Timeout { timeout })??;

        // The body is captured before the ok check so error payloads reach
        // the caller verbatim.
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body: text,
            });
        }

        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(content_type_is_json);

        let payload = if is_json {
            match serde_json::from_str(&text) {
                Ok(value) => Payload::Json(value),
                Err(e) => {
                    return Err(Error::Parse {
                        message: e.to_string(),
                        body: text,
                    });
                }
            }
        } else {
            Payload::Text(text)
        };

        Ok(ResponseEnvelope {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            headers,
            payload,
        })
    }

    // ── Typed verb helpers ───────────────────────────────────────────
    //
    // Partial applications of `execute` with the method fixed and the JSON
    // payload decoded into the caller's type.

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request_json(RequestSpec::new(Method::Get, path)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let mut spec = RequestSpec::new(Method::Get, path);
        for (key, value) in query {
            spec = spec.query(*key, value.clone());
        }
        self.request_json(spec).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request_json(RequestSpec::new(Method::Post, path).body(body)?)
            .await
    }

    /// POST with no body (action endpoints like pause/resume).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request_json(RequestSpec::new(Method::Post, path))
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request_json(RequestSpec::new(Method::Put, path).body(body)?)
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request_json(RequestSpec::new(Method::Patch, path).body(body)?)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.execute(RequestSpec::new(Method::Delete, path)).await?;
        Ok(())
    }

    async fn request_json<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, Error> {
        self.execute(spec).await?.payload.decode()
    }
}

/// Parse the base URL and guarantee a trailing slash so relative joins
/// preserve any base path segment.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn content_type_is_json(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = normalize_base_url("http://localhost:8001").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/");
    }

    #[test]
    fn join_normalizes_leading_slash() {
        let exec = Executor::new("http://localhost:8001").unwrap();
        let url = exec.url("/api/v1/ssl", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/api/v1/ssl");
    }

    #[test]
    fn join_preserves_base_path() {
        let exec = Executor::new("http://localhost:8001/backend").unwrap();
        let url = exec.url("api/v1/ssl", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/backend/api/v1/ssl");
    }

    #[test]
    fn repeated_query_keys_are_repeated_pairs() {
        let exec = Executor::new("http://localhost:8001").unwrap();
        let query = vec![
            ("metric".to_owned(), "activeUsers".to_owned()),
            ("metric".to_owned(), "screenPageViews".to_owned()),
        ];
        let url = exec.url("api/v1/x", &query).unwrap();
        assert_eq!(
            url.query(),
            Some("metric=activeUsers&metric=screenPageViews")
        );
    }

    #[test]
    fn json_content_type_detection() {
        assert!(content_type_is_json("application/json"));
        assert!(content_type_is_json("application/json; charset=utf-8"));
        assert!(content_type_is_json("application/problem+json"));
        assert!(!content_type_is_json("text/html"));
    }

    #[test]
    fn only_mutating_methods_take_bodies() {
        assert!(Method::Post.takes_body());
        assert!(Method::Put.takes_body());
        assert!(Method::Patch.takes_body());
        assert!(!Method::Get.takes_body());
        assert!(!Method::Delete.takes_body());
    }
}
