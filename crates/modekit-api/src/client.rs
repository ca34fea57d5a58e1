// REST client for the MODE platform
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection,
// JSON response decoding, and range-header parsing for paged lists.
// Endpoint groups live in `resources/` as inherent methods so this module
// stays focused on transport mechanics.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::range::{ItemRange, Paged, RANGE_HEADER};
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Undecoded response: the JSON body plus the response headers.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: serde_json::Value,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the MODE REST API.
///
/// Constructed once and shared by reference (typically behind an `Arc`).
/// When a token is set, every request carries `Authorization: Bearer ...`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a transport config.
    ///
    /// `base_url` is the API root, e.g. `https://api.tinymode.com/v1`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout: transport.timeout,
            token: RwLock::new(None),
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout: TransportConfig::default().timeout,
            token: RwLock::new(None),
        })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The API root every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Token management ─────────────────────────────────────────────

    /// Attach a bearer token to all subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        debug!("storing API token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Stop sending a bearer token.
    pub fn clear_token(&self) {
        debug!("clearing API token");
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"homes/12/kv"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Generic request ──────────────────────────────────────────────

    /// Send an arbitrary request and return the decoded JSON with headers.
    ///
    /// `params` become the query string; `body`, when present, is sent as
    /// JSON. Empty response bodies decode to `null`.
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        debug!("{method} {url} params={params:?}");

        let mut builder = self.http.request(method, url).query(params);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = self.send(builder).await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        let headers = resp.headers().clone();
        let text = resp.text().await?;
        let data = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            decode(text)?
        };
        Ok(RawResponse {
            status,
            headers,
            data,
        })
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.get_with_params(path, &[]).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.send(self.http.get(url).query(params)).await?;
        self.handle_response(resp).await
    }

    /// GET a paged list, reading the window from the range header.
    ///
    /// Without a parseable range header the page is reported empty.
    pub(crate) async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Paged<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?} (paged)");

        let resp = self.send(self.http.get(url).query(params)).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let range = resp
            .headers()
            .get(RANGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(ItemRange::parse);

        let Some(range) = range else {
            debug!("no usable {RANGE_HEADER} header, treating as empty page");
            return Ok(Paged::empty());
        };

        let body = resp.text().await?;
        let items = decode(body)?;
        trace!(?range, "decoded page");
        Ok(Paged { range, items })
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.send(self.http.put(url).json(body)).await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn patch_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.send(self.http.patch(url).json(body)).await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.send(self.http.delete(url)).await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, Error> {
        self.authorize(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            decode(body)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            return Error::Unauthorized;
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.reason.or(err.message))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Decode a JSON body, keeping a preview of the payload on failure.
fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ApiClient::with_client("https://api.example.com/v1", reqwest::Client::new())
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.example.com/v1/");
        assert_eq!(
            client.url("/homes/3").unwrap().as_str(),
            "https://api.example.com/v1/homes/3"
        );
    }

    #[test]
    fn token_lifecycle() {
        let client =
            ApiClient::with_client("https://api.example.com", reqwest::Client::new()).unwrap();
        assert!(!client.has_token());
        client.set_token(SecretString::from("t0ken".to_owned()));
        assert!(client.has_token());
        client.clear_token();
        assert!(!client.has_token());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApiClient::with_client("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
