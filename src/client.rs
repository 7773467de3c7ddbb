//! This module contains the [`Client`] struct, its configuration, and the dispatcher every
//! endpoint method goes through. The endpoint methods themselves live next to their request and
//! response types (`client.completion(...)` is in `completions`, and so on).

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::request::{HttpMethod, OutboundRequest};

use super::*;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// The main point of entry for interacting with the endpoints of the OpenAI API.
///
/// The client is immutable once built and cheap to clone; share it freely between tasks.
///
/// # Example
/// ```rust,ignore
/// let client = Client::builder(std::env::var("OPENAI_API_KEY")?)
///     .organization("org-123")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let model = client.model("davinci").await?;
/// assert_eq!(model.id, "davinci");
/// ```
#[derive(Clone)]
pub struct Client {
    api_key: String,
    organization: Option<String>,
    base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Client {
    /// A client for the default base URL with the default transport and no timeout.
    pub fn new<K: Into<String>>(api_key: K) -> Result<Client, OaikitError> {
        ClientBuilder::new(api_key).build()
    }

    pub fn builder<K: Into<String>>(api_key: K) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Reads `OPENAI_API_KEY` (required), `OPENAI_ORGANIZATION` and `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Client, OaikitError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OaikitError::Config("OPENAI_API_KEY must be set".to_string()))?;

        let mut builder = ClientBuilder::new(api_key);
        if let Ok(organization) = std::env::var("OPENAI_ORGANIZATION") {
            builder = builder.organization(organization);
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/models`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // region: dispatch

    /// Sends `request` and decodes a `200 OK` body as `T`.
    ///
    /// Endpoint methods are thin wrappers around this; it can also be used directly for
    /// endpoints this crate doesn't enumerate.
    pub async fn execute<T>(&self, request: OutboundRequest) -> Result<T, OaikitError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute_raw(request).await?;
        serde_json::from_slice(&body).map_err(OaikitError::Decoding)
    }

    /// Sends `request` and returns the `200 OK` body untouched.
    pub async fn execute_raw(&self, request: OutboundRequest) -> Result<Bytes, OaikitError> {
        let OutboundRequest {
            method,
            url,
            body,
            content_type,
        } = request;

        tracing::debug!(%method, %url, "sending request");

        let mut builder = self
            .http
            .request(method.into(), url.as_str())
            .bearer_auth(&self.api_key);

        if let Some(organization) = self.organization.as_deref().filter(|o| !o.is_empty()) {
            builder = builder.header(ORGANIZATION_HEADER, organization);
        }
        if let Some(content_type) = content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        // Drain the whole body before looking at the status; the response is released here on
        // every path.
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), %url, "received response");

        check_status(status, body)
    }

    // endregion

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, OaikitError> {
        self.execute(OutboundRequest::new(HttpMethod::Get, self.url(path)))
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, OaikitError> {
        self.execute(OutboundRequest::new(HttpMethod::Delete, self.url(path)))
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, OaikitError> {
        self.execute(OutboundRequest::new(HttpMethod::Post, self.url(path)))
            .await
    }

    pub(crate) async fn post_json<P, T>(&self, path: &str, payload: &P) -> Result<T, OaikitError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = OutboundRequest::new(HttpMethod::Post, self.url(path)).json(payload)?;
        self.execute(request).await
    }

    pub(crate) async fn post_form<P, T>(&self, path: &str, payload: &P) -> Result<T, OaikitError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = OutboundRequest::new(HttpMethod::Post, self.url(path)).form(payload)?;
        self.execute(request).await
    }
}

fn check_status(status: StatusCode, body: Bytes) -> Result<Bytes, OaikitError> {
    match status {
        StatusCode::OK => Ok(body),
        _ => Err(OaikitError::Api(handle_request_fail(&body, status))),
    }
}

/// Options applied while constructing a [`Client`].
pub struct ClientBuilder {
    api_key: String,
    organization: Option<String>,
    base_url: String,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("http", &self.http.is_some())
            .finish()
    }
}

impl ClientBuilder {
    pub fn new<K: Into<String>>(api_key: K) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            organization: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            http: None,
        }
    }

    /// Sent as the `OpenAI-Organization` header on every request. An empty string means no
    /// header.
    pub fn organization<O: Into<String>>(mut self, organization: O) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Replaces `https://api.openai.com/v1`. A trailing `/` is ignored.
    pub fn base_url<U: Into<String>>(mut self, base_url: U) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Total time allowed for each request, from connect to the end of the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an existing transport. Its own timeout and headers apply; [`timeout`](Self::timeout)
    /// is ignored.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<Client, OaikitError> {
        let http = match self.http {
            Some(http) => http,
            None => build_http_client(self.timeout)?,
        };

        Ok(Client {
            api_key: self.api_key,
            organization: self.organization,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

// (Just following reqwest example for the most part)
fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, OaikitError> {
    let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}
