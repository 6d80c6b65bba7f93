//! Shared HTTP transport for vendor adapters.
//!
//! `HttpTransport` wraps a `reqwest::Client` with pre-built headers, the
//! target URL and the deadlines. `send()` returns the raw body of a 2xx
//! response, `open()` starts a streaming response. Non-2xx responses become
//! [`Error::Upstream`] with status and body preserved.

use crate::{Error, Result, Timeouts};
use reqwest::{
    Client, Response,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;

/// HTTP transport with auth headers and deadlines.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    timeouts: Timeouts,
}

impl HttpTransport {
    /// Transport with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut headers = json_headers();
        headers.insert(header::AUTHORIZATION, value(&format!("Bearer {key}"))?);
        Ok(Self::with_headers(client, headers, endpoint))
    }

    /// Transport authenticated by vendor-specific headers instead of a
    /// Bearer token (e.g. Anthropic's `x-api-key`).
    pub fn custom_headers(client: Client, pairs: &[(&str, &str)], endpoint: &str) -> Result<Self> {
        let mut headers = json_headers();
        for (name, val) in pairs {
            let name = name
                .parse::<HeaderName>()
                .map_err(|e| Error::Config(format!("invalid header name '{name}': {e}")))?;
            headers.insert(name, value(val)?);
        }
        Ok(Self::with_headers(client, headers, endpoint))
    }

    fn with_headers(client: Client, headers: HeaderMap, endpoint: &str) -> Self {
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
            timeouts: Timeouts::default(),
        }
    }

    /// Replace the deadlines.
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// POST `body` and return the body of a 2xx response.
    ///
    /// The whole exchange is bounded by the request deadline.
    pub async fn send(&self, body: &impl Serialize) -> Result<String> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {body}");
        }
        let request = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(body);

        let deadline = self.timeouts.request;
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            tracing::trace!("response: {text}");
            if !status.is_success() {
                return Err(Error::upstream(status.as_u16(), text));
            }
            Ok(text)
        };

        match tokio::time::timeout(deadline, exchange).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(deadline)),
        }
    }

    /// POST `body` and return the response of a 2xx reply once its head
    /// arrives. Connection setup is bounded by the stream deadline; the body
    /// is left for the caller to read.
    pub async fn open(&self, body: &impl Serialize) -> Result<Response> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {body}");
        }
        let request = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(body);

        let deadline = self.timeouts.stream;
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            let text = response.text().await.unwrap_or_default();
            Err(Error::upstream(status.as_u16(), text))
        };

        match tokio::time::timeout(deadline, exchange).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(deadline)),
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the deadlines.
    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn value(raw: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(raw)
        .map_err(|_| Error::Config("credential contains characters not allowed in a header".into()))?;
    value.set_sensitive(true);
    Ok(value)
}
