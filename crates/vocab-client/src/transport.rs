use std::fmt;
use std::future::Future;

use serde::Deserialize;

use crate::config::ClientConfig;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CONFLICT: u16 = 409;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The `{status, data}` wrapper every endpoint answers with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: STATUS_OK,
            data,
        }
    }

    /// Result sentinel for a decodable but unsuccessful response. The status is
    /// kept so conflicts stay distinguishable.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            data: serde_json::Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn is_conflict(&self) -> bool {
        self.status == STATUS_CONFLICT
    }
}

#[derive(Debug)]
pub enum TransportError {
    Fetch(reqwest::Error),
    Deserialize(reqwest::Error),
    /// Failure raised by a non-HTTP transport.
    Backend(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "request failed: {err}"),
            Self::Deserialize(err) => write!(f, "malformed response body: {err}"),
            Self::Backend(message) => write!(f, "backend failure: {message}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(err) | Self::Deserialize(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

/// Sends one request and decodes the envelope, whatever its status.
pub trait Transport {
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<Envelope, TransportError>> + Send;
}

/// Issues a request and filters the envelope on its declared status.
///
/// Unreachable hosts and undecodable bodies surface as `Err`; callers catch
/// them locally and degrade.
pub async fn request<T: Transport>(
    transport: &T,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> Result<Envelope, TransportError> {
    log::debug!("event=request method={} path={path}", method.as_str());
    let envelope = transport.send(method, path, body).await?;
    if envelope.is_success() {
        Ok(envelope)
    } else {
        log::error!(
            "event=request status=failed method={} path={path} code={}",
            method.as_str(),
            envelope.status
        );
        Ok(Envelope::empty(envelope.status))
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Uses a preconfigured client, e.g. one with custom timeouts or proxies.
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Envelope, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let mut req = self
            .client
            .request(method.into(), url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(&body);
        }
        let res: reqwest::Response = req.send().await.map_err(TransportError::Fetch)?;
        res.json::<Envelope>()
            .await
            .map_err(TransportError::Deserialize)
    }
}
