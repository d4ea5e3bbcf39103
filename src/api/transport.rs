//! Transport adapter
//!
//! [`Transport`] is the injectable seam for the network call. The free
//! functions [`fetch_json`] and [`fetch_empty`] turn raw HTTP outcomes into
//! typed results: transport failures become `Fetch`, unreadable or
//! undecodable bodies become `JsonDeserialize`, and error statuses become `Api`.

use crate::Result;
use crate::error::CustomError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("cms-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The status line arrived but the body could not be read.
    #[error("Reading the response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Other(String),
}

/// Sends one HTTP request. Dropping the returned future cancels the request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> std::result::Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    fn map_error(&self, url: &Url, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        TransportError::Request {
            url: url.to_string(),
            source: error,
        }
    }

    fn build_form(parts: Vec<FormPart>) -> std::result::Result<Form, TransportError> {
        let mut form = Form::new();
        for part in parts {
            form = match part.value {
                PartValue::Text(text) => form.text(part.name, text),
                PartValue::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let file = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
                    form.part(part.name, file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(&url, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| match self.map_error(&url, e) {
                TransportError::Request { url, source } => TransportError::Body {
                    url,
                    source: Box::new(source),
                },
                timeout => timeout,
            })?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

// An unreadable body is a decode failure like a malformed one; everything
// else, timeouts included, is `Fetch`.
fn transport_failure(target: &str, error: TransportError) -> CustomError {
    warn!("{} failed: {}", target, error);
    if matches!(error, TransportError::Body { .. }) {
        CustomError::json_deserialize(error)
    } else {
        CustomError::fetch(error)
    }
}

/// Send a request and decode the JSON response.
///
/// The body is decoded before the status is inspected, so error statuses
/// with a non-JSON body surface as `JsonDeserialize`.
pub async fn fetch_json(transport: &dyn Transport, request: HttpRequest) -> Result<Value> {
    let target = format!("{} {}", request.method, request.url);
    debug!("{}", target);

    let response = transport
        .send(request)
        .await
        .map_err(|e| transport_failure(&target, e))?;
    debug!("{} -> {}", target, response.status);

    let body: Value = serde_json::from_slice(&response.body).map_err(|e| {
        warn!("{} returned a body that is not JSON: {}", target, e);
        CustomError::json_deserialize(e)
    })?;

    if response.status >= 400 {
        let error = CustomError::api(response.status, &body);
        warn!("{} returned {}: {}", target, response.status, error.message());
        return Err(error);
    }

    Ok(body)
}

/// Send a request that answers 204 No Content on success.
pub async fn fetch_empty(transport: &dyn Transport, request: HttpRequest) -> Result<()> {
    let target = format!("{} {}", request.method, request.url);
    debug!("{}", target);

    let response = transport
        .send(request)
        .await
        .map_err(|e| transport_failure(&target, e))?;
    debug!("{} -> {}", target, response.status);

    match response.status {
        204 => Ok(()),
        status if status >= 400 => {
            let body: Value =
                serde_json::from_slice(&response.body).map_err(CustomError::json_deserialize)?;
            let error = CustomError::api(status, &body);
            warn!("{} returned {}: {}", target, status, error.message());
            Err(error)
        }
        status => Err(
            CustomError::generic(format!("Unexpected status {} from {}", status, target))
                .with_extra("status", Value::from(status)),
        ),
    }
}
