//! HTTP transport boundary.
//!
//! [`UreqTransport`] runs the blocking `ureq` agent on tokio's blocking pool.
//! [`ScriptedTransport`] replays canned responses and records requests, for
//! tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::Method;

/// A fully built HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body parsed as JSON, if it is JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// Status and body of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        RawResponse {
            status,
            body: value.to_string().into_bytes(),
        }
    }
}

/// Sends one request and returns whatever response arrived. Non-2xx
/// statuses are responses, not errors; `Err` means no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}

// ──────────────────────────────────────────────
// UreqTransport
// ──────────────────────────────────────────────

/// Transport backed by a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent that reports every status as a response. `timeout`
    /// bounds the whole request; `None` keeps ureq's defaults.
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::Agent::config_builder().http_status_as_error(false);
        if let Some(t) = timeout {
            builder = builder.timeout_global(Some(t));
        }
        let agent: ureq::Agent = builder.build().into();
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || send_blocking(&agent, request))
            .await
            .map_err(|e| TransportError::Join(e.to_string()))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<RawResponse, TransportError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let result = match method {
        Method::Get => with_headers(agent.get(&url), &headers).call(),
        Method::Delete => with_headers(agent.delete(&url), &headers).call(),
        Method::Post | Method::Put => {
            let builder = if method == Method::Post {
                agent.post(&url)
            } else {
                agent.put(&url)
            };
            let builder = with_headers(builder, &headers);
            match body {
                Some(bytes) => builder.send(&bytes[..]),
                None => builder.send_empty(),
            }
        }
    };

    let response = result.map_err(map_ureq_error)?;
    let status = response.status().as_u16();
    let body = response
        .into_body()
        .read_to_vec()
        .map_err(|e| TransportError::Body(e.to_string()))?;

    Ok(RawResponse { status, body })
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    let message = err.to_string();
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(message),
        _ => TransportError::Network(message),
    }
}

// ──────────────────────────────────────────────
// ScriptedTransport
// ──────────────────────────────────────────────

/// Replays queued responses in order and records every request it sees.
/// An exhausted queue behaves like an unreachable server.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(RawResponse::json(status, &body)))
    }

    /// Queue a response with a raw body.
    pub fn push_raw(&self, status: u16, body: &[u8]) -> &Self {
        self.push(Ok(RawResponse {
            status,
            body: body.to_vec(),
        }))
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, entry: Result<RawResponse, TransportError>) -> &Self {
        lock(&self.responses).push_back(entry);
        self
    }

    /// Requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("connection refused".into())))
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
