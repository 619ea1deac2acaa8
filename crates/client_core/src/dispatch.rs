//! Request dispatch: JSON over an injectable HTTP transport, with non-success
//! statuses turned into typed errors.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::ApiError;
use tracing::{debug, warn};

use crate::error::ClientError;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub content_type: &'static str,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and settles exactly once. Implementations do not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.as_str())
            .header(CONTENT_TYPE, request.content_type)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{} {} failed", request.method, request.url))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read response body from {}", request.url))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn dispatch<B, R>(
        &self,
        url: &str,
        method: Method,
        body: Option<&B>,
    ) -> std::result::Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body
            .map(|body| serde_json::to_vec(body))
            .transpose()
            .map_err(|err| ClientError::Encode(err.to_string()))?;

        debug!(%method, url, has_body = body.is_some(), "dispatching request");
        let request = HttpRequest {
            method: method.clone(),
            url: url.to_string(),
            content_type: JSON_CONTENT_TYPE,
            body,
        };

        let response = self.transport.send(request).await.map_err(|err| {
            warn!(%method, url, error = %format!("{err:#}"), "request failed in transport");
            ClientError::Network(format!("{err:#}"))
        })?;

        if !response.is_success() {
            let message = error_message(&response);
            warn!(%method, url, status = response.status, message = %message, "request rejected by server");
            return Err(ClientError::Http {
                status: response.status,
                message,
            });
        }

        serde_json::from_slice(&response.body).map_err(|err| {
            warn!(%method, url, error = %err, "unparseable success body");
            ClientError::MalformedResponse(err.to_string())
        })
    }
}

/// Server-provided `message` when the body is a JSON error object carrying
/// one, otherwise `HTTP {status}: {status text}`.
fn error_message(response: &HttpResponse) -> String {
    if let Some(message) = serde_json::from_slice::<ApiError>(&response.body)
        .ok()
        .and_then(|body| body.message().map(str::to_string))
    {
        return message;
    }

    let status_text = if response.status_text.trim().is_empty() {
        StatusCode::from_u16(response.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_string()
    } else {
        response.status_text.clone()
    };
    format!("HTTP {}: {}", response.status, status_text)
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
