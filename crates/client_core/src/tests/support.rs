//! Scripted transport shared by the client tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::dispatch::{HttpRequest, HttpResponse, Transport};

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<std::result::Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, "", body.to_string());
    }

    pub fn push_raw(&self, status: u16, status_text: &str, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.into().into_bytes(),
        }));
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_json(&self, index: usize) -> Option<Value> {
        let requests = self.requests.lock().unwrap();
        let body = requests.get(index)?.body.as_ref()?;
        serde_json::from_slice(body).ok()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted response left")),
        }
    }
}

pub fn status_json(lifetime: Option<i64>, expires_in: i64, expired: bool) -> Value {
    serde_json::json!({
        "url": "https://example.com/a/b",
        "lifetime": lifetime,
        "registered": "2024-05-01T10:00:00Z",
        "modified": "2024-05-01T10:00:00Z",
        "expires_at": "2024-05-31T10:00:00Z",
        "expires_in": expires_in,
        "expired": expired
    })
}
