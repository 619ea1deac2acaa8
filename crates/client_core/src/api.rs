use std::sync::Arc;

use anyhow::Result;
use shared::protocol::{ExtendRequest, ShortenRequest, ShortenResponse, UrlStatus};
use tracing::info;

use crate::{
    config::Settings,
    dispatch::{Dispatcher, ReqwestTransport, Transport},
    endpoints::{EndpointRegistry, Operation},
    error::ClientError,
    transform::{extract_code, transform_length, transform_lifetime},
};

/// Typed access to the three service operations. Constructed explicitly and
/// handed to whichever layer orchestrates the workflow.
#[derive(Clone)]
pub struct ApiClient {
    registry: Arc<EndpointRegistry>,
    dispatcher: Dispatcher,
}

impl ApiClient {
    pub fn new(registry: EndpointRegistry, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry: Arc::new(registry),
            dispatcher: Dispatcher::new(transport),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let registry = EndpointRegistry::new(settings.api_base_url.as_deref(), settings.environment);
        let transport = ReqwestTransport::new(settings.request_timeout())?;
        info!(
            base_url = registry.base_url(),
            environment = %registry.environment(),
            "api client configured"
        );
        Ok(Self::new(registry, Arc::new(transport)))
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// `lifetime` and `length` are the raw UI values; both are normalized
    /// before sending.
    pub async fn shorten_url(
        &self,
        url: &str,
        lifetime: &str,
        length: &str,
    ) -> Result<ShortenResponse, ClientError> {
        let payload = ShortenRequest {
            url: url.to_string(),
            lifetime: transform_lifetime(lifetime),
            length: transform_length(length),
        };
        let endpoint = self.registry.resolve(Operation::Shorten, &[]);
        self.dispatcher
            .dispatch(&endpoint.url, endpoint.method, Some(&payload))
            .await
    }

    /// Looks up the status of a full short URL; the code is its last path
    /// segment.
    pub async fn check_url_status(&self, short_url: &str) -> Result<UrlStatus, ClientError> {
        let code = extract_code(short_url)?;
        self.check_code_status(&code).await
    }

    pub async fn check_code_status(&self, code: &str) -> Result<UrlStatus, ClientError> {
        let endpoint = self.registry.resolve(Operation::CheckStatus, &[code]);
        self.dispatcher
            .dispatch::<(), _>(&endpoint.url, endpoint.method, None)
            .await
    }

    pub async fn extend_url_lifetime(
        &self,
        code: &str,
        lifetime: &str,
    ) -> Result<UrlStatus, ClientError> {
        let payload = ExtendRequest {
            lifetime: transform_lifetime(lifetime),
        };
        let endpoint = self.registry.resolve(Operation::ExtendLifetime, &[code]);
        self.dispatcher
            .dispatch(&endpoint.url, endpoint.method, Some(&payload))
            .await
    }
}
