//! Client for the turl shortening service: endpoint registry, input
//! transformers, request dispatch and the shorten → check → extend workflow.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod transform;
pub mod view;
pub mod workflow;

pub use api::ApiClient;
pub use config::{load_settings, Settings, SettingsError};
pub use dispatch::{Dispatcher, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use endpoints::{
    EndpointDefinition, EndpointPath, EndpointRegistry, Environment, Operation, ResolvedEndpoint,
    DEFAULT_BASE_URL,
};
pub use error::ClientError;
pub use transform::{extract_code, transform_length, transform_lifetime};
pub use view::{ExpiryView, LifetimeView, StatusView};
pub use workflow::{
    CheckedReference, OperationState, ShortenOutcome, WorkflowController, WorkflowEvent,
    WorkflowOperation, WorkflowState,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
