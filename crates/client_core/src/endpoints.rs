//! Endpoint registry: maps each operation to its HTTP method and path and
//! resolves full request URLs against the configured base URL.

use std::{collections::HashMap, fmt, str::FromStr};

use reqwest::Method;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8010/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Shorten,
    CheckStatus,
    ExtendLifetime,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Shorten,
        Operation::CheckStatus,
        Operation::ExtendLifetime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Shorten => "shorten",
            Operation::CheckStatus => "checkStatus",
            Operation::ExtendLifetime => "extendLifetime",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown environment '{0}'")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

/// Either a fixed path or a pure function of the positional path arguments.
#[derive(Clone, Copy)]
pub enum EndpointPath {
    Literal(&'static str),
    Template(fn(&[&str]) -> String),
}

impl EndpointPath {
    pub fn render(&self, args: &[&str]) -> String {
        match self {
            EndpointPath::Literal(path) => (*path).to_string(),
            EndpointPath::Template(build) => build(args),
        }
    }
}

impl fmt::Debug for EndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointPath::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            EndpointPath::Template(_) => f.write_str("Template(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointDefinition {
    pub path: EndpointPath,
    pub method: Method,
    pub description: &'static str,
}

fn first_arg<'a>(args: &[&'a str]) -> &'a str {
    args.first().copied().unwrap_or_default()
}

fn info_path(args: &[&str]) -> String {
    format!("info/{}", first_arg(args))
}

fn extend_path(args: &[&str]) -> String {
    format!("extend/{}", first_arg(args))
}

pub fn base_definition(operation: Operation) -> EndpointDefinition {
    match operation {
        Operation::Shorten => EndpointDefinition {
            path: EndpointPath::Literal("encode"),
            method: Method::POST,
            description: "Shorten a URL with custom lifetime and length",
        },
        Operation::CheckStatus => EndpointDefinition {
            path: EndpointPath::Template(info_path),
            method: Method::GET,
            description: "Check the status of a shortened URL",
        },
        Operation::ExtendLifetime => EndpointDefinition {
            path: EndpointPath::Template(extend_path),
            method: Method::PATCH,
            description: "Extend the lifetime of a shortened URL",
        },
    }
}

/// A resolved request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub url: String,
    pub method: Method,
}

/// Read-only after construction; the base URL and environment are fixed for
/// the registry's lifetime.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    base_url: String,
    environment: Environment,
    overrides: HashMap<(Environment, Operation), EndpointDefinition>,
}

impl EndpointRegistry {
    pub fn new(base_url: Option<&str>, environment: Environment) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();

        if !base_url.ends_with('/') {
            warn!(
                base_url = %base_url,
                "api base url has no trailing slash; endpoint paths are appended verbatim"
            );
        }

        Self {
            base_url,
            environment,
            overrides: HashMap::new(),
        }
    }

    /// Registers a replacement definition used when the registry runs in
    /// `environment`.
    pub fn with_override(
        mut self,
        environment: Environment,
        operation: Operation,
        definition: EndpointDefinition,
    ) -> Self {
        self.overrides.insert((environment, operation), definition);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn definition(&self, operation: Operation) -> EndpointDefinition {
        self.overrides
            .get(&(self.environment, operation))
            .cloned()
            .unwrap_or_else(|| base_definition(operation))
    }

    pub fn resolve(&self, operation: Operation, args: &[&str]) -> ResolvedEndpoint {
        let definition = self.definition(operation);
        ResolvedEndpoint {
            url: format!("{}{}", self.base_url, definition.path.render(args)),
            method: definition.method,
        }
    }

    /// Effective definitions in operation order, for display.
    pub fn describe(&self) -> Vec<(Operation, EndpointDefinition)> {
        Operation::ALL
            .into_iter()
            .map(|op| (op, self.definition(op)))
            .collect()
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new(None, Environment::default())
    }
}

#[cfg(test)]
#[path = "tests/endpoints_tests.rs"]
mod tests;
