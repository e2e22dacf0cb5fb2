// Route entry types shared by collection, sorting, and the dispatch views

use crate::pattern::PathPattern;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Opaque metadata map attached to entries and trigger payloads, passed
/// through unmodified.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Opaque reference to an invokable handler: the function name plus the name
/// of the unit that declared it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlerRef {
    pub name: String,
    pub owner: String,
}

impl HandlerRef {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.name)
    }
}

/// Opaque reference to a middleware by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MiddlewareRef(pub String);

impl MiddlewareRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MiddlewareRef {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for MiddlewareRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for MiddlewareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Invocation trigger metadata carried by entries produced from trigger
/// declarations. Opaque passthrough.
#[derive(Clone, Debug, Serialize)]
pub struct TriggerBinding {
    pub name: String,
    pub kind: String,
    pub payload: Metadata,
}

/// One routable handler. Built during the collection pass and immutable
/// afterward.
#[derive(Clone, Debug, Serialize)]
pub struct RouteEntry {
    /// Random identifier assigned at collection
    pub id: Uuid,
    /// Mount prefix of the group this entry is bucketed under
    pub group_prefix: String,
    /// Precompiled pattern with precedence figures
    pub pattern: PathPattern,
    /// Uppercase request method; empty for pure invocation entries
    pub method: String,
    /// Handler this entry dispatches to
    pub handler: HandlerRef,
    /// Middleware declared on the member itself
    pub middleware: Vec<MiddlewareRef>,
    /// Middleware declared at the group's declaration site
    pub group_middleware: Vec<MiddlewareRef>,
    /// Request extraction metadata, passed through unmodified
    pub request_bindings: Metadata,
    /// Response shaping metadata, passed through unmodified
    pub response_bindings: Metadata,
    /// Present on entries produced by invocation triggers
    pub trigger: Option<TriggerBinding>,
}

impl RouteEntry {
    /// Create an entry for a handler. The method is normalized to uppercase;
    /// an empty method marks a pure invocation entry.
    pub fn new(
        group_prefix: impl Into<String>,
        pattern: PathPattern,
        method: &str,
        handler: HandlerRef,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_prefix: group_prefix.into(),
            pattern,
            method: method.to_uppercase(),
            handler,
            middleware: Vec::new(),
            group_middleware: Vec::new(),
            request_bindings: Metadata::new(),
            response_bindings: Metadata::new(),
            trigger: None,
        }
    }

    pub fn with_middleware(mut self, middleware: Vec<MiddlewareRef>) -> Self {
        self.middleware = middleware;
        self
    }

    pub fn with_group_middleware(mut self, middleware: Vec<MiddlewareRef>) -> Self {
        self.group_middleware = middleware;
        self
    }

    pub fn with_request_bindings(mut self, bindings: Metadata) -> Self {
        self.request_bindings = bindings;
        self
    }

    pub fn with_response_bindings(mut self, bindings: Metadata) -> Self {
        self.response_bindings = bindings;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerBinding) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// The dispatch-time middleware chain: group chain first, then the
    /// member's own chain.
    pub fn combined_middleware(&self) -> Vec<MiddlewareRef> {
        let mut chain = Vec::with_capacity(self.group_middleware.len() + self.middleware.len());
        chain.extend(self.group_middleware.iter().cloned());
        chain.extend(self.middleware.iter().cloned());
        chain
    }

    /// Whether this entry participates in HTTP path matching.
    pub fn is_http(&self) -> bool {
        !self.method.is_empty()
    }
}
