//! Route declarations consumed by the collector
//!
//! Declarations describe what an application registers: controllers with
//! member routes, and invocation triggers. They are produced by whatever
//! discovery layer the application uses and handed to the collection pass
//! through a [`DeclarationSource`]. [`StaticDeclarations`] covers the common
//! case of an explicit registration table built with builder calls.

use crate::entry::{Metadata, MiddlewareRef};
use async_trait::async_trait;
use std::sync::Arc;

/// One member route on a controller declaration.
#[derive(Clone, Debug)]
pub struct RouteDeclaration {
    pub pattern: String,
    pub method: String,
    pub handler_name: String,
    pub middleware: Vec<MiddlewareRef>,
    /// Bucket this member under the declaration's bare prefix instead of the
    /// globally-prefixed group
    pub ignore_prefix: bool,
    pub request_bindings: Metadata,
    pub response_bindings: Metadata,
}

impl RouteDeclaration {
    pub fn new(
        method: impl Into<String>,
        pattern: impl Into<String>,
        handler_name: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            method: method.into(),
            handler_name: handler_name.into(),
            middleware: Vec::new(),
            ignore_prefix: false,
            request_bindings: Metadata::new(),
            response_bindings: Metadata::new(),
        }
    }

    /// Add a middleware reference to this member's chain
    pub fn middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Add multiple middleware references to this member's chain
    pub fn with_middleware(mut self, middleware: Vec<MiddlewareRef>) -> Self {
        self.middleware.extend(middleware);
        self
    }

    /// Collect this member under the declaration's bare prefix, bypassing
    /// the globally-prefixed group.
    pub fn ignore_prefix(mut self) -> Self {
        self.ignore_prefix = true;
        self
    }

    /// Attach one request extraction metadata entry
    pub fn request_binding(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.request_bindings.insert(key.into(), value);
        self
    }

    /// Attach one response shaping metadata entry
    pub fn response_binding(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.response_bindings.insert(key.into(), value);
        self
    }
}

/// A controller declaration: a mount prefix, its registration metadata, and
/// its member routes.
///
/// # Examples
///
/// ```
/// use trellis_core::{ControllerDeclaration, RouteDeclaration};
///
/// let users = ControllerDeclaration::new("UserController", "/users")
///     .middleware("auth")
///     .route(RouteDeclaration::new("GET", "/", "list"))
///     .route(RouteDeclaration::new("GET", "/:id", "find"));
///
/// assert_eq!(users.routes.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ControllerDeclaration {
    pub prefix: String,
    pub owner: String,
    /// Mount under the declaration's own prefix alone, without the global
    /// prefix
    pub ignore_global_prefix: bool,
    /// Declared priority hint; overrides the default group priority
    pub priority: Option<i32>,
    pub middleware: Vec<MiddlewareRef>,
    pub routes: Vec<RouteDeclaration>,
}

impl ControllerDeclaration {
    pub fn new(owner: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            owner: owner.into(),
            ignore_global_prefix: false,
            priority: None,
            middleware: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Mount this declaration under its own prefix alone
    pub fn ignore_global_prefix(mut self) -> Self {
        self.ignore_global_prefix = true;
        self
    }

    /// Set the group priority hint
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Add a middleware reference to the group chain
    pub fn middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Add multiple middleware references to the group chain
    pub fn with_middleware(mut self, middleware: Vec<MiddlewareRef>) -> Self {
        self.middleware.extend(middleware);
        self
    }

    /// Add a member route
    pub fn route(mut self, route: RouteDeclaration) -> Self {
        self.routes.push(route);
        self
    }
}

/// Gateway binding carried by an HTTP-shaped trigger.
#[derive(Clone, Debug)]
pub struct HttpBinding {
    pub method: String,
    pub path: String,
}

/// An invocation trigger declaration for a non-HTTP entry point.
#[derive(Clone, Debug)]
pub struct TriggerDeclaration {
    pub name: String,
    pub kind: String,
    pub owner: String,
    pub handler_name: String,
    pub payload: Metadata,
    /// Present when the trigger is HTTP-gateway-shaped; such triggers order
    /// like ordinary routes
    pub http: Option<HttpBinding>,
}

impl TriggerDeclaration {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        handler_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            owner: owner.into(),
            handler_name: handler_name.into(),
            payload: Metadata::new(),
            http: None,
        }
    }

    /// Attach one payload metadata entry
    pub fn payload(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Give the trigger an HTTP gateway shape
    pub fn http(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.http = Some(HttpBinding {
            method: method.into(),
            path: path.into(),
        });
        self
    }
}

/// Source of route declarations, implemented by the discovery layer.
///
/// The collection pass reads the source exactly once per pass.
/// Implementations must return declarations in a stable order: ordering
/// drives conflict detection and group creation order.
#[async_trait]
pub trait DeclarationSource: Send + Sync {
    /// Controller declarations, in registration order
    async fn controllers(&self) -> Vec<ControllerDeclaration>;

    /// Invocation trigger declarations, in registration order
    async fn triggers(&self) -> Vec<TriggerDeclaration> {
        Vec::new()
    }
}

#[async_trait]
impl<S> DeclarationSource for Arc<S>
where
    S: DeclarationSource + ?Sized,
{
    async fn controllers(&self) -> Vec<ControllerDeclaration> {
        (**self).controllers().await
    }

    async fn triggers(&self) -> Vec<TriggerDeclaration> {
        (**self).triggers().await
    }
}

/// A fixed, in-memory declaration source built with explicit registration
/// calls.
#[derive(Clone, Debug, Default)]
pub struct StaticDeclarations {
    controllers: Vec<ControllerDeclaration>,
    triggers: Vec<TriggerDeclaration>,
}

impl StaticDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller declaration
    pub fn controller(mut self, declaration: ControllerDeclaration) -> Self {
        self.controllers.push(declaration);
        self
    }

    /// Register a trigger declaration
    pub fn trigger(mut self, declaration: TriggerDeclaration) -> Self {
        self.triggers.push(declaration);
        self
    }
}

#[async_trait]
impl DeclarationSource for StaticDeclarations {
    async fn controllers(&self) -> Vec<ControllerDeclaration> {
        self.controllers.clone()
    }

    async fn triggers(&self) -> Vec<TriggerDeclaration> {
        self.triggers.clone()
    }
}
