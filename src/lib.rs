// Trellis - A declarative route table builder and priority resolver for Rust
//
// This library collects controller and trigger declarations into prefix
// groups, detects conflicts, and freezes a deterministic dispatch order.

// Re-export core functionality
pub use trellis_core::*;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ControllerDeclaration,
        DeclarationSource,
        GroupPriority,
        HandlerRef,
        HttpBinding,
        MiddlewareRef,
        PathPattern,
        PatternKind,
        RouteCollector,
        RouteDeclaration,
        RouteEntry,
        RouteTable,
        RouterConfig,
        RouterError,
        RouterService,
        StaticDeclarations,
        TriggerBinding,
        TriggerDeclaration,
        join_prefix,
        normalize_prefix,
    };
}
