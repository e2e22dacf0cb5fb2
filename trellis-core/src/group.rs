//! Route groups and the duplicate registration guard
//!
//! A [`RouteGroup`] buckets the entries collected under one mount prefix.
//! Groups are append-only during the collection pass and frozen afterward;
//! the duplicate guard runs at insertion time, not after the fact.

use crate::entry::{MiddlewareRef, RouteEntry};
use crate::error::RouterError;
use serde::Serialize;
use std::sync::Arc;

/// A group's exported registration record: where the prefix sits in the
/// dispatch order and the chain its declaration site carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupPriority {
    pub prefix: String,
    pub priority: i32,
    pub owner: String,
    pub middleware: Vec<MiddlewareRef>,
}

/// One mount prefix and the entries collected under it.
#[derive(Clone, Debug)]
pub struct RouteGroup {
    prefix: String,
    priority: i32,
    owner: String,
    middleware: Vec<MiddlewareRef>,
    entries: Vec<Arc<RouteEntry>>,
}

impl RouteGroup {
    /// Create an empty group. The metadata comes from the declaration that
    /// first names the prefix.
    pub fn new(
        prefix: impl Into<String>,
        owner: impl Into<String>,
        priority: i32,
        middleware: Vec<MiddlewareRef>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            priority,
            owner: owner.into(),
            middleware,
            entries: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn middleware(&self) -> &[MiddlewareRef] {
        &self.middleware
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Arc<RouteEntry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry unless an existing entry already claims the same
    /// pattern with the same non-empty method. Empty-method entries (pure
    /// invocation triggers) never conflict with anything.
    pub fn try_insert(&mut self, entry: RouteEntry) -> Result<(), RouterError> {
        if !entry.method.is_empty() {
            if let Some(existing) = self
                .entries
                .iter()
                .find(|e| e.method == entry.method && e.pattern.raw() == entry.pattern.raw())
            {
                return Err(RouterError::DuplicateRoute {
                    method: entry.method.clone(),
                    pattern: entry.pattern.raw().to_string(),
                    existing: existing.handler.clone(),
                    rejected: entry.handler,
                });
            }
        }
        self.entries.push(Arc::new(entry));
        Ok(())
    }

    /// Registration record exported through the group priority list.
    pub fn priority_record(&self) -> GroupPriority {
        GroupPriority {
            prefix: self.prefix.clone(),
            priority: self.priority,
            owner: self.owner.clone(),
            middleware: self.middleware.clone(),
        }
    }

    /// Consume the group, yielding its entries in insertion order.
    pub fn into_entries(self) -> Vec<Arc<RouteEntry>> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::HandlerRef;
    use crate::pattern::PathPattern;

    fn group() -> RouteGroup {
        RouteGroup::new("/users", "UserController", 0, Vec::new())
    }

    fn entry(method: &str, pattern: &str, handler: &str) -> RouteEntry {
        RouteEntry::new(
            "/users",
            PathPattern::parse(pattern),
            method,
            HandlerRef::new(handler, "UserController"),
        )
    }

    #[test]
    fn test_insert_appends() {
        let mut group = group();
        group.try_insert(entry("GET", "/", "list")).unwrap();
        group.try_insert(entry("GET", "/:id", "find")).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.entries()[0].handler.name, "list");
    }

    #[test]
    fn test_same_method_same_pattern_conflicts() {
        let mut group = group();
        group.try_insert(entry("GET", "/list", "first")).unwrap();
        let err = group.try_insert(entry("GET", "/list", "second")).unwrap_err();

        match err {
            RouterError::DuplicateRoute {
                method,
                pattern,
                existing,
                rejected,
            } => {
                assert_eq!(method, "GET");
                assert_eq!(pattern, "/list");
                assert_eq!(existing.name, "first");
                assert_eq!(rejected.name, "second");
            }
            other => panic!("expected duplicate route error, got {other:?}"),
        }
    }

    #[test]
    fn test_different_methods_do_not_conflict() {
        let mut group = group();
        group.try_insert(entry("GET", "/list", "read")).unwrap();
        group.try_insert(entry("POST", "/list", "write")).unwrap();
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_empty_method_never_conflicts() {
        let mut group = group();
        group.try_insert(entry("", "", "first")).unwrap();
        group.try_insert(entry("", "", "second")).unwrap();
        group.try_insert(entry("GET", "", "third")).unwrap();
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_priority_record() {
        let group = RouteGroup::new(
            "/api",
            "ApiController",
            3,
            vec![MiddlewareRef::new("auth")],
        );
        let record = group.priority_record();
        assert_eq!(record.prefix, "/api");
        assert_eq!(record.priority, 3);
        assert_eq!(record.owner, "ApiController");
        assert_eq!(record.middleware, vec![MiddlewareRef::new("auth")]);
    }
}
