//! Frozen route table and the resolving service facade
//!
//! [`RouteTable`] is the immutable product of one collection pass: groups
//! ordered by prefix length and declared priority, entries ordered by route
//! precedence within each group, plus a flattened dispatch list over the
//! whole table. [`RouterService`] owns the declaration source and builds the
//! table lazily exactly once; concurrent first callers share the in-flight
//! pass and a failed pass is never cached.
//!
//! # Example
//!
//! ```
//! use trellis_core::{
//!     ControllerDeclaration, RouteDeclaration, RouterConfig, RouterService,
//!     StaticDeclarations,
//! };
//!
//! # tokio_test::block_on(async {
//! let declarations = StaticDeclarations::new().controller(
//!     ControllerDeclaration::new("UserController", "/users")
//!         .route(RouteDeclaration::new("GET", "/:id", "find_one")),
//! );
//! let service =
//!     RouterService::with_config(declarations, RouterConfig::new().global_prefix("/api"));
//! let routes = service.flattened_routes().await.unwrap();
//! assert_eq!(routes[0].group_prefix, "/api/users");
//! # });
//! ```

use crate::collector::{RouteCollector, RouterConfig};
use crate::declaration::DeclarationSource;
use crate::entry::RouteEntry;
use crate::error::RouterError;
use crate::group::{GroupPriority, RouteGroup};
use crate::sort::{sort_entries, sort_groups};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Immutable snapshot of one collection pass.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    priority: Vec<GroupPriority>,
    groups: BTreeMap<String, Vec<Arc<RouteEntry>>>,
    flattened: Vec<Arc<RouteEntry>>,
}

impl RouteTable {
    /// Freeze collected groups into their final order.
    pub(crate) fn from_groups(mut groups: Vec<RouteGroup>) -> Self {
        sort_groups(&mut groups);

        let mut priority = Vec::with_capacity(groups.len());
        let mut by_prefix = BTreeMap::new();
        let mut flattened = Vec::new();

        for group in groups {
            priority.push(group.priority_record());
            let prefix = group.prefix().to_string();
            let mut entries = group.into_entries();
            sort_entries(&mut entries);
            flattened.extend(entries.iter().cloned());
            by_prefix.insert(prefix, entries);
        }

        Self {
            priority,
            groups: by_prefix,
            flattened,
        }
    }

    /// Group records in dispatch order: longest prefix first, declared
    /// priority breaking length ties.
    pub fn priority_list(&self) -> &[GroupPriority] {
        &self.priority
    }

    /// Entries keyed by group prefix, each group in precedence order.
    pub fn groups(&self) -> &BTreeMap<String, Vec<Arc<RouteEntry>>> {
        &self.groups
    }

    /// Entries for one group prefix, if the group exists.
    pub fn group(&self, prefix: &str) -> Option<&[Arc<RouteEntry>]> {
        self.groups.get(prefix).map(Vec::as_slice)
    }

    /// Every entry in final dispatch order: group order first, route
    /// precedence within each group.
    pub fn flattened(&self) -> &[Arc<RouteEntry>] {
        &self.flattened
    }

    pub fn route_count(&self) -> usize {
        self.flattened.len()
    }

    pub fn group_count(&self) -> usize {
        self.priority.len()
    }
}

/// Lazily-resolving facade over a declaration source.
///
/// The first query triggers the collection pass; its result is memoized for
/// the lifetime of the service. A failed pass leaves nothing cached, so a
/// later query retries against the same source.
#[derive(Debug)]
pub struct RouterService<S> {
    source: S,
    collector: RouteCollector,
    table: OnceCell<RouteTable>,
}

impl<S: DeclarationSource> RouterService<S> {
    /// Service with default settings and no global prefix.
    pub fn new(source: S) -> Self {
        Self::with_config(source, RouterConfig::default())
    }

    pub fn with_config(source: S, config: RouterConfig) -> Self {
        Self {
            source,
            collector: RouteCollector::new(config),
            table: OnceCell::new(),
        }
    }

    async fn resolve(&self) -> Result<&RouteTable, RouterError> {
        self.table
            .get_or_try_init(|| async {
                let controllers = self.source.controllers().await;
                let triggers = self.source.triggers().await;
                self.collector.collect(&controllers, &triggers)
            })
            .await
    }

    /// Group records in dispatch order.
    pub async fn group_priority_list(&self) -> Result<Vec<GroupPriority>, RouterError> {
        Ok(self.resolve().await?.priority_list().to_vec())
    }

    /// Entries keyed by group prefix, each group in precedence order.
    pub async fn route_table(
        &self,
    ) -> Result<BTreeMap<String, Vec<Arc<RouteEntry>>>, RouterError> {
        Ok(self.resolve().await?.groups().clone())
    }

    /// Every entry in final dispatch order.
    pub async fn flattened_routes(&self) -> Result<Vec<Arc<RouteEntry>>, RouterError> {
        Ok(self.resolve().await?.flattened().to_vec())
    }
}
