//! Route collection: prefix resolution, grouping, conflict detection
//!
//! The collector runs a single pass over declared controllers and triggers,
//! strictly in input order, bucketing every member route into a prefix
//! group. A group is created the first time its prefix is named, even if no
//! entry ever lands in it; groups that end the pass empty are dropped. The
//! duplicate guard rejects method+pattern collisions at insertion time, and
//! any fatal error aborts the whole pass.

use crate::declaration::{ControllerDeclaration, TriggerDeclaration};
use crate::entry::{HandlerRef, RouteEntry, TriggerBinding};
use crate::error::RouterError;
use crate::group::RouteGroup;
use crate::pattern::PathPattern;
use crate::table::RouteTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The root mount prefix. Pure invocation triggers always land here.
pub const ROOT_PREFIX: &str = "/";

/// Priority assigned to the root group so it sorts after every other group
/// of equal prefix length.
pub const ROOT_GROUP_PRIORITY: i32 = -999;

/// Collection settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Prefix joined onto every group prefix unless a declaration opts out
    pub global_prefix: Option<String>,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global prefix
    pub fn global_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.global_prefix = Some(prefix.into());
        self
    }
}

/// Normalize a mount prefix: leading slash, no trailing slash, `/` when
/// empty.
///
/// # Examples
///
/// ```
/// use trellis_core::normalize_prefix;
///
/// assert_eq!(normalize_prefix("users/"), "/users");
/// assert_eq!(normalize_prefix(""), "/");
/// ```
pub fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() || prefix == "/" {
        return ROOT_PREFIX.to_string();
    }
    let prefix = if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{}", prefix)
    };
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        ROOT_PREFIX.to_string()
    } else {
        prefix.to_string()
    }
}

/// Join the global prefix with a declaration's own prefix. Both sides are
/// normalized first; a root side contributes nothing.
pub fn join_prefix(global: &str, local: &str) -> String {
    let global = normalize_prefix(global);
    let local = normalize_prefix(local);
    if global == ROOT_PREFIX {
        local
    } else if local == ROOT_PREFIX {
        global
    } else {
        format!("{}{}", global, local)
    }
}

/// Runs the collection pass over a declaration set.
#[derive(Clone, Debug)]
pub struct RouteCollector {
    config: RouterConfig,
}

impl RouteCollector {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Collect declarations into a frozen route table.
    ///
    /// Declarations are processed strictly in input order; group creation
    /// order and duplicate detection depend on it. The first fatal error
    /// aborts the pass with no table produced.
    pub fn collect(
        &self,
        controllers: &[ControllerDeclaration],
        triggers: &[TriggerDeclaration],
    ) -> Result<RouteTable, RouterError> {
        tracing::debug!(
            controllers = controllers.len(),
            triggers = triggers.len(),
            "Collecting route table"
        );

        let mut groups: Vec<RouteGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let global = self.config.global_prefix.as_deref().unwrap_or(ROOT_PREFIX);

        for declaration in controllers {
            let bare = normalize_prefix(&declaration.prefix);
            let mounted = if declaration.ignore_global_prefix {
                bare.clone()
            } else {
                join_prefix(global, &declaration.prefix)
            };

            // The declaration names its mount prefix even before any member
            // is collected; the group record is created now and pruned later
            // if it stays empty.
            ensure_group(&mut groups, &mut index, &mounted, declaration)?;

            for route in &declaration.routes {
                let prefix = if route.ignore_prefix { &bare } else { &mounted };
                let slot = ensure_group(&mut groups, &mut index, prefix, declaration)?;

                let entry = RouteEntry::new(
                    prefix.clone(),
                    PathPattern::parse(&route.pattern),
                    &route.method,
                    HandlerRef::new(&route.handler_name, &declaration.owner),
                )
                .with_middleware(route.middleware.clone())
                .with_group_middleware(declaration.middleware.clone())
                .with_request_bindings(route.request_bindings.clone())
                .with_response_bindings(route.response_bindings.clone());

                tracing::trace!(
                    prefix = %prefix,
                    method = %entry.method,
                    pattern = %entry.pattern,
                    handler = %entry.handler,
                    "Route collected"
                );
                groups[slot].try_insert(entry)?;
            }
        }

        for trigger in triggers {
            let slot = ensure_invocation_group(&mut groups, &mut index, &trigger.owner);

            let (method, pattern) = match &trigger.http {
                Some(binding) => (binding.method.as_str(), binding.path.as_str()),
                None => ("", ""),
            };
            let entry = RouteEntry::new(
                ROOT_PREFIX,
                PathPattern::parse(pattern),
                method,
                HandlerRef::new(&trigger.handler_name, &trigger.owner),
            )
            .with_trigger(TriggerBinding {
                name: trigger.name.clone(),
                kind: trigger.kind.clone(),
                payload: trigger.payload.clone(),
            });

            tracing::trace!(
                kind = %trigger.kind,
                name = %trigger.name,
                handler = %entry.handler,
                "Trigger collected"
            );
            groups[slot].try_insert(entry)?;
        }

        groups.retain(|group| {
            if group.is_empty() {
                tracing::trace!(prefix = %group.prefix(), "Dropping empty route group");
                false
            } else {
                true
            }
        });

        let route_count: usize = groups.iter().map(RouteGroup::len).sum();
        tracing::debug!(
            groups = groups.len(),
            routes = route_count,
            "Route collection complete"
        );

        Ok(RouteTable::from_groups(groups))
    }
}

/// Look up the group for `prefix`, creating it with the declaration's
/// metadata on first sight. Rejects prefixes containing a wildcard.
fn ensure_group(
    groups: &mut Vec<RouteGroup>,
    index: &mut HashMap<String, usize>,
    prefix: &str,
    declaration: &ControllerDeclaration,
) -> Result<usize, RouterError> {
    if prefix.contains('*') {
        return Err(RouterError::InvalidPrefix {
            prefix: prefix.to_string(),
        });
    }
    if let Some(&slot) = index.get(prefix) {
        return Ok(slot);
    }

    let priority = declaration
        .priority
        .unwrap_or_else(|| default_priority(prefix));
    tracing::debug!(
        prefix = %prefix,
        owner = %declaration.owner,
        priority,
        "Route group created"
    );
    groups.push(RouteGroup::new(
        prefix,
        &declaration.owner,
        priority,
        declaration.middleware.clone(),
    ));
    let slot = groups.len() - 1;
    index.insert(prefix.to_string(), slot);
    Ok(slot)
}

/// The fixed root group trigger entries land in. Created without middleware
/// when no controller claimed the root prefix first.
fn ensure_invocation_group(
    groups: &mut Vec<RouteGroup>,
    index: &mut HashMap<String, usize>,
    owner: &str,
) -> usize {
    if let Some(&slot) = index.get(ROOT_PREFIX) {
        return slot;
    }
    tracing::debug!(owner = %owner, "Invocation group created");
    groups.push(RouteGroup::new(
        ROOT_PREFIX,
        owner,
        ROOT_GROUP_PRIORITY,
        Vec::new(),
    ));
    let slot = groups.len() - 1;
    index.insert(ROOT_PREFIX.to_string(), slot);
    slot
}

fn default_priority(prefix: &str) -> i32 {
    if prefix == ROOT_PREFIX {
        ROOT_GROUP_PRIORITY
    } else {
        0
    }
}
