//! Precedence ordering for entries and groups
//!
//! Inside a group, entries order by pattern specificity: fully literal
//! patterns first, then parameterized, then wildcard. Within a class, more
//! literal segments win, then deeper paths, then the longer normalized
//! form; a shorter raw pattern breaks a normalized-length tie, and
//! insertion order is the last resort (both sorts are stable).
//!
//! Across groups, longer prefixes are checked before shorter ones; equal
//! lengths fall back to declared priority, which puts the root group last.

use crate::entry::RouteEntry;
use crate::group::RouteGroup;
use crate::pattern::PathPattern;
use std::cmp::Ordering;
use std::sync::Arc;

/// Compare two patterns for dispatch precedence. `Less` means `a` is
/// checked first.
pub fn compare_precedence(a: &PathPattern, b: &PathPattern) -> Ordering {
    b.kind()
        .rank()
        .cmp(&a.kind().rank())
        .then_with(|| b.literal_weight().cmp(&a.literal_weight()))
        .then_with(|| b.depth().cmp(&a.depth()))
        .then_with(|| b.normalized().len().cmp(&a.normalized().len()))
        .then_with(|| a.raw().len().cmp(&b.raw().len()))
}

/// Sort a group's entries into dispatch order. Stable: entries that tie on
/// every criterion keep insertion order.
pub fn sort_entries(entries: &mut [Arc<RouteEntry>]) {
    entries.sort_by(|a, b| compare_precedence(&a.pattern, &b.pattern));
}

/// Compare two groups for dispatch precedence: longer prefixes first, then
/// higher declared priority.
pub fn compare_groups(a: &RouteGroup, b: &RouteGroup) -> Ordering {
    b.prefix()
        .len()
        .cmp(&a.prefix().len())
        .then_with(|| b.priority().cmp(&a.priority()))
}

/// Sort groups into dispatch order. Stable: groups that tie keep the order
/// their prefixes were first seen.
pub fn sort_groups(groups: &mut [RouteGroup]) {
    groups.sort_by(compare_groups);
}
