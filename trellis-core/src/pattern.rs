//! Path pattern analysis for route precedence
//!
//! A [`PathPattern`] classifies a declared route pattern once, at
//! construction, as literal, parameterized, or wildcard, and captures the
//! figures the precedence comparison reads: specificity weight, depth, and
//! the normalized form. Nothing is re-derived from the raw string at sort
//! time.
//!
//! # Examples
//!
//! ```
//! use trellis_core::{PathPattern, PatternKind};
//!
//! let pattern = PathPattern::parse("/users/:id");
//! assert_eq!(pattern.kind(), PatternKind::Parameterized);
//! assert_eq!(pattern.literal_weight(), 1);
//! assert_eq!(pattern.depth(), 2);
//! ```

use serde::Serialize;
use std::fmt;

/// Single-byte token substituted for the first parameter segment in the
/// normalized form. Must stay one byte: normalized forms are compared by
/// byte length.
const PARAM_PLACEHOLDER: &str = "#";

/// Classification of a route pattern, decided once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    /// Contains a wildcard segment (`*` or `**`)
    Wildcard,
    /// Contains a named parameter segment (`:id`) and no wildcard
    Parameterized,
    /// Fully literal path
    Literal,
}

impl PatternKind {
    /// Precedence rank for this kind; higher ranks are checked first.
    pub fn rank(&self) -> u8 {
        match self {
            PatternKind::Wildcard => 0,
            PatternKind::Parameterized => 1,
            PatternKind::Literal => 2,
        }
    }
}

/// A declared route pattern with precomputed precedence figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathPattern {
    raw: String,
    kind: PatternKind,
    literal_weight: u32,
    depth: u32,
    normalized: String,
}

impl PathPattern {
    /// Parse a raw pattern and compute its precedence figures.
    ///
    /// The empty pattern (used by pure invocation entries) is valid and
    /// classifies as literal with zero weight and depth.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();

        let mut literal_weight = 0u32;
        let mut has_wildcard = false;
        let mut has_param = false;

        for segment in raw.split('/') {
            if segment.is_empty() {
                continue;
            }
            if segment.contains('*') {
                has_wildcard = true;
            } else if segment.contains(':') {
                has_param = true;
            } else {
                literal_weight += 1;
            }
        }

        let kind = if has_wildcard {
            PatternKind::Wildcard
        } else if has_param {
            PatternKind::Parameterized
        } else {
            PatternKind::Literal
        };

        let depth = raw.matches('/').count() as u32;
        let normalized = normalize_pattern(&raw);

        Self {
            raw,
            kind,
            literal_weight,
            depth,
            normalized,
        }
    }

    /// The pattern exactly as declared.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Count of plain literal segments (neither empty, parameterized, nor
    /// wildcard).
    pub fn literal_weight(&self) -> u32 {
        self.literal_weight
    }

    /// Count of path separators in the pattern.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The pattern with its trailing wildcard run stripped and the first
    /// parameter segment replaced by a placeholder. Compared by length only.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn normalize_pattern(raw: &str) -> String {
    let stripped = raw.trim_end_matches('*');
    let mut replaced = false;
    let segments: Vec<&str> = stripped
        .split('/')
        .map(|segment| {
            if !replaced && segment.contains(':') {
                replaced = true;
                PARAM_PLACEHOLDER
            } else {
                segment
            }
        })
        .collect();
    segments.join("/")
}
