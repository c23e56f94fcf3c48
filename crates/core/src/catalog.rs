//! The subset catalog: the set of selectable subset profiles.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Inclusive Unicode code point range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnicodeRange {
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for UnicodeRange {
    /// Formats as the inclusive hexadecimal `U+LOW-HIGH` range the
    /// subsetting tool expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}-{:04X}", self.start, self.end)
    }
}

/// One resolved (subset identifier, Unicode range) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsetRequest {
    pub id: String,
    pub range: UnicodeRange,
}

/// Read-only mapping from subset identifier to Unicode range.
///
/// Constructed once at startup and shared across requests; never mutated
/// at runtime.
#[derive(Clone, Debug)]
pub struct SubsetCatalog {
    entries: HashMap<&'static str, UnicodeRange>,
}

impl SubsetCatalog {
    /// The built-in subset profiles.
    pub fn builtin() -> Self {
        let entries = HashMap::from([
            (
                "basic-latin",
                UnicodeRange {
                    start: 0x20,
                    end: 0x7F,
                },
            ),
            (
                "latin-1-supplement",
                UnicodeRange {
                    start: 0xA0,
                    end: 0xFF,
                },
            ),
        ]);
        Self { entries }
    }

    /// Resolve one client-supplied identifier.
    pub fn resolve(&self, id: &str) -> Result<SubsetRequest> {
        let range = self
            .entries
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownSubset(id.to_string()))?;
        Ok(SubsetRequest {
            id: id.to_string(),
            range,
        })
    }

    /// Resolve a whole batch in order, failing on the first unknown
    /// identifier. Invalid identifiers are rejected before any generation
    /// work begins.
    pub fn resolve_all(&self, ids: &[String]) -> Result<Vec<SubsetRequest>> {
        ids.iter().map(|id| self.resolve(id)).collect()
    }

    /// All selectable identifiers, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
