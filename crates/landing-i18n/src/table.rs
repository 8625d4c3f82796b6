//! Nested locale tables with dotted-path lookup.
//!
//! # Invariants
//!
//! 1. **Root is a mapping**: a table is only ever built from a JSON object;
//!    any other document shape is rejected with [`LoadError::NotATable`].
//!
//! 2. **Lookups never panic**: every key, including the empty string and keys
//!    with repeated dots, resolves to either a string leaf or a
//!    [`LookupError`].
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing segment | Segment absent at some depth | [`LookupError::Missing`] |
//! | Walk through a leaf | Intermediate node is a string/number | [`LookupError::Missing`] |
//! | Non-text leaf | Key ends on an object, array, number | [`LookupError::NotText`] |
//! | Bad body | Not JSON, or root is not an object | [`LoadError`] |

use serde_json::{Map, Value};
use thiserror::Error;

use crate::language::Locale;

/// Errors raised while fetching or decoding a locale file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource answered with a non-success status.
    #[error("failed to load language file {path}: status {status}")]
    Status { path: String, status: u16 },
    /// The resource could not be reached at all.
    #[error("failed to fetch language file {path}: {message}")]
    Network { path: String, message: String },
    /// The body was not valid JSON.
    #[error("language file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The body was JSON but its root is not an object.
    #[error("language file root must be a JSON object")]
    NotATable,
}

/// Errors raised by a dotted-path lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Some segment of the key is absent, or the walk hit a leaf early.
    #[error("translation not found for key: {key} (missing segment '{segment}')")]
    Missing { key: String, segment: String },
    /// The key addresses a node that is not a display string.
    #[error("translation for key {key} is not a string")]
    NotText { key: String },
}

/// One language's strings, as a nested JSON mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    code: Locale,
    root: Map<String, Value>,
}

impl LocaleTable {
    /// An empty table for `code`. Every lookup misses.
    #[must_use]
    pub fn empty(code: impl Into<Locale>) -> Self {
        Self {
            code: code.into(),
            root: Map::new(),
        }
    }

    /// Decode a locale document.
    pub fn from_json(code: impl Into<Locale>, body: &str) -> Result<Self, LoadError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Object(root) => Ok(Self {
                code: code.into(),
                root,
            }),
            _ => Err(LoadError::NotATable),
        }
    }

    /// Language code this table was loaded for.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Resolve a dotted key such as `"hero.title"` to its display string.
    pub fn lookup(&self, key: &str) -> Result<&str, LookupError> {
        let missing = |segment: &str| LookupError::Missing {
            key: key.to_owned(),
            segment: segment.to_owned(),
        };
        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };

        let mut node = &self.root;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            node = node
                .get(segment)
                .and_then(Value::as_object)
                .ok_or_else(|| missing(segment))?;
        }

        match node.get(leaf) {
            Some(Value::String(text)) => Ok(text),
            Some(_) => Err(LookupError::NotText {
                key: key.to_owned(),
            }),
            None => Err(missing(leaf)),
        }
    }

    /// All dotted keys that resolve to strings, sorted. Names containing a
    /// dot cannot be addressed and are left out.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        fn collect(prefix: Option<&str>, map: &Map<String, Value>, out: &mut Vec<String>) {
            for (name, value) in map {
                if name.contains('.') {
                    continue;
                }
                let path = match prefix {
                    Some(prefix) => format!("{prefix}.{name}"),
                    None => name.clone(),
                };
                match value {
                    Value::String(_) => out.push(path),
                    Value::Object(child) => collect(Some(&path), child, out),
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(None, &self.root, &mut out);
        out.sort_unstable();
        out
    }

    /// Number of string leaves; `keys().len()` without building the list.
    #[must_use]
    pub fn len(&self) -> usize {
        fn count(map: &Map<String, Value>) -> usize {
            map.iter()
                .filter(|(name, _)| !name.contains('.'))
                .map(|(_, value)| match value {
                    Value::String(_) => 1,
                    Value::Object(child) => count(child),
                    _ => 0,
                })
                .sum()
        }

        count(&self.root)
    }

    /// Whether the table has no string leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
