//! # Lookup Indices
//!
//! Maps from a string key to the set of concept ids carrying it:
//!
//! | Index | Key | Built by |
//! |-------|-----|----------|
//! | [`NameIndex`] | normalized name or synonym | [`build_name_index`] |
//! | [`ReferenceIndex`] | raw xref string, verbatim | [`build_reference_index`] |
//!
//! Both are built on demand from a finished [`Graph`], are never persisted,
//! and never mutate the graph. Ambiguous keys keep every matching id.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::Graph;
use crate::model::{ConceptNode, Scope};
use crate::normalize::Normalizer;

// ============================================================================
// Options
// ============================================================================

/// Which concepts and synonyms contribute keys.
///
/// The default indexes canonical names only and skips deprecated concepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Synonym scopes that add keys. Empty means synonyms are ignored.
    pub allowed_scopes: HashSet<Scope>,
    pub allow_deprecated: bool,
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.allowed_scopes.extend(scopes);
        self
    }

    pub fn allow_deprecated(mut self, allow: bool) -> Self {
        self.allow_deprecated = allow;
        self
    }

    fn skips(&self, node: &ConceptNode) -> bool {
        node.deprecated && !self.allow_deprecated
    }

    fn admits(&self, scope: Scope) -> bool {
        self.allowed_scopes.contains(&scope)
    }
}

// ============================================================================
// IdIndex
// ============================================================================

/// String key → set of concept ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdIndex {
    entries: HashMap<String, HashSet<String>>,
}

/// Normalized name → concept ids.
pub type NameIndex = IdIndex;

/// Verbatim external reference → concept ids.
pub type ReferenceIndex = IdIndex;

impl IdIndex {
    fn add(&mut self, key: String, id: &str) {
        let ids = self.entries.entry(key).or_default();
        if !ids.contains(id) {
            ids.insert(id.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&HashSet<String>> {
        self.entries.get(key)
    }

    /// Normalize `text` the same way the index was built, then look it up.
    pub fn lookup<N: Normalizer + ?Sized>(&self, text: &str, normalizer: &N) -> Option<&HashSet<String>> {
        self.get(&normalizer.normalize(text))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Map normalized canonical names (and, per `options`, synonym names) to ids.
///
/// A concept without a name contributes no canonical-name key.
pub fn build_name_index<N>(graph: &Graph, normalizer: &N, options: &IndexOptions) -> NameIndex
where
    N: Normalizer + ?Sized,
{
    let mut index = IdIndex::default();
    for node in graph.values().filter(|n| !options.skips(n)) {
        if let Some(name) = &node.name {
            index.add(normalizer.normalize(name), &node.id);
        }
        if options.allowed_scopes.is_empty() {
            continue;
        }
        for synonym in node.synonyms.iter().filter(|s| options.admits(s.scope)) {
            index.add(normalizer.normalize(&synonym.name), &node.id);
        }
    }
    debug!(keys = index.len(), "built name index");
    index
}

/// Map raw external references of concepts (and, per `options`, of their
/// synonyms) to ids. Keys are never normalized.
pub fn build_reference_index(graph: &Graph, options: &IndexOptions) -> ReferenceIndex {
    let mut index = IdIndex::default();
    for node in graph.values().filter(|n| !options.skips(n)) {
        for xref in &node.external_refs {
            index.add(xref.clone(), &node.id);
        }
        for synonym in node.synonyms.iter().filter(|s| options.admits(s.scope)) {
            for xref in &synonym.external_refs {
                index.add(xref.clone(), &node.id);
            }
        }
    }
    debug!(keys = index.len(), "built reference index");
    index
}
