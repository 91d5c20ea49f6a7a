//! Concept node in the ontology graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use super::Synonym;

/// One ontology concept.
///
/// `parents` and `children` hold ids, not references: the owning
/// [`Graph`](crate::Graph) keeps them symmetric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptNode {
    /// Final path segment of the source URI, e.g. `MONDO_0005015`.
    pub id: String,
    pub name: Option<String>,
    /// Sorted by case-insensitive name.
    pub synonyms: Vec<Synonym>,
    /// Sorted ascending, case-sensitive.
    pub external_refs: Vec<String>,
    pub deprecated: bool,
    pub parents: BTreeSet<String>,
    pub children: BTreeSet<String>,
}

impl ConceptNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            synonyms: Vec::new(),
            external_refs: Vec::new(),
            deprecated: false,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the synonyms, sorting them case-insensitively (stable).
    pub fn with_synonyms(mut self, synonyms: impl IntoIterator<Item = Synonym>) -> Self {
        let mut synonyms: Vec<Synonym> = synonyms.into_iter().collect();
        synonyms.sort_by_cached_key(|s| s.name.to_lowercase());
        self.synonyms = synonyms;
        self
    }

    /// Set the external references, sorting them ascending.
    pub fn with_refs(mut self, refs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut refs: Vec<String> = refs.into_iter().map(Into::into).collect();
        refs.sort();
        self.external_refs = refs;
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl std::fmt::Display for ConceptNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "id: {}", self.id)?;
        write!(f, "name: {}", self.name.as_deref().unwrap_or("None"))?;
        if !self.synonyms.is_empty() {
            write!(f, "\nsynonyms")?;
            for synonym in &self.synonyms {
                write!(f, "\n--{synonym}")?;
            }
        }
        if !self.external_refs.is_empty() {
            write!(f, "\nxrefs")?;
            for xref in &self.external_refs {
                write!(f, "\n--{xref}")?;
            }
        }
        if self.deprecated {
            write!(f, "\ndeprecated: True")?;
        }
        Ok(())
    }
}
