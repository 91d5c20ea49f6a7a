//! Synonym and its match-tightness scope.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// How tightly a synonym matches the canonical concept name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    Exact,
    Broad,
    Narrow,
    Related,
}

impl Scope {
    /// Every scope, in declaration order.
    pub const ALL: [Scope; 4] = [Scope::Exact, Scope::Broad, Scope::Narrow, Scope::Related];

    /// Map an obographs synonym predicate onto its scope.
    ///
    /// The mapping is closed: any predicate outside the four `has*Synonym`
    /// values is rejected with [`Error::UnknownSynonymPredicate`]. `node` is
    /// only used to make the error traceable.
    pub fn from_predicate(pred: &str, node: &str) -> Result<Self> {
        match pred {
            "hasExactSynonym" => Ok(Scope::Exact),
            "hasBroadSynonym" => Ok(Scope::Broad),
            "hasNarrowSynonym" => Ok(Scope::Narrow),
            "hasRelatedSynonym" => Ok(Scope::Related),
            other => Err(Error::UnknownSynonymPredicate {
                node: node.to_string(),
                predicate: other.to_string(),
            }),
        }
    }

    /// Upper-case label, as printed in concept dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Exact => "EXACT",
            Scope::Broad => "BROAD",
            Scope::Narrow => "NARROW",
            Scope::Related => "RELATED",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An alternate name for a concept.
///
/// Built once while the graph is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub name: String,
    pub scope: Scope,
    /// Provenance references attached to this synonym, not to the concept.
    /// Most synonyms carry zero to two of them.
    pub external_refs: SmallVec<[String; 2]>,
}

impl Synonym {
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            scope,
            external_refs: SmallVec::new(),
        }
    }

    pub fn with_refs(mut self, refs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.external_refs = refs.into_iter().map(Into::into).collect();
        self
    }
}

impl std::fmt::Display for Synonym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let refs: Vec<String> = self.external_refs.iter().map(|r| format!("[{r}]")).collect();
        write!(f, "{}\t{}\t{}", self.name, self.scope, refs.join(" "))
    }
}
