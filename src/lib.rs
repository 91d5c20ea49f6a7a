//! # mondo-rs — MONDO Disease Ontology in Memory
//!
//! Loads the MONDO ontology from its obographs JSON release into an
//! in-memory concept graph and builds lookup indices from free-text names
//! or external database codes to MONDO ids.
//!
//! ## Design Principles
//!
//! 1. **Two-phase load**: nodes first, then `is_a` edges; the graph is
//!    read-only once `Loader::load` returns
//! 2. **Arena storage**: one node table, parent/child links kept symmetric in one place
//! 3. **Indices are values**: built on demand, never cached, never persisted
//! 4. **Normalization is a seam**: any `Fn(&str) -> String` works
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mondo_rs::{Mondo, IndexOptions, Scope, ResourceConfig};
//! use mondo_rs::normalize::Chain;
//!
//! # fn example() -> mondo_rs::Result<()> {
//! let mondo = Mondo::open("mondo", &ResourceConfig::from_env())?;
//!
//! let chain = Chain::standard();
//! let names = mondo.name_index(&chain, &IndexOptions::new().with_scopes([Scope::Exact]));
//! if let Some(ids) = names.lookup("Cystic Fibrosis", &chain) {
//!     for id in ids {
//!         println!("{id}: {:?}", mondo.get(id).and_then(|n| n.name.as_deref()));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `download` | Fetch missing ontology files from purl.obolibrary.org |

use std::path::{Path, PathBuf};

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod loader;
pub mod graph;
pub mod index;
pub mod normalize;
pub mod resource;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{ConceptNode, Scope, Synonym};
pub use graph::Graph;
pub use loader::Loader;
pub use index::{
    IdIndex, NameIndex, ReferenceIndex, IndexOptions,
    build_name_index, build_reference_index,
};
pub use normalize::Normalizer;
pub use resource::ResourceConfig;

// ============================================================================
// Top-level Mondo handle
// ============================================================================

/// A loaded ontology together with the file it came from.
///
/// The graph is immutable; [`Mondo::reload`] swaps in a freshly built one.
#[derive(Debug, Clone)]
pub struct Mondo {
    graph: Graph,
    path: PathBuf,
    loader: Loader,
}

impl Mondo {
    /// Resolve resource `name` under `config`, fetching it if necessary and
    /// possible, then load it.
    pub fn open(name: &str, config: &ResourceConfig) -> Result<Self> {
        let path = resource::ensure_local(name, config)?;
        Self::read(path)
    }

    /// Load a JSON file with the default loader.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_with(path, Loader::default())
    }

    pub fn read_with(path: impl AsRef<Path>, loader: Loader) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let graph = loader.load_path(&path)?;
        Ok(Self { graph, path, loader })
    }

    /// Re-read the source file. On failure the current graph is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.graph = self.loader.load_path(&self.path)?;
        Ok(())
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &str) -> Option<&ConceptNode> {
        self.graph.get(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &ConceptNode> {
        self.graph.values()
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn name_index<N>(&self, normalizer: &N, options: &IndexOptions) -> NameIndex
    where
        N: Normalizer + ?Sized,
    {
        build_name_index(&self.graph, normalizer, options)
    }

    pub fn reference_index(&self, options: &IndexOptions) -> ReferenceIndex {
        build_reference_index(&self.graph, options)
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed ontology document: {0}")]
    MalformedDocument(String),

    #[error("Unknown synonym predicate '{predicate}' on node {node}")]
    UnknownSynonymPredicate { node: String, predicate: String },

    #[error("Edge {child} is_a {parent} references unknown node {missing}")]
    DanglingEdgeReference { child: String, parent: String, missing: String },

    /// Absent locally and not obtainable; `reason` says why it could not be fetched.
    #[error("Resource {resource} not found at {}: {reason}", path.display())]
    MissingResource { resource: String, path: PathBuf, reason: String },

    #[error("No download location known for {0}")]
    UnknownResource(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
