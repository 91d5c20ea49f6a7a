//! # Graph Loader
//!
//! Turns an obographs [`Document`] into a [`Graph`] in two phases:
//!
//! 1. **Nodes**: every node record of the first graph becomes a
//!    [`ConceptNode`] in the arena. Content fields are final after this.
//! 2. **Edges**: `is_a` edges whose endpoints both sit in the trusted
//!    namespace are linked; only parent/child sets are touched.
//!
//! Loading is all-or-nothing: any error discards the partially built graph.
//! Only the first entry of `graphs` is read; this is fixed, not configurable.

pub mod document;

use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::graph::Graph;
use crate::model::{ConceptNode, Scope, Synonym};
use crate::{Error, Result};

pub use document::{Document, RawEdge, RawGraph, RawMeta, RawNode, RawSynonym, RawXref};

/// Predicate of the subsumption edges that make up the hierarchy.
pub const IS_A: &str = "is_a";

/// Id prefix of concepts that belong to the ontology itself.
pub const DEFAULT_NAMESPACE: &str = "MONDO";

/// Final `/`-separated segment of a URI-like id.
pub fn local_id(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

// ============================================================================
// Loader
// ============================================================================

/// Two-phase graph builder.
#[derive(Debug, Clone)]
pub struct Loader {
    namespace: String,
}

impl Default for Loader {
    fn default() -> Self {
        Self { namespace: DEFAULT_NAMESPACE.to_string() }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `is_a` edges whose two endpoints start with this prefix are linked.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read and load a JSON file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Graph> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading ontology");
        let file = std::fs::File::open(path)?;
        self.load_reader(std::io::BufReader::new(file))
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Graph> {
        let doc: Document = serde_json::from_reader(reader)?;
        self.load(doc)
    }

    pub fn load_str(&self, json: &str) -> Result<Graph> {
        let doc: Document = serde_json::from_str(json)?;
        self.load(doc)
    }

    pub fn load_value(&self, json: serde_json::Value) -> Result<Graph> {
        let doc: Document = serde_json::from_value(json)?;
        self.load(doc)
    }

    /// Build a graph from an already deserialized document.
    pub fn load(&self, doc: Document) -> Result<Graph> {
        let graphs = doc
            .graphs
            .ok_or_else(|| Error::MalformedDocument("missing `graphs` key".into()))?;
        let raw = graphs
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedDocument("`graphs` is empty".into()))?;

        // Phase 1: nodes
        let mut graph = Graph::with_capacity(raw.nodes.len());
        for record in raw.nodes {
            let node = parse_node(record)?;
            if let Some(old) = graph.insert(node) {
                warn!(id = %old.id, "duplicate node id, keeping the later record");
            }
        }

        // Phase 2: edges
        let mut linked = 0usize;
        let mut skipped = 0usize;
        for edge in &raw.edges {
            if edge.pred != IS_A {
                continue;
            }
            let child = local_id(&edge.sub);
            let parent = local_id(&edge.obj);
            if !(child.starts_with(&self.namespace) && parent.starts_with(&self.namespace)) {
                skipped += 1;
                continue;
            }
            graph.link(child, parent)?;
            linked += 1;
        }

        debug!(skipped, namespace = %self.namespace, "ignored out-of-namespace is_a edges");
        info!(nodes = graph.len(), edges = linked, "ontology loaded");
        Ok(graph)
    }
}

/// Phase 1 for a single record.
fn parse_node(record: RawNode) -> Result<ConceptNode> {
    let id = local_id(&record.id).to_string();
    let meta = record.meta.unwrap_or_default();
    let deprecated = meta.is_deprecated();

    let synonyms = meta
        .synonyms
        .unwrap_or_default()
        .into_iter()
        .map(|s| parse_synonym(s, &id))
        .collect::<Result<Vec<_>>>()?;

    let refs = meta.xrefs.unwrap_or_default().into_iter().map(|x| x.val);

    let mut node = ConceptNode::new(id)
        .with_synonyms(synonyms)
        .with_refs(refs)
        .deprecated(deprecated);
    node.name = record.lbl;
    Ok(node)
}

fn parse_synonym(raw: RawSynonym, node: &str) -> Result<Synonym> {
    let scope = Scope::from_predicate(&raw.pred, node)?;
    Ok(Synonym::new(raw.val, scope).with_refs(raw.xrefs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OBO: &str = "http://purl.obolibrary.org/obo/";

    #[test]
    fn test_local_id() {
        assert_eq!(local_id("http://purl.obolibrary.org/obo/MONDO_0000001"), "MONDO_0000001");
        assert_eq!(local_id("MONDO_1"), "MONDO_1");
        assert_eq!(local_id("http://x/"), "");
    }

    #[test]
    fn test_parse_node_fields() {
        let record: RawNode = serde_json::from_value(json!({
            "id": format!("{OBO}MONDO_1"),
            "lbl": "foo",
            "meta": {
                "synonyms": [
                    { "val": "b", "pred": "hasRelatedSynonym", "xrefs": ["X:2"] },
                    { "val": "A", "pred": "hasExactSynonym", "xrefs": [] }
                ],
                "xrefs": [{ "val": "OMIM:9" }, { "val": "DOID:1" }]
            }
        }))
        .unwrap();

        let node = parse_node(record).unwrap();
        assert_eq!(node.id, "MONDO_1");
        assert_eq!(node.name.as_deref(), Some("foo"));
        assert_eq!(node.synonyms[0].name, "A");
        assert_eq!(node.synonyms[0].scope, Scope::Exact);
        assert_eq!(node.synonyms[1].external_refs.to_vec(), vec!["X:2"]);
        assert_eq!(node.external_refs, vec!["DOID:1", "OMIM:9"]);
        assert!(!node.deprecated);
    }

    #[test]
    fn test_empty_graphs_is_malformed() {
        let err = Loader::new().load_value(json!({ "graphs": [] })).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
        let err = Loader::new().load_value(json!({})).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_custom_namespace() {
        let doc = json!({ "graphs": [{
            "nodes": [{ "id": format!("{OBO}HP_1") }, { "id": format!("{OBO}HP_2") }],
            "edges": [{ "sub": format!("{OBO}HP_1"), "pred": "is_a", "obj": format!("{OBO}HP_2") }]
        }]});

        let mondo = Loader::new().load_value(doc.clone()).unwrap();
        assert!(mondo.get("HP_1").unwrap().parents.is_empty());

        let hp = Loader::new().with_namespace("HP").load_value(doc).unwrap();
        assert!(hp.get("HP_1").unwrap().parents.contains("HP_2"));
    }
}
