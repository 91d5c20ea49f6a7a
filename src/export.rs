//! Plain-text dump of a loaded ontology.
//!
//! One record per concept, in the `Display` format of [`ConceptNode`],
//! separated by blank lines and ordered by id so that two dumps of the same
//! source diff cleanly.
//!
//! ```text
//! id: MONDO_0000001
//! name: disease or disorder
//! synonyms
//! --disease	EXACT	[NCIT:C2991]
//! xrefs
//! --DOID:4
//! ```

use std::io::Write;

use crate::graph::Graph;
use crate::model::ConceptNode;
use crate::Result;

/// Write every concept of `graph` to `writer`.
pub fn write_concepts(graph: &Graph, writer: &mut dyn Write) -> Result<()> {
    let mut nodes: Vec<&ConceptNode> = graph.values().collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "{node}")?;
    }
    Ok(())
}
