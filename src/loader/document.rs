//! Serde mirror of the obographs JSON document.
//!
//! Only the fields the loader reads are modelled; everything else in the
//! source file is ignored. Optional fields default to empty so that a sparse
//! record degrades to an empty value instead of failing deserialization.

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Top-level document. `graphs` is optional here so that its absence is
/// reported as [`Error::MalformedDocument`](crate::Error::MalformedDocument)
/// rather than a generic JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub graphs: Option<Vec<RawGraph>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub lbl: Option<String>,
    #[serde(default)]
    pub meta: Option<RawMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMeta {
    #[serde(default)]
    pub synonyms: Option<Vec<RawSynonym>>,
    #[serde(default)]
    pub xrefs: Option<Vec<RawXref>>,
    /// Kept untyped: the flag is evaluated for truthiness.
    #[serde(default)]
    pub deprecated: Option<JsonValue>,
}

impl RawMeta {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.as_ref().is_some_and(is_truthy)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSynonym {
    pub val: String,
    pub pred: String,
    #[serde(default)]
    pub xrefs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawXref {
    pub val: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub sub: String,
    pub pred: String,
    pub obj: String,
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
    }
}
