//! End-to-end tests for the name and reference indices.

use std::collections::BTreeSet;

use mondo_rs::normalize::{Chain, Lowercase};
use mondo_rs::{build_name_index, build_reference_index, Graph, IdIndex, IndexOptions, Loader, Scope};
use pretty_assertions::assert_eq;
use serde_json::json;

fn lower(s: &str) -> String {
    s.to_lowercase()
}

fn ids(index: &IdIndex, key: &str) -> BTreeSet<String> {
    index.get(key).map(|s| s.iter().cloned().collect()).unwrap_or_default()
}

fn keys(index: &IdIndex) -> BTreeSet<String> {
    index.keys().map(str::to_string).collect()
}

fn sample() -> Graph {
    Loader::new()
        .load_value(json!({ "graphs": [{
            "nodes": [
                {
                    "id": "http://purl.obolibrary.org/obo/MONDO_0000001",
                    "lbl": "Foo",
                    "meta": {
                        "synonyms": [
                            { "pred": "hasExactSynonym", "val": "Foo Disease", "xrefs": ["NCIT:C1"] },
                            { "pred": "hasRelatedSynonym", "val": "fooism", "xrefs": ["PMID:42"] }
                        ],
                        "xrefs": [{ "val": "OMIM:100" }, { "val": "DOID:7" }]
                    }
                },
                {
                    "id": "http://purl.obolibrary.org/obo/MONDO_0000002",
                    "lbl": "Bar",
                    "meta": {
                        "deprecated": true,
                        "synonyms": [{ "pred": "hasExactSynonym", "val": "barism", "xrefs": ["NCIT:C2"] }],
                        "xrefs": [{ "val": "DOID:7" }]
                    }
                },
                {
                    "id": "http://purl.obolibrary.org/obo/MONDO_0000003",
                    "lbl": "foo",
                    "meta": { "xrefs": [{ "val": "DOID:7" }] }
                }
            ],
            "edges": [
                {
                    "sub": "http://purl.obolibrary.org/obo/MONDO_0000001",
                    "pred": "is_a",
                    "obj": "http://purl.obolibrary.org/obo/MONDO_0000002"
                }
            ]
        }]}))
        .unwrap()
}

// ============================================================================
// Name index
// ============================================================================

#[test]
fn test_name_index_default_is_canonical_names_only() {
    let index = build_name_index(&sample(), &lower, &IndexOptions::default());
    assert_eq!(keys(&index), BTreeSet::from(["foo".to_string()]));
    assert_eq!(
        ids(&index, "foo"),
        BTreeSet::from(["MONDO_0000001".to_string(), "MONDO_0000003".to_string()])
    );
    assert!(index.get("bar").is_none());
}

#[test]
fn test_enabling_scopes_only_adds_keys() {
    let graph = sample();
    let base = build_name_index(&graph, &lower, &IndexOptions::default());
    let exact = build_name_index(&graph, &lower, &IndexOptions::new().with_scopes([Scope::Exact]));
    let all = build_name_index(&graph, &lower, &IndexOptions::new().with_scopes(Scope::ALL));

    assert!(keys(&base).is_subset(&keys(&exact)));
    assert!(keys(&exact).is_subset(&keys(&all)));
    assert_eq!(ids(&exact, "foo disease"), BTreeSet::from(["MONDO_0000001".to_string()]));
    assert!(!exact.contains_key("fooism"));
    assert!(all.contains_key("fooism"));
    // Deprecated nodes contribute neither names nor synonyms.
    assert!(!all.contains_key("barism"));
}

#[test]
fn test_allow_deprecated() {
    let index = build_name_index(
        &sample(),
        &lower,
        &IndexOptions::new().with_scopes([Scope::Exact]).allow_deprecated(true),
    );
    assert_eq!(ids(&index, "bar"), BTreeSet::from(["MONDO_0000002".to_string()]));
    assert_eq!(ids(&index, "barism"), BTreeSet::from(["MONDO_0000002".to_string()]));
}

#[test]
fn test_chain_normalizer() {
    let chain = Chain::new().with_rule(Lowercase);
    let index = build_name_index(&sample(), &chain, &IndexOptions::default());
    assert_eq!(index.lookup("FOO", &chain).map(|s| s.len()), Some(2));
}

#[test]
fn test_rebuild_is_idempotent() {
    let graph = sample();
    let options = IndexOptions::new().with_scopes([Scope::Exact, Scope::Related]);
    assert_eq!(
        build_name_index(&graph, &lower, &options),
        build_name_index(&graph, &lower, &options)
    );
}

// ============================================================================
// Reference index
// ============================================================================

#[test]
fn test_reference_index_shared_xref() {
    let index = build_reference_index(&sample(), &IndexOptions::default());
    assert_eq!(
        ids(&index, "DOID:7"),
        BTreeSet::from(["MONDO_0000001".to_string(), "MONDO_0000003".to_string()])
    );
    assert_eq!(keys(&index), BTreeSet::from(["DOID:7".to_string(), "OMIM:100".to_string()]));
}

#[test]
fn test_reference_index_synonym_xrefs_by_scope() {
    let graph = sample();
    let exact = build_reference_index(&graph, &IndexOptions::new().with_scopes([Scope::Exact]));
    assert_eq!(ids(&exact, "NCIT:C1"), BTreeSet::from(["MONDO_0000001".to_string()]));
    assert!(exact.get("PMID:42").is_none());
    assert!(exact.get("NCIT:C2").is_none());

    let everything = build_reference_index(
        &graph,
        &IndexOptions::new().with_scopes(Scope::ALL).allow_deprecated(true),
    );
    assert_eq!(ids(&everything, "PMID:42"), BTreeSet::from(["MONDO_0000001".to_string()]));
    assert_eq!(ids(&everything, "NCIT:C2"), BTreeSet::from(["MONDO_0000002".to_string()]));
    assert_eq!(ids(&everything, "DOID:7").len(), 3);
}

#[test]
fn test_reference_keys_are_not_normalized() {
    let index = build_reference_index(&sample(), &IndexOptions::default());
    assert!(index.get("doid:7").is_none());
    assert!(index.get(" DOID:7").is_none());
}

#[test]
fn test_graph_untouched_by_index_build() {
    let graph = sample();
    let before: Vec<_> = graph.values().cloned().collect();
    let _ = build_name_index(&graph, &lower, &IndexOptions::new().with_scopes(Scope::ALL));
    let _ = build_reference_index(&graph, &IndexOptions::new().with_scopes(Scope::ALL));
    let after: Vec<_> = graph.values().cloned().collect();
    assert_eq!(before, after);
}
