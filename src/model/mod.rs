//! # Ontology Model
//!
//! Plain data types for one loaded ontology: concepts and their synonyms.
//! These types cross every boundary: loader ↔ graph ↔ index ↔ user.
//!
//! Design rule: no JSON types here. This module is pure data, with no I/O
//! and no state.

pub mod node;
pub mod synonym;

pub use node::ConceptNode;
pub use synonym::{Scope, Synonym};
