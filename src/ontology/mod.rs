//! Ontology: concepts, their relations, and inheritance queries

pub mod graph;
pub mod predicate;
pub mod schema;

pub use graph::{Concept, ConceptGraph};
pub use predicate::{PredicateKind, RelationKind, Relations};
pub use schema::{parse_concept_attribute, ConceptAttribute};
