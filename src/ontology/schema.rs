//! Concept attribute schema
//!
//! Raw source values are parsed into [`ConceptAttribute`] variants up front.
//! An unknown attribute name or a value of the wrong shape is the only way
//! parsing fails, and both are recoverable for the caller.

use serde_json::Value;

use super::predicate::{PredicateKind, RelationKind};
use crate::core::error::{OntologyError, Result};

/// A parsed concept attribute
#[derive(Debug, Clone, PartialEq)]
pub enum ConceptAttribute {
    Description(String),
    Plural(String),
    Relation(RelationKind, Vec<String>),
    Qualities(Vec<String>),
}

/// Parse one `key: value` pair from a concept's attribute table
pub fn parse_concept_attribute(
    concept: &str,
    key: &str,
    value: &Value,
) -> Result<ConceptAttribute> {
    let context = || format!("concept '{}'", concept);

    match key {
        "desc" => value
            .as_str()
            .map(|s| ConceptAttribute::Description(s.to_string()))
            .ok_or_else(|| OntologyError::invalid(context(), key, "a string")),
        "plural" => value
            .as_str()
            .map(|s| ConceptAttribute::Plural(s.to_string()))
            .ok_or_else(|| OntologyError::invalid(context(), key, "a string")),
        _ => match PredicateKind::parse(key) {
            Some(PredicateKind::HasQuality) => string_or_list(value)
                .map(ConceptAttribute::Qualities)
                .ok_or_else(|| {
                    OntologyError::invalid(context(), key, "a string or an array of strings")
                }),
            Some(kind) => match kind.relation() {
                Some(relation) => string_or_list(value)
                    .map(|targets| ConceptAttribute::Relation(relation, targets))
                    .ok_or_else(|| {
                        OntologyError::invalid(context(), key, "a string or an array of strings")
                    }),
                // `has` is an instance-level fact, concepts cannot own things
                None => Err(OntologyError::unknown_attribute(context(), key)),
            },
            None => Err(OntologyError::unknown_attribute(context(), key)),
        },
    }
}

/// Accept either `"name"` or `["a", "b"]`
pub(crate) fn string_or_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}
