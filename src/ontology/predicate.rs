//! Predicate kinds understood by the engine
//!
//! Only a fixed set of relations exists. Source attribute names are mapped to
//! these variants once, at load time; nothing downstream compares strings.

use serde::{Deserialize, Serialize};

/// Every predicate an entity or concept can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PredicateKind {
    SubclassOf,
    InstanceOf,
    PartOf,
    HasQuality,
    Has,
}

impl PredicateKind {
    pub const ALL: [PredicateKind; 5] = [
        PredicateKind::SubclassOf,
        PredicateKind::InstanceOf,
        PredicateKind::PartOf,
        PredicateKind::HasQuality,
        PredicateKind::Has,
    ];

    /// Attribute name used in ontology sources
    pub fn key(&self) -> &'static str {
        match self {
            PredicateKind::SubclassOf => "subclass of",
            PredicateKind::InstanceOf => "instance of",
            PredicateKind::PartOf => "part of",
            PredicateKind::HasQuality => "has quality",
            PredicateKind::Has => "has",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        PredicateKind::ALL.into_iter().find(|k| k.key() == key)
    }

    /// The concept-to-concept relation for this kind, if it is one
    pub fn relation(&self) -> Option<RelationKind> {
        match self {
            PredicateKind::SubclassOf => Some(RelationKind::SubclassOf),
            PredicateKind::InstanceOf => Some(RelationKind::InstanceOf),
            PredicateKind::PartOf => Some(RelationKind::PartOf),
            PredicateKind::HasQuality | PredicateKind::Has => None,
        }
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Predicates whose targets are other concepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    SubclassOf,
    InstanceOf,
    PartOf,
}

impl RelationKind {
    pub fn predicate(&self) -> PredicateKind {
        match self {
            RelationKind::SubclassOf => PredicateKind::SubclassOf,
            RelationKind::InstanceOf => PredicateKind::InstanceOf,
            RelationKind::PartOf => PredicateKind::PartOf,
        }
    }
}

/// Concept-level predicates shared by concepts and runtime entities
///
/// Relation targets hold concept names, in declared order. An empty list
/// means the predicate is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    pub subclass_of: Vec<String>,
    pub instance_of: Vec<String>,
    pub part_of: Vec<String>,
    pub qualities: Vec<String>,
}

impl Relations {
    pub fn targets(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::SubclassOf => &self.subclass_of,
            RelationKind::InstanceOf => &self.instance_of,
            RelationKind::PartOf => &self.part_of,
        }
    }

    pub fn set_targets(&mut self, kind: RelationKind, targets: Vec<String>) {
        match kind {
            RelationKind::SubclassOf => self.subclass_of = targets,
            RelationKind::InstanceOf => self.instance_of = targets,
            RelationKind::PartOf => self.part_of = targets,
        }
    }

    pub fn has(&self, kind: RelationKind) -> bool {
        !self.targets(kind).is_empty()
    }

    /// Parents walked by inheritance queries: instance-of first, then subclass-of
    pub fn parents(&self) -> impl Iterator<Item = &String> {
        self.instance_of.iter().chain(self.subclass_of.iter())
    }
}
