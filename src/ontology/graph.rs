//! Concept graph: named concepts and the predicate edges between them

use ahash::{AHashMap, AHashSet};
use serde_json::{Map, Value};

use super::predicate::{RelationKind, Relations};
use super::schema::{parse_concept_attribute, ConceptAttribute};
use crate::core::error::{LoadReport, OntologyError, Result};

/// A named category in the knowledge graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Concept {
    pub name: String,
    pub description: String,
    pub plural: Option<String>,
    pub relations: Relations,
}

impl Concept {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Registry of every declared concept
///
/// Populated once at startup and read-only afterwards. Edges are stored as
/// concept names; every stored target is guaranteed to be declared.
#[derive(Debug, Default)]
pub struct ConceptGraph {
    concepts: AHashMap<String, Concept>,
    /// Declaration order, for stable iteration
    order: Vec<String>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a concept with no attributes yet
    ///
    /// Declaring the same name twice is fatal for the whole load.
    pub fn declare(&mut self, name: &str) -> Result<()> {
        if self.concepts.contains_key(name) {
            return Err(OntologyError::DuplicateConcept(name.to_string()));
        }
        self.concepts.insert(name.to_string(), Concept::new(name));
        self.order.push(name.to_string());
        Ok(())
    }

    /// Declare a concept and resolve its attributes in one step
    ///
    /// Targets must already be declared; use [`ConceptGraph::load_concepts`]
    /// when concepts reference each other.
    pub fn declare_with(
        &mut self,
        name: &str,
        attributes: &Map<String, Value>,
        report: &mut LoadReport,
    ) -> Result<()> {
        self.declare(name)?;
        self.define(name, attributes, report);
        Ok(())
    }

    /// Load a whole `concepts` table
    ///
    /// Every name is declared before any attribute is resolved, so concepts
    /// may reference ones that appear later in the table.
    pub fn load_concepts(
        &mut self,
        concepts: &Map<String, Value>,
        report: &mut LoadReport,
    ) -> Result<()> {
        for name in concepts.keys() {
            self.declare(name)?;
        }

        for (name, attributes) in concepts {
            match attributes {
                Value::Object(attributes) => self.define(name, attributes, report),
                Value::Null => {}
                _ => report.skip(OntologyError::invalid(
                    format!("concept '{}'", name),
                    "attributes",
                    "a table of attributes",
                )),
            }
        }

        tracing::debug!(count = concepts.len(), "concepts loaded");
        Ok(())
    }

    /// Resolve the attributes of an already declared concept
    fn define(&mut self, name: &str, attributes: &Map<String, Value>, report: &mut LoadReport) {
        for (key, value) in attributes {
            let attribute = match parse_concept_attribute(name, key, value) {
                Ok(attribute) => attribute,
                Err(e) => {
                    report.skip(e);
                    continue;
                }
            };

            match attribute {
                ConceptAttribute::Description(desc) => {
                    if let Some(concept) = self.concepts.get_mut(name) {
                        concept.description = desc;
                    }
                }
                ConceptAttribute::Plural(plural) => {
                    if let Some(concept) = self.concepts.get_mut(name) {
                        concept.plural = Some(plural);
                    }
                }
                ConceptAttribute::Relation(kind, targets) => {
                    self.resolve_predicate(name, kind, &targets, report);
                }
                ConceptAttribute::Qualities(qualities) => {
                    if let Some(concept) = self.concepts.get_mut(name) {
                        concept.relations.qualities = qualities;
                    }
                }
            }
        }
    }

    /// Attach a relation to `concept`, keeping only declared targets
    ///
    /// Each undeclared target is reported and dropped; the predicate is left
    /// absent when none resolve. Returns how many targets were kept.
    pub fn resolve_predicate(
        &mut self,
        concept: &str,
        kind: RelationKind,
        targets: &[String],
        report: &mut LoadReport,
    ) -> usize {
        let mut resolved = Vec::with_capacity(targets.len());
        for target in targets {
            if self.is_concept(target) {
                resolved.push(target.clone());
            } else {
                report.skip(OntologyError::UnresolvedReference {
                    concept: concept.to_string(),
                    predicate: kind.predicate().key().to_string(),
                    target: target.clone(),
                });
            }
        }

        let count = resolved.len();
        if let Some(c) = self.concepts.get_mut(concept) {
            c.relations.set_targets(kind, resolved);
        } else {
            report.skip(OntologyError::UnknownConcept(concept.to_string()));
            return 0;
        }
        count
    }

    /// Whether a concept carries a quality, directly or by inheritance
    ///
    /// Searches the concept's own qualities, then its instance-of parents,
    /// then its subclass-of parents, stopping at the first match. A concept
    /// already on the walk is not entered twice, so cyclic graphs terminate.
    pub fn has_quality(&self, concept: &str, quality: &str) -> bool {
        let mut visited = AHashSet::new();
        self.walk_quality(concept, quality, &mut visited)
    }

    /// Quality lookup for anything carrying relations, such as a runtime entity
    pub fn entity_has_quality(&self, relations: &Relations, quality: &str) -> bool {
        if relations.qualities.iter().any(|q| q == quality) {
            return true;
        }
        let mut visited = AHashSet::new();
        relations
            .parents()
            .any(|parent| self.walk_quality(parent, quality, &mut visited))
    }

    fn walk_quality<'a>(
        &'a self,
        name: &'a str,
        quality: &str,
        visited: &mut AHashSet<&'a str>,
    ) -> bool {
        if !visited.insert(name) {
            tracing::debug!(concept = name, "cycle in concept graph, branch skipped");
            return false;
        }
        let Some(concept) = self.concepts.get(name) else {
            return false;
        };

        if concept.relations.qualities.iter().any(|q| q == quality) {
            return true;
        }
        concept
            .relations
            .parents()
            .any(|parent| self.walk_quality(parent, quality, visited))
    }

    /// Every concept reachable through instance-of and subclass-of edges
    ///
    /// Breadth-first, in discovery order, excluding the concept itself.
    pub fn ancestors(&self, concept: &str) -> Vec<String> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        seen.insert(concept);
        let mut found = Vec::new();
        let mut frontier = vec![concept];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for name in frontier {
                let Some(c) = self.concepts.get(name) else {
                    continue;
                };
                for parent in c.relations.parents() {
                    if seen.insert(parent.as_str()) {
                        found.push(parent.clone());
                        next.push(parent.as_str());
                    }
                }
            }
            frontier = next;
        }

        found
    }

    /// Whether `concept` is `ancestor` or inherits from it
    pub fn is_a(&self, concept: &str, ancestor: &str) -> bool {
        concept == ancestor || self.ancestors(concept).iter().any(|a| a == ancestor)
    }

    pub fn is_concept(&self, name: &str) -> bool {
        self.concepts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }

    /// Concepts in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.order.iter().filter_map(|name| self.concepts.get(name))
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(source: Value) -> (ConceptGraph, LoadReport) {
        let mut graph = ConceptGraph::new();
        let mut report = LoadReport::new();
        graph
            .load_concepts(source.as_object().unwrap(), &mut report)
            .unwrap();
        (graph, report)
    }

    fn food_graph() -> ConceptGraph {
        let (graph, report) = load(json!({
            "thing": { "desc": "anything at all", "has quality": ["exists"] },
            "food": { "subclass of": "thing", "has quality": ["edible"] },
            "fruit": { "subclass of": ["food"], "has quality": "sweet" },
            "apple": { "instance of": "fruit", "plural": "apples" },
            "stone": { "subclass of": "thing", "has quality": ["hard"] }
        }));
        assert!(report.is_clean());
        graph
    }

    #[test]
    fn test_forward_references_resolve() {
        let (graph, report) = load(json!({
            "apple": { "instance of": "fruit" },
            "fruit": { "desc": "sweet plant part" }
        }));
        assert!(report.is_clean());
        assert_eq!(graph.get("apple").unwrap().relations.instance_of, vec!["fruit"]);
        assert_eq!(graph.get("fruit").unwrap().description, "sweet plant part");
    }

    #[test]
    fn test_duplicate_concept_is_fatal() {
        let mut graph = ConceptGraph::new();
        graph.declare("apple").unwrap();
        let err = graph.declare("apple").unwrap_err();
        assert!(matches!(err, OntologyError::DuplicateConcept(name) if name == "apple"));
    }

    #[test]
    fn test_declare_with_resolves_declared_targets_only() {
        let mut graph = ConceptGraph::new();
        let mut report = LoadReport::new();
        graph.declare("food").unwrap();

        let apple = json!({ "subclass of": ["food", "fruit"], "has quality": "sweet" });
        graph
            .declare_with("apple", apple.as_object().unwrap(), &mut report)
            .unwrap();

        // "fruit" is not declared yet, so only that edge is dropped
        assert_eq!(report.len(), 1);
        assert!(matches!(
            &report.skipped[0],
            OntologyError::UnresolvedReference { concept, target, .. }
                if concept == "apple" && target == "fruit"
        ));
        let relations = &graph.get("apple").unwrap().relations;
        assert_eq!(relations.subclass_of, vec!["food"]);
        assert_eq!(relations.qualities, vec!["sweet"]);
        assert!(graph.is_a("apple", "food"));

        let err = graph
            .declare_with("apple", &Map::new(), &mut report)
            .unwrap_err();
        assert!(matches!(err, OntologyError::DuplicateConcept(name) if name == "apple"));
        assert_eq!(graph.get("apple").unwrap().relations.subclass_of, vec!["food"]);
    }

    #[test]
    fn test_has_quality_inherits() {
        let graph = food_graph();
        assert!(graph.has_quality("apple", "sweet"));
        assert!(graph.has_quality("apple", "edible"));
        assert!(graph.has_quality("apple", "exists"));
        assert!(!graph.has_quality("apple", "hard"));
        assert!(graph.has_quality("stone", "hard"));
        assert!(!graph.has_quality("stone", "edible"));
        assert!(!graph.has_quality("nonexistent", "edible"));
    }

    #[test]
    fn test_unresolved_reference_drops_predicate() {
        let (graph, report) = load(json!({
            "B": { "subclass of": "A", "has quality": ["b-ish"] }
        }));

        assert_eq!(report.len(), 1);
        assert!(matches!(
            &report.skipped[0],
            OntologyError::UnresolvedReference { target, .. } if target == "A"
        ));

        let b = graph.get("B").unwrap();
        assert!(!b.relations.has(RelationKind::SubclassOf));
        assert!(graph.has_quality("B", "b-ish"));
        assert!(!graph.has_quality("B", "a-ish"));
    }

    #[test]
    fn test_unresolved_list_element_keeps_the_rest() {
        let (graph, report) = load(json!({
            "food": {},
            "apple": { "subclass of": ["food", "ghost"] }
        }));
        assert_eq!(report.len(), 1);
        assert_eq!(graph.get("apple").unwrap().relations.subclass_of, vec!["food"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let (graph, report) = load(json!({
            "chicken": { "subclass of": "egg" },
            "egg": { "subclass of": "chicken", "has quality": ["fragile"] }
        }));
        assert!(report.is_clean());

        assert!(graph.has_quality("chicken", "fragile"));
        assert!(!graph.has_quality("chicken", "feathered"));
        assert_eq!(graph.ancestors("chicken"), vec!["egg"]);
    }

    #[test]
    fn test_ancestors_and_is_a() {
        let graph = food_graph();
        assert_eq!(graph.ancestors("apple"), vec!["fruit", "food", "thing"]);
        assert!(graph.is_a("apple", "food"));
        assert!(graph.is_a("apple", "apple"));
        assert!(!graph.is_a("stone", "food"));
    }

    #[test]
    fn test_entity_has_quality() {
        let graph = food_graph();
        let relations = Relations {
            instance_of: vec!["apple".into()],
            qualities: vec!["bruised".into()],
            ..Default::default()
        };
        assert!(graph.entity_has_quality(&relations, "bruised"));
        assert!(graph.entity_has_quality(&relations, "edible"));
        assert!(!graph.entity_has_quality(&relations, "hard"));
    }

    #[test]
    fn test_bad_attributes_are_skipped() {
        let (graph, report) = load(json!({
            "apple": { "desc": 5, "colour": "red", "has quality": ["edible"] }
        }));
        assert_eq!(report.len(), 2);
        assert!(graph.has_quality("apple", "edible"));
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let graph = food_graph();
        let names: Vec<_> = graph.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["thing", "food", "fruit", "apple", "stone"]);
        assert_eq!(graph.get("apple").unwrap().plural.as_deref(), Some("apples"));
    }
}
