//! Integration tests for loading ontology sources into a registry

use std::path::PathBuf;

use ontology_agents::core::error::OntologyError;
use ontology_agents::core::time::{ONE_HOUR, ONE_MINUTE};
use ontology_agents::entity::{NeedType, Physical, PredicateValue};
use ontology_agents::ontology::{PredicateKind, RelationKind};
use ontology_agents::world::{OntologySource, Registry};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn test_load_bundled_ontology() {
    let (registry, report) = Registry::load(&[data_path("ontology.json")]).unwrap();
    assert!(report.is_clean(), "unexpected skips: {:?}", report.skipped);

    let concepts = &registry.concepts;
    assert!(concepts.is_a("apple", "food"));
    assert!(concepts.is_a("human", "thing"));
    assert!(concepts.has_quality("apple", "edible"));
    assert!(concepts.has_quality("human", "mass"));
    assert!(!concepts.has_quality("bed", "edible"));
    assert_eq!(concepts.get("apple").unwrap().plural.as_deref(), Some("apples"));
    assert_eq!(
        concepts.ancestors("apple"),
        vec!["fruit", "food", "physical object", "thing"]
    );

    let bed = registry.templates.object_template("bed").unwrap();
    let rest = &bed.adverts[0];
    assert_eq!(rest.name, "rest");
    assert_eq!(rest.actions.len(), 2);
    assert_eq!(rest.duration(), 10.0 + 8.0 * ONE_HOUR);

    let apple = registry.templates.object_template("apple").unwrap();
    assert_eq!(apple.adverts[0].actions[0].duration, 5.0 * ONE_MINUTE);
}

#[test]
fn test_config_file_loads() {
    use ontology_agents::core::config::SimulationConfig;

    let config = SimulationConfig::load(&data_path("config.toml")).unwrap();
    assert_eq!(config.seconds_per_tick, 60.0);
    assert_eq!(config.ticks_for(5.0 * ONE_MINUTE), 5);
    assert!(config.decay.food < 0.0);
}

#[test]
fn test_round_trip_reproduces_declared_structure() {
    let (registry, _) = Registry::load(&[data_path("ontology.json")]).unwrap();
    let human = registry.templates.instantiate_agent("human").unwrap();

    assert_eq!(human.name(), "human");
    assert_eq!(
        human.entity().predicate(PredicateKind::InstanceOf),
        Some(PredicateValue::Concepts(vec!["human".into()]))
    );
    assert_eq!(
        human.entity().predicate(PredicateKind::HasQuality),
        Some(PredicateValue::Qualities(vec!["curious".into()]))
    );

    let left = human.entity().held("left hand").unwrap();
    let right = human.entity().held("right hand").unwrap();
    assert_eq!(left.name(), "hand");
    assert_eq!(right.name(), "hand");
    assert_ne!(left.entity.id, right.entity.id);
    assert!(left.entity.has.as_ref().unwrap().contains_key("grip"));
    assert!(left.entity.held("grip").is_none());

    assert!((human.needs.get(NeedType::Food) - 0.4).abs() < 1e-6);
    assert_eq!(human.needs.get(NeedType::Mood), 1.0);

    // Runtime entities answer quality queries through their concept
    assert!(registry
        .concepts
        .entity_has_quality(&human.entity().relations, "alive"));
    assert!(registry
        .concepts
        .entity_has_quality(&human.entity().relations, "curious"));
}

#[test]
fn test_forward_reference_to_undeclared_concept() {
    let (registry, report) = Registry::from_json_str(
        r#"{ "concepts": { "B": { "subclass of": "A", "has quality": "solid" } } }"#,
    )
    .unwrap();

    assert_eq!(report.len(), 1);
    assert!(matches!(
        &report.skipped[0],
        OntologyError::UnresolvedReference { concept, target, .. }
            if concept == "B" && target == "A"
    ));

    let b = registry.concepts.get("B").unwrap();
    assert!(!b.relations.has(RelationKind::SubclassOf));
    assert!(!registry.concepts.has_quality("B", "heavy"));
    assert!(registry.concepts.has_quality("B", "solid"));
}

#[test]
fn test_duplicate_concept_aborts_load() {
    let a = OntologySource::from_json_str(r#"{ "concepts": { "apple": {} } }"#).unwrap();
    let b = OntologySource::from_json_str(r#"{ "concepts": { "apple": {} } }"#).unwrap();
    assert!(matches!(
        Registry::from_sources([a, b]),
        Err(OntologyError::DuplicateConcept(name)) if name == "apple"
    ));
}

#[test]
fn test_bad_entries_are_skipped_not_fatal() {
    let (registry, report) = Registry::from_json_str(
        r#"{
            "concepts": {
                "apple": { "colour": "red" },
                "pear": {}
            },
            "templates": {
                "actions": {
                    "nibble": { "time": { "fortnights": 1 }, "costs": { "thirst": 0.1 } }
                },
                "objects": {
                    "apple": { "adverts": { "eat": { "action": "munch" } } },
                    "banana": {},
                    "pear": { "adverts": { "nibble": { "action": "nibble" } } }
                },
                "agents": {
                    "ghost": {}
                }
            }
        }"#,
    )
    .unwrap();

    assert!(report
        .matching(|e| matches!(
            e,
            OntologyError::UnknownAttribute { attribute, .. } if attribute == "colour"
        ))
        .next()
        .is_some());
    assert!(report
        .matching(|e| matches!(e, OntologyError::MissingTemplate(n) if n == "munch"))
        .next()
        .is_some());
    assert!(report
        .matching(|e| matches!(e, OntologyError::UnknownConcept(n) if n == "banana"))
        .next()
        .is_some());
    assert!(report
        .matching(|e| matches!(e, OntologyError::UnknownConcept(n) if n == "ghost"))
        .next()
        .is_some());

    // Everything else still loaded
    assert!(registry.templates.object_template("apple").is_some());
    assert!(registry.templates.object_template("banana").is_none());
    let nibble = registry.templates.action("nibble").unwrap();
    assert_eq!(nibble.duration, 0.0);
    assert!(nibble.costs.is_zero());
    assert_eq!(
        registry.templates.object_template("pear").unwrap().adverts[0].actions[0].name,
        "nibble"
    );
}

#[test]
fn test_unsupported_extension() {
    let err = Registry::load(&["ontology.yaml"]).unwrap_err();
    assert!(matches!(err, OntologyError::UnsupportedFormat(_)));
}
