//! Runtime entities: the shared entity record and physical objects

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::actions::Advert;
use crate::core::types::{EntityId, Seconds, Vec2};
use crate::entity::predicates::PredicateValue;
use crate::ontology::{PredicateKind, RelationKind, Relations};

/// What an entity holds, by slot name. An empty slot is `None`.
pub type Possessions = BTreeMap<String, Option<Object>>;

/// Anything with a name, a description and predicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub relations: Relations,
    /// `None` when the entity has no `has` predicate at all
    pub has: Option<Possessions>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            description: String::new(),
            relations: Relations::default(),
            has: None,
        }
    }

    /// Current value of a predicate, or `None` if the entity lacks it
    pub fn predicate(&self, kind: PredicateKind) -> Option<PredicateValue> {
        match kind {
            PredicateKind::HasQuality => {
                if self.relations.qualities.is_empty() {
                    None
                } else {
                    Some(PredicateValue::Qualities(self.relations.qualities.clone()))
                }
            }
            PredicateKind::Has => self.has.as_ref().map(PredicateValue::from_possessions),
            _ => {
                let relation: RelationKind = kind.relation()?;
                let targets = self.relations.targets(relation);
                if targets.is_empty() {
                    None
                } else {
                    Some(PredicateValue::Concepts(targets.to_vec()))
                }
            }
        }
    }

    /// Deep copy with fresh identifiers, including everything held
    pub fn fresh_copy(&self) -> Self {
        Self {
            id: EntityId::new(),
            name: self.name.clone(),
            description: self.description.clone(),
            relations: self.relations.clone(),
            has: self.has.as_ref().map(|possessions| {
                possessions
                    .iter()
                    .map(|(slot, held)| (slot.clone(), held.as_ref().map(Object::fresh_copy)))
                    .collect()
            }),
        }
    }

    /// Object held in a possession slot
    pub fn held(&self, slot: &str) -> Option<&Object> {
        self.has.as_ref()?.get(slot)?.as_ref()
    }
}

/// A physical entity that can project adverts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub entity: Entity,
    /// Elapsed simulated time since creation
    pub age: Seconds,
    pub position: Vec2,
    pub mass: f32,
    pub adverts: Vec<Advert>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(name),
            age: 0.0,
            position: Vec2::ZERO,
            mass: 0.0,
            adverts: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_advert(mut self, advert: Advert) -> Self {
        self.adverts.push(advert);
        self
    }

    pub fn fresh_copy(&self) -> Self {
        Self {
            entity: self.entity.fresh_copy(),
            ..self.clone()
        }
    }
}

/// Which capability set a physical entity carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Object,
    Agent,
}

/// Common interface over objects and agents
pub trait Physical {
    fn object(&self) -> &Object;
    fn object_mut(&mut self) -> &mut Object;
    fn kind(&self) -> EntityKind;

    fn entity(&self) -> &Entity {
        &self.object().entity
    }

    fn id(&self) -> EntityId {
        self.object().entity.id
    }

    fn name(&self) -> &str {
        &self.object().entity.name
    }

    fn position(&self) -> Vec2 {
        self.object().position
    }

    /// Advance this entity's age
    fn grow_older(&mut self, seconds: Seconds) {
        self.object_mut().age += seconds;
    }
}

impl Physical for Object {
    fn object(&self) -> &Object {
        self
    }

    fn object_mut(&mut self) -> &mut Object {
        self
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Object
    }
}
