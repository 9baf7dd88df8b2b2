//! Building runtime objects and agents from templates

use super::store::TemplateStore;
use crate::core::error::{OntologyError, Result};
use crate::entity::agent::Agent;
use crate::entity::object::{Entity, Object, Possessions};

impl TemplateStore {
    /// Create a fresh object from the named object template
    ///
    /// Referenced possessions are instantiated recursively, each with its own
    /// identity. A missing nested template leaves its slot empty.
    pub fn instantiate_object(&self, name: &str) -> Result<Object> {
        let mut stack = Vec::new();
        self.build_object(name, &mut stack)
    }

    fn build_object(&self, name: &str, stack: &mut Vec<String>) -> Result<Object> {
        let template = self
            .objects
            .get(name)
            .ok_or_else(|| OntologyError::MissingTemplate(name.to_string()))?;

        if stack.iter().any(|s| s == name) {
            return Err(OntologyError::CyclicTemplate(name.to_string()));
        }
        stack.push(name.to_string());

        let has = match &template.has {
            Some(slots) => {
                let mut possessions = Possessions::new();
                for (slot, target) in slots {
                    let held = match target {
                        Some(target) => match self.build_object(target, stack) {
                            Ok(object) => Some(object),
                            Err(e) => {
                                tracing::warn!(template = name, slot = %slot, "{}", e);
                                None
                            }
                        },
                        None => None,
                    };
                    possessions.insert(slot.clone(), held);
                }
                Some(possessions)
            }
            None => None,
        };

        stack.pop();

        let mut entity = Entity::new(&template.name);
        entity.description = template.description.clone();
        entity.relations = template.relations.clone();
        entity.has = has;

        let mut object = Object::new(&template.name);
        object.entity = entity;
        object.mass = template.mass;
        object.adverts = template.adverts.clone();
        Ok(object)
    }

    /// Create a fresh agent from the named agent template
    ///
    /// Everything the template holds is deep-copied, so no two agents share
    /// a possession.
    pub fn instantiate_agent(&self, name: &str) -> Result<Agent> {
        let template = self
            .agents
            .get(name)
            .ok_or_else(|| OntologyError::MissingTemplate(name.to_string()))?;

        let mut entity = Entity::new(&template.name);
        entity.description = template.description.clone();
        entity.relations = template.relations.clone();
        entity.has = template.has.as_ref().map(|possessions| {
            possessions
                .iter()
                .map(|(slot, held)| (slot.clone(), held.as_ref().map(Object::fresh_copy)))
                .collect()
        });

        let mut object = Object::new(&template.name);
        object.entity = entity;
        object.mass = template.mass;
        object.adverts = template.adverts.clone();

        let mut agent = Agent::from_object(object);
        agent.needs = template.needs;
        Ok(agent)
    }
}
