//! World state: the registry, the live population and the simulated clock

use std::sync::Arc;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Seconds, Tick, Vec2};
use crate::entity::agent::Agent;
use crate::entity::object::{Object, Physical};
use crate::world::registry::Registry;

/// Everything the scheduler reads and mutates
///
/// Objects are visible to every agent; agents only act on their own state.
pub struct World {
    pub registry: Arc<Registry>,
    pub config: SimulationConfig,
    pub objects: Vec<Object>,
    pub agents: Vec<Agent>,
    pub current_tick: Tick,
    /// Simulated seconds since the world started
    pub elapsed: Seconds,
}

impl World {
    pub fn new(registry: Arc<Registry>, config: SimulationConfig) -> Self {
        Self {
            registry,
            config,
            objects: Vec::new(),
            agents: Vec::new(),
            current_tick: 0,
            elapsed: 0.0,
        }
    }

    /// Instantiate an object template at a position
    pub fn spawn_object(&mut self, template: &str, position: Vec2) -> Result<EntityId> {
        let object = self
            .registry
            .templates
            .instantiate_object(template)?
            .with_position(position);
        Ok(self.add_object(object))
    }

    /// Instantiate an agent template at a position
    pub fn spawn_agent(&mut self, template: &str, position: Vec2) -> Result<EntityId> {
        let mut agent = self.registry.templates.instantiate_agent(template)?;
        agent.object.position = position;
        Ok(self.add_agent(agent))
    }

    pub fn add_object(&mut self, object: Object) -> EntityId {
        let id = object.id();
        tracing::debug!(object = %object.name(), %id, "object added");
        self.objects.push(object);
        id
    }

    pub fn add_agent(&mut self, agent: Agent) -> EntityId {
        let id = agent.id();
        tracing::debug!(agent = %agent.name(), %id, "agent added");
        self.agents.push(agent);
        id
    }

    pub fn object(&self, id: EntityId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn agent_mut(&mut self, id: EntityId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    /// Advance the clock by one tick
    pub(crate) fn advance_clock(&mut self) {
        self.current_tick += 1;
        self.elapsed += self.config.seconds_per_tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::OntologyError;

    fn world() -> World {
        let (registry, _) = Registry::from_json_str(
            r#"{
                "concepts": { "apple": {}, "human": {} },
                "templates": {
                    "objects": { "apple": {} },
                    "agents": { "human": { "needs": { "food": 0.5 } } }
                }
            }"#,
        )
        .unwrap();
        World::new(Arc::new(registry), SimulationConfig::default())
    }

    #[test]
    fn test_spawn_places_entities() {
        let mut world = world();
        let apple = world.spawn_object("apple", Vec2::new(1.0, 2.0)).unwrap();
        let human = world.spawn_agent("human", Vec2::new(3.0, 2.0)).unwrap();

        assert_eq!(world.object(apple).unwrap().position, Vec2::new(1.0, 2.0));
        assert_eq!(world.agent(human).unwrap().position(), Vec2::new(3.0, 2.0));
        assert!(world.agent(apple).is_none());
    }

    #[test]
    fn test_spawn_unknown_template() {
        let mut world = world();
        assert!(matches!(
            world.spawn_object("pear", Vec2::ZERO),
            Err(OntologyError::MissingTemplate(_))
        ));
        assert!(world.objects.is_empty());
    }

    #[test]
    fn test_clock_advances_by_tick_length() {
        let mut world = world();
        world.config.seconds_per_tick = 60.0;
        world.advance_clock();
        world.advance_clock();
        assert_eq!(world.current_tick, 2);
        assert_eq!(world.elapsed, 120.0);
    }
}
