//! Tick system - orchestrates simulation updates
//!
//! One tick runs: passive need decay -> queue progress or advert selection
//! -> ageing -> clock advance. Agents are processed one at a time and only
//! ever mutate their own state.

use crate::core::types::Tick;
use crate::entity::agent::{Agent, Memory};
use crate::entity::object::Physical;
use crate::simulation::action_select::select_advert;
use crate::world::World;

/// Events generated during a simulation tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// An idle agent chose an advert and queued its actions
    AdvertSelected {
        tick: Tick,
        agent: String,
        object: String,
        advert: String,
        score: f32,
        /// Number of actions pushed onto the queue
        actions: usize,
    },
    /// The head of an agent's queue finished and its cost was applied
    ActionCompleted {
        tick: Tick,
        agent: String,
        action: String,
        object: String,
    },
    /// Nothing worth doing; the agent stays idle
    Idle { tick: Tick, agent: String },
}

/// Advance the world by one tick and report what happened
pub fn advance_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    decay_needs(world);
    for index in 0..world.agents.len() {
        step_agent(world, index, &mut events);
    }
    age_entities(world);
    world.advance_clock();

    events
}

/// Run `ticks` ticks, collecting every event
pub fn run_ticks(world: &mut World, ticks: u64) -> Vec<SimulationEvent> {
    (0..ticks).flat_map(|_| advance_tick(world)).collect()
}

/// Passive decay, applied before any action handling
fn decay_needs(world: &mut World) {
    let decay = world.config.decay.over(world.config.seconds_per_tick);
    if decay.is_zero() {
        return;
    }
    for agent in &mut world.agents {
        agent.apply_cost(&decay);
    }
}

fn step_agent(world: &mut World, index: usize, events: &mut Vec<SimulationEvent>) {
    let World {
        agents,
        objects,
        config,
        current_tick,
        ..
    } = world;
    let tick = *current_tick;
    let agent: &mut Agent = &mut agents[index];

    if !agent.action_queue.is_empty() {
        if let Some(done) = agent.action_queue.advance() {
            agent.apply_cost(&done.action.costs);
            tracing::debug!(
                tick,
                agent = %agent.name(),
                action = %done.action.name,
                object = %done.source,
                "action completed"
            );
            agent.remember(Memory {
                tick,
                action: done.action.name.clone(),
                object: done.source.clone(),
            });
            events.push(SimulationEvent::ActionCompleted {
                tick,
                agent: agent.name().to_string(),
                action: done.action.name,
                object: done.source,
            });
        }
        return;
    }

    let Some(selection) = select_advert(agent, objects, config) else {
        tracing::trace!(tick, agent = %agent.name(), "idle");
        events.push(SimulationEvent::Idle {
            tick,
            agent: agent.name().to_string(),
        });
        return;
    };

    let object = &objects[selection.object_index];
    let advert = &object.adverts[selection.advert_index];
    for action in &advert.actions {
        let ticks = config.ticks_for(action.duration);
        agent
            .action_queue
            .push(action.clone(), ticks, object.name());
    }

    tracing::debug!(
        tick,
        agent = %agent.name(),
        object = %object.name(),
        advert = %advert.name,
        score = selection.score,
        "advert selected"
    );
    events.push(SimulationEvent::AdvertSelected {
        tick,
        agent: agent.name().to_string(),
        object: object.name().to_string(),
        advert: advert.name.clone(),
        score: selection.score,
        actions: advert.actions.len(),
    });
}

fn age_entities(world: &mut World) {
    let seconds = world.config.seconds_per_tick;
    for object in &mut world.objects {
        object.grow_older(seconds);
    }
    for agent in &mut world.agents {
        agent.grow_older(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, Advert};
    use crate::core::config::{NeedDecay, SimulationConfig};
    use crate::core::types::Vec2;
    use crate::entity::needs::{NeedType, NeedVector};
    use crate::entity::object::Object;
    use crate::world::Registry;
    use std::sync::Arc;

    fn world_without_decay() -> World {
        let config = SimulationConfig {
            decay: NeedDecay::none(),
            ..Default::default()
        };
        World::new(Arc::new(Registry::default()), config)
    }

    fn two_step_object() -> Object {
        Object::new("bed").with_position(Vec2::new(1.0, 0.0)).with_advert(
            Advert::new("rest")
                .with_action(Action::new(
                    "lie down",
                    2.0,
                    NeedVector::from_pairs(&[(NeedType::Mood, 0.1)]),
                ))
                .with_action(Action::new(
                    "sleep",
                    1.0,
                    NeedVector::from_pairs(&[(NeedType::Sleep, 0.8)]),
                )),
        )
    }

    #[test]
    fn test_actions_run_in_order() {
        let mut world = world_without_decay();
        world.add_object(two_step_object());
        let mut agent = Agent::new("Noe");
        agent.needs.set(NeedType::Sleep, 0.1);
        world.add_agent(agent);

        let events = advance_tick(&mut world);
        assert!(matches!(
            &events[0],
            SimulationEvent::AdvertSelected { advert, actions: 2, .. } if advert == "rest"
        ));
        assert_eq!(world.agents[0].action_queue.len(), 2);

        let events = run_ticks(&mut world, 3);
        let completed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SimulationEvent::ActionCompleted { action, .. } => Some(action.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(completed, vec!["lie down", "sleep"]);

        let agent = &world.agents[0];
        assert!(agent.action_queue.is_empty());
        assert!((agent.needs.get(NeedType::Sleep) - 0.9).abs() < 1e-6);
        assert_eq!(agent.memories.len(), 2);
        assert_eq!(agent.memories[0].object, "bed");
    }

    #[test]
    fn test_zero_duration_action_completes_on_first_executing_tick() {
        let mut world = world_without_decay();
        world.add_object(
            Object::new("button").with_position(Vec2::new(1.0, 0.0)).with_advert(
                Advert::new("press").with_action(Action::new(
                    "press",
                    0.0,
                    NeedVector::from_pairs(&[(NeedType::Mood, 0.2)]),
                )),
            ),
        );
        let mut agent = Agent::new("Noe");
        agent.needs.set(NeedType::Mood, 0.5);
        world.add_agent(agent);

        advance_tick(&mut world);
        let events = advance_tick(&mut world);
        assert!(matches!(&events[0], SimulationEvent::ActionCompleted { tick: 1, .. }));
        assert!((world.agents[0].needs.get(NeedType::Mood) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_idle_without_objects() {
        let mut world = world_without_decay();
        world.add_agent(Agent::new("Noe"));

        let events = advance_tick(&mut world);
        assert_eq!(
            events,
            vec![SimulationEvent::Idle {
                tick: 0,
                agent: "Noe".into()
            }]
        );
    }

    #[test]
    fn test_decay_runs_before_selection() {
        let mut world = world_without_decay();
        world.config.decay.food = -0.25;
        world.add_agent(Agent::new("Noe"));

        run_ticks(&mut world, 2);
        assert!((world.agents[0].needs.get(NeedType::Food) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clock_and_ageing() {
        let mut world = world_without_decay();
        world.config.seconds_per_tick = 30.0;
        world.add_object(Object::new("rock"));
        world.add_agent(Agent::new("Noe"));

        run_ticks(&mut world, 4);
        assert_eq!(world.current_tick, 4);
        assert_eq!(world.elapsed, 120.0);
        assert_eq!(world.objects[0].age, 120.0);
        assert_eq!(world.agents[0].object.age, 120.0);
    }
}
