//! Advert scoring and selection - how an idle agent picks what to do next

use crate::actions::Advert;
use crate::core::config::SimulationConfig;
use crate::entity::agent::Agent;
use crate::entity::needs::{NeedType, NEED_COUNT};
use crate::entity::object::{Object, Physical};

/// The winning (object, advert) pair for an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub object_index: usize,
    pub advert_index: usize,
    pub score: f32,
}

/// Score how attractive an advert is to an agent
///
/// Each need slot contributes `c / (c * (c + need) + ε)` for the advert's
/// aggregate cost `c`, so costs that refill a scarce need weigh the most.
/// The slot mean is divided by the squared distance to the object.
pub fn score_advert(
    agent: &Agent,
    advert: &Advert,
    object: &Object,
    config: &SimulationConfig,
) -> f32 {
    let costs = advert.collect_costs();

    let total: f32 = NeedType::ALL
        .iter()
        .map(|&need| {
            let c = costs[need];
            c / (c * (c + agent.needs.get(need)) + config.score_epsilon)
        })
        .sum();
    let mean = total / NEED_COUNT as f32;

    let distance_squared = agent
        .position()
        .distance_squared(object.position)
        .max(config.min_distance_squared);

    mean / distance_squared
}

/// Pick the best advert among every object's adverts
///
/// Only adverts whose actions the agent can all perform are considered.
/// The strict maximum wins and ties keep the first pair in object then
/// advert order. Returns `None` when nothing scores above zero.
pub fn select_advert(
    agent: &Agent,
    objects: &[Object],
    config: &SimulationConfig,
) -> Option<Selection> {
    let mut best: Option<Selection> = None;

    for (object_index, object) in objects.iter().enumerate() {
        for (advert_index, advert) in object.adverts.iter().enumerate() {
            if !advert.can_select(agent) {
                continue;
            }

            let score = score_advert(agent, advert, object, config);
            let threshold = best.map_or(0.0, |b| b.score);
            // NaN never compares greater
            if score > threshold {
                best = Some(Selection {
                    object_index,
                    advert_index,
                    score,
                });
            }
        }
    }

    best
}
