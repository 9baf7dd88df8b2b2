//! Adverts: bundles of actions an object offers to agents

use serde::{Deserialize, Serialize};

use crate::actions::action::Action;
use crate::entity::agent::Agent;
use crate::entity::needs::NeedVector;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Advert {
    pub name: String,
    /// Performed in order once the advert is chosen
    pub actions: Vec<Action>,
}

impl Advert {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Aggregate cost of performing every action in the advert
    pub fn collect_costs(&self) -> NeedVector {
        self.actions.iter().map(|a| a.costs).sum()
    }

    /// Offered to an agent only if it can perform every action
    pub fn can_select(&self, agent: &Agent) -> bool {
        self.actions.iter().all(|a| a.can_perform(agent))
    }

    /// Total simulated duration
    pub fn duration(&self) -> f64 {
        self.actions.iter().map(|a| a.duration).sum()
    }
}
