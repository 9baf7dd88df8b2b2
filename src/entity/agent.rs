//! Agents: objects with needs and an action queue

use serde::{Deserialize, Serialize};

use crate::actions::ActionQueue;
use crate::core::types::Tick;
use crate::entity::needs::{NeedVector, Needs};
use crate::entity::object::{EntityKind, Object, Physical};

/// Something an agent remembers doing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub tick: Tick,
    pub action: String,
    pub object: String,
}

/// Scheduler-visible agent state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    /// Nothing queued; the next tick selects an advert
    Idle,
    /// Draining the action queue
    Executing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub object: Object,
    pub needs: Needs,
    pub action_queue: ActionQueue,
    pub memories: Vec<Memory>,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_object(Object::new(name))
    }

    pub fn from_object(object: Object) -> Self {
        Self {
            object,
            needs: Needs::satisfied(),
            action_queue: ActionQueue::new(),
            memories: Vec::new(),
        }
    }

    /// Add a cost vector to the agent's needs, saturating to [0, 1]
    pub fn apply_cost(&mut self, cost: &NeedVector) {
        self.needs.apply(cost);
    }

    pub fn state(&self) -> AgentState {
        if self.action_queue.is_idle() {
            AgentState::Idle
        } else {
            AgentState::Executing
        }
    }

    pub fn remember(&mut self, memory: Memory) {
        self.memories.push(memory);
    }

    /// Deep copy with fresh identifiers and its own queue and needs
    pub fn fresh_copy(&self) -> Self {
        Self {
            object: self.object.fresh_copy(),
            needs: self.needs,
            action_queue: self.action_queue.clone(),
            memories: self.memories.clone(),
        }
    }
}

impl Physical for Agent {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Agent
    }
}
