//! Per-agent queue of in-progress actions

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::actions::action::Action;

/// An action waiting to finish, with the ticks it still needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedAction {
    pub action: Action,
    pub remaining_ticks: u64,
    /// Name of the object whose advert supplied the action
    pub source: String,
}

/// FIFO of actions; only the head makes progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    queued: VecDeque<QueuedAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            queued: VecDeque::new(),
        }
    }

    pub fn push(&mut self, action: Action, ticks: u64, source: impl Into<String>) {
        self.queued.push_back(QueuedAction {
            action,
            remaining_ticks: ticks,
            source: source.into(),
        });
    }

    pub fn current(&self) -> Option<&QueuedAction> {
        self.queued.front()
    }

    /// Spend one tick on the head entry
    ///
    /// Returns the entry once its remaining ticks reach zero.
    pub fn advance(&mut self) -> Option<QueuedAction> {
        let head = self.queued.front_mut()?;
        head.remaining_ticks = head.remaining_ticks.saturating_sub(1);
        if head.remaining_ticks == 0 {
            self.queued.pop_front()
        } else {
            None
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedAction> {
        self.queued.iter()
    }
}
