//! Comparable predicate values
//!
//! Action requirements are checked by exact equality against an agent's
//! predicates. Both sides are normalized to [`PredicateValue`] first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::object::Possessions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateValue {
    /// Targets of subclass-of, instance-of or part-of, in declared order
    Concepts(Vec<String>),
    Qualities(Vec<String>),
    /// Possession slots mapped to the name of the held object, if any
    Has(BTreeMap<String, Option<String>>),
}

impl PredicateValue {
    /// Summarize possessions by the names of what is held
    pub fn from_possessions(possessions: &Possessions) -> Self {
        PredicateValue::Has(
            possessions
                .iter()
                .map(|(slot, held)| (slot.clone(), held.as_ref().map(|o| o.entity.name.clone())))
                .collect(),
        )
    }
}
