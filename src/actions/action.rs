//! Actions and their eligibility requirements

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Seconds;
use crate::entity::agent::Agent;
use crate::entity::needs::NeedVector;
use crate::entity::predicates::PredicateValue;
use crate::entity::object::Physical;
use crate::ontology::PredicateKind;

/// Predicate-equality conditions an agent must meet to perform an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements(pub BTreeMap<PredicateKind, PredicateValue>);

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: PredicateKind, value: PredicateValue) -> Self {
        self.0.insert(kind, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every required predicate is present on the agent with an equal value
    pub fn satisfied_by(&self, agent: &Agent) -> bool {
        self.0.iter().all(|(kind, required)| {
            agent
                .entity()
                .predicate(*kind)
                .is_some_and(|actual| actual == *required)
        })
    }
}

/// A timed, cost-bearing unit of behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    /// Duration in simulated seconds
    pub duration: Seconds,
    /// Signed change to each need, applied when the action completes
    pub costs: NeedVector,
    pub requirements: Requirements,
}

impl Action {
    pub fn new(name: impl Into<String>, duration: Seconds, costs: NeedVector) -> Self {
        Self {
            name: name.into(),
            duration,
            costs,
            requirements: Requirements::default(),
        }
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// An agent missing a required predicate is not eligible
    pub fn can_perform(&self, agent: &Agent) -> bool {
        self.requirements.satisfied_by(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::needs::NeedType;

    fn eat() -> Action {
        Action::new(
            "eat",
            30.0,
            NeedVector::from_pairs(&[(NeedType::Food, 0.3)]),
        )
    }

    fn human() -> Agent {
        let mut agent = Agent::new("human");
        agent.object.entity.relations.instance_of = vec!["human".into()];
        agent
    }

    #[test]
    fn test_no_requirements_always_eligible() {
        assert!(eat().can_perform(&human()));
    }

    #[test]
    fn test_matching_requirement() {
        let action = eat().with_requirements(Requirements::new().with(
            PredicateKind::InstanceOf,
            PredicateValue::Concepts(vec!["human".into()]),
        ));
        assert!(action.can_perform(&human()));
    }

    #[test]
    fn test_mismatched_requirement() {
        let action = eat().with_requirements(Requirements::new().with(
            PredicateKind::InstanceOf,
            PredicateValue::Concepts(vec!["horse".into()]),
        ));
        assert!(!action.can_perform(&human()));
    }

    #[test]
    fn test_missing_predicate_is_ineligible() {
        let action = eat().with_requirements(Requirements::new().with(
            PredicateKind::HasQuality,
            PredicateValue::Qualities(vec!["hungry".into()]),
        ));
        assert!(!action.can_perform(&human()));
    }
}
