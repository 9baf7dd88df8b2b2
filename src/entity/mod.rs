pub mod agent;
pub mod needs;
pub mod object;
pub mod predicates;

pub use agent::{Agent, AgentState, Memory};
pub use needs::{NeedType, NeedVector, Needs, NEED_COUNT};
pub use object::{Entity, EntityKind, Object, Physical, Possessions};
pub use predicates::PredicateValue;
