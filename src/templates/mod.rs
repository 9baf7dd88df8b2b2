//! Template system: blueprints that produce runtime objects and agents

pub mod instantiate;
pub mod schema;
pub mod store;

pub use schema::parse_object_reference;
pub use store::{AgentTemplate, ObjectTemplate, TemplateStore};
