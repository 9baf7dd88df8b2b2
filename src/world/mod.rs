//! Registry loading and live world state

pub mod registry;
pub mod state;

pub use registry::{OntologySource, Registry, SourceFormat, TemplateSources};
pub use state::World;
