pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub use config::{NeedDecay, SimulationConfig};
pub use error::{LoadReport, OntologyError, Result};
