//! Ontology Agents - need-driven agents over an ontology of concepts
//!
//! Concepts and templates are loaded once into a [`world::Registry`]; agents
//! instantiated from templates score the adverts projected by nearby objects
//! and execute the winning actions tick by tick.

pub mod actions;
pub mod core;
pub mod entity;
pub mod ontology;
pub mod simulation;
pub mod templates;
pub mod world;
