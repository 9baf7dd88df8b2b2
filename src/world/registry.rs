//! Ontology sources and the registry built from them
//!
//! A source is a JSON or TOML document with a `concepts` table and a
//! `templates` table. Several sources merge into one [`Registry`]; loading
//! runs concepts, then requirement templates, then action templates, then
//! object templates, then agent templates.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::error::{LoadReport, OntologyError, Result};
use crate::ontology::ConceptGraph;
use crate::templates::TemplateStore;

/// Serialization syntax of an ontology source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(OntologyError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Raw template tables of a source
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateSources {
    pub reqs: Map<String, Value>,
    pub actions: Map<String, Value>,
    pub objects: Map<String, Value>,
    pub agents: Map<String, Value>,
}

/// One parsed ontology document, before any resolution
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OntologySource {
    pub concepts: Map<String, Value>,
    pub templates: TemplateSources,
}

impl OntologySource {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a source file; the extension decides the syntax
    pub fn load(path: &Path) -> Result<Self> {
        let format = SourceFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        match format {
            SourceFormat::Json => Self::from_json_str(&content),
            SourceFormat::Toml => Self::from_toml_str(&content),
        }
    }

    /// Fold another source into this one
    ///
    /// A concept declared twice is fatal. A template declared twice keeps the
    /// later definition.
    pub fn merge(&mut self, other: OntologySource) -> Result<()> {
        for (name, attributes) in other.concepts {
            if self.concepts.contains_key(&name) {
                return Err(OntologyError::DuplicateConcept(name));
            }
            self.concepts.insert(name, attributes);
        }

        let tables = [
            ("reqs", &mut self.templates.reqs, other.templates.reqs),
            ("actions", &mut self.templates.actions, other.templates.actions),
            ("objects", &mut self.templates.objects, other.templates.objects),
            ("agents", &mut self.templates.agents, other.templates.agents),
        ];
        for (kind, into, from) in tables {
            for (name, data) in from {
                if into.insert(name.clone(), data).is_some() {
                    tracing::debug!(kind, template = %name, "template redefined by later source");
                }
            }
        }
        Ok(())
    }
}

/// Concepts and templates, read-only once loaded
#[derive(Debug, Default)]
pub struct Registry {
    pub concepts: ConceptGraph,
    pub templates: TemplateStore,
}

impl Registry {
    /// Resolve a source into a registry
    ///
    /// Recoverable problems are collected in the returned report.
    pub fn from_source(source: &OntologySource) -> Result<(Self, LoadReport)> {
        let mut report = LoadReport::new();
        let mut registry = Registry::default();

        registry
            .concepts
            .load_concepts(&source.concepts, &mut report)?;

        let templates = &source.templates;
        registry
            .templates
            .load_requirement_templates(&templates.reqs, &mut report);
        registry
            .templates
            .load_action_templates(&templates.actions, &mut report);
        registry
            .templates
            .load_object_templates(&templates.objects, &registry.concepts, &mut report);
        registry
            .templates
            .load_agent_templates(&templates.agents, &registry.concepts, &mut report);

        tracing::info!(
            concepts = registry.concepts.len(),
            actions = registry.templates.action_template_count(),
            objects = registry.templates.object_template_count(),
            agents = registry.templates.agent_template_count(),
            skipped = report.len(),
            "ontology loaded"
        );
        Ok((registry, report))
    }

    /// Merge several sources and resolve them together
    pub fn from_sources(
        sources: impl IntoIterator<Item = OntologySource>,
    ) -> Result<(Self, LoadReport)> {
        let mut merged = OntologySource::default();
        for source in sources {
            merged.merge(source)?;
        }
        Self::from_source(&merged)
    }

    /// Load and merge source files
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<(Self, LoadReport)> {
        let sources = paths
            .iter()
            .map(|p| OntologySource::load(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_sources(sources)
    }

    pub fn from_json_str(content: &str) -> Result<(Self, LoadReport)> {
        Self::from_source(&OntologySource::from_json_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<(Self, LoadReport)> {
        Self::from_source(&OntologySource::from_toml_str(content)?)
    }
}
