use thiserror::Error;

#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Duplicate concept: {0}")]
    DuplicateConcept(String),

    #[error("Concept '{target}' is referenced by '{concept}' ({predicate}) but was never declared")]
    UnresolvedReference {
        concept: String,
        predicate: String,
        target: String,
    },

    #[error("The name '{0}' does not belong to any loaded concept")]
    UnknownConcept(String),

    #[error("No template registered for '{0}'")]
    MissingTemplate(String),

    #[error("Unknown attribute '{attribute}' in {context}")]
    UnknownAttribute { context: String, attribute: String },

    #[error("Invalid value for '{attribute}' in {context}: expected {expected}")]
    InvalidValue {
        context: String,
        attribute: String,
        expected: String,
    },

    #[error("Template '{0}' refers back to itself through its possessions")]
    CyclicTemplate(String),

    #[error("Unsupported ontology format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl OntologyError {
    /// Shorthand for an `InvalidValue` error
    pub fn invalid(
        context: impl Into<String>,
        attribute: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        OntologyError::InvalidValue {
            context: context.into(),
            attribute: attribute.into(),
            expected: expected.into(),
        }
    }

    /// Shorthand for an `UnknownAttribute` error
    pub fn unknown_attribute(context: impl Into<String>, attribute: impl Into<String>) -> Self {
        OntologyError::UnknownAttribute {
            context: context.into(),
            attribute: attribute.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OntologyError>;

/// Entries skipped while loading an ontology.
///
/// Loading keeps going past a bad entry; every skipped entry is logged and
/// recorded here so the host can inspect what was dropped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub skipped: Vec<OntologyError>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recoverable error
    pub fn skip(&mut self, error: OntologyError) {
        tracing::warn!(%error, "skipping ontology entry");
        self.skipped.push(error);
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Iterate skipped entries matching a predicate
    pub fn matching<'a>(
        &'a self,
        pred: impl Fn(&OntologyError) -> bool + 'a,
    ) -> impl Iterator<Item = &'a OntologyError> + 'a {
        self.skipped.iter().filter(move |e| pred(e))
    }
}
