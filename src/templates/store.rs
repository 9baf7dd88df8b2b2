//! Template store: declarative blueprints for objects, agents and actions
//!
//! Templates are keyed by concept name and never change after loading. The
//! load order matters: requirement templates, then action templates, then
//! object templates, then agent templates, because each later kind refers to
//! the earlier ones.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde_json::{Map, Value};

use super::schema::{
    parse_costs, parse_duration, parse_has_slots, parse_needs, parse_requirements,
};
use crate::actions::{Action, Advert, Requirements};
use crate::core::error::{LoadReport, OntologyError, Result};
use crate::entity::needs::{NeedVector, Needs};
use crate::entity::object::Possessions;
use crate::ontology::schema::string_or_list;
use crate::ontology::{ConceptGraph, PredicateKind, Relations};

/// Blueprint for a runtime object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectTemplate {
    pub name: String,
    pub description: String,
    pub relations: Relations,
    pub mass: f32,
    pub adverts: Vec<Advert>,
    /// Slot -> name of the object template held there
    pub has: Option<BTreeMap<String, Option<String>>>,
}

/// Blueprint for a runtime agent
///
/// Possessions are resolved into objects when the template is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTemplate {
    pub name: String,
    pub description: String,
    pub relations: Relations,
    pub mass: f32,
    pub adverts: Vec<Advert>,
    pub has: Option<Possessions>,
    pub needs: Needs,
}

/// Registry of every loaded template
#[derive(Debug, Default)]
pub struct TemplateStore {
    pub(super) requirements: AHashMap<String, Requirements>,
    pub(super) actions: AHashMap<String, Action>,
    pub(super) objects: AHashMap<String, ObjectTemplate>,
    /// Object template names in load order
    pub(super) object_order: Vec<String>,
    pub(super) agents: AHashMap<String, AgentTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requirement(&self, name: &str) -> Option<&Requirements> {
        self.requirements.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn object_template(&self, name: &str) -> Option<&ObjectTemplate> {
        self.objects.get(name)
    }

    pub fn agent_template(&self, name: &str) -> Option<&AgentTemplate> {
        self.agents.get(name)
    }

    pub fn object_template_count(&self) -> usize {
        self.objects.len()
    }

    pub fn agent_template_count(&self) -> usize {
        self.agents.len()
    }

    pub fn action_template_count(&self) -> usize {
        self.actions.len()
    }

    // ------------------------------------------------------------------
    // Requirement and action templates
    // ------------------------------------------------------------------

    /// Load the `templates.reqs` table
    pub fn load_requirement_templates(
        &mut self,
        reqs: &Map<String, Value>,
        report: &mut LoadReport,
    ) {
        for (name, data) in reqs {
            let context = format!("requirement template '{}'", name);
            match parse_requirements(data, &context, report) {
                Ok(requirements) => {
                    self.requirements.insert(name.clone(), requirements);
                }
                Err(e) => report.skip(e),
            }
        }
    }

    /// Load the `templates.actions` table
    pub fn load_action_templates(&mut self, actions: &Map<String, Value>, report: &mut LoadReport) {
        for (name, data) in actions {
            match self.parse_action(name, data, report) {
                Ok(action) => {
                    self.actions.insert(name.clone(), action);
                }
                Err(e) => report.skip(e),
            }
        }
        tracing::debug!(count = self.actions.len(), "action templates loaded");
    }

    /// Parse an inline action definition
    fn parse_action(&self, name: &str, data: &Value, report: &mut LoadReport) -> Result<Action> {
        let context = format!("action '{}'", name);
        let table = data
            .as_object()
            .ok_or_else(|| OntologyError::invalid(&context, "action", "a table"))?;

        let mut action = Action::new(name, 0.0, NeedVector::zero());
        for (attribute, value) in table {
            match attribute.as_str() {
                "time" => match parse_duration(value, &context, report) {
                    Ok(secs) => action.duration = secs,
                    Err(e) => report.skip(e),
                },
                "costs" => match parse_costs(value, &context, report) {
                    Ok(costs) => action.costs = costs,
                    Err(e) => report.skip(e),
                },
                "reqs" => match self.parse_action_requirements(value, &context, report) {
                    Ok(reqs) => action.requirements = reqs,
                    Err(e) => report.skip(e),
                },
                _ => report.skip(OntologyError::unknown_attribute(&context, attribute)),
            }
        }

        Ok(action)
    }

    /// `reqs` is either the name of a requirement template or an inline table
    fn parse_action_requirements(
        &self,
        value: &Value,
        context: &str,
        report: &mut LoadReport,
    ) -> Result<Requirements> {
        match value {
            Value::String(name) => self
                .requirements
                .get(name)
                .cloned()
                .ok_or_else(|| OntologyError::MissingTemplate(name.clone())),
            Value::Object(_) => parse_requirements(value, context, report),
            _ => Err(OntologyError::invalid(
                context,
                "reqs",
                "a requirement template name or a table",
            )),
        }
    }

    /// Resolve an action given either inline or by action template name
    fn resolve_action(&self, name: &str, data: &Value, report: &mut LoadReport) -> Result<Action> {
        match data {
            Value::String(template) => {
                let mut action = self
                    .actions
                    .get(template)
                    .cloned()
                    .ok_or_else(|| OntologyError::MissingTemplate(template.clone()))?;
                action.name = name.to_string();
                Ok(action)
            }
            Value::Object(_) => self.parse_action(name, data, report),
            _ => Err(OntologyError::invalid(
                format!("action '{}'", name),
                "action",
                "an action template name or a table",
            )),
        }
    }

    fn parse_adverts(
        &self,
        owner: &str,
        value: &Value,
        report: &mut LoadReport,
    ) -> Result<Vec<Advert>> {
        let context = format!("template '{}'", owner);
        let table = value
            .as_object()
            .ok_or_else(|| OntologyError::invalid(&context, "adverts", "a table of adverts"))?;

        let mut adverts = Vec::with_capacity(table.len());
        for (advert_name, data) in table {
            let advert_context = format!("advert '{}' of template '{}'", advert_name, owner);
            let Some(attributes) = data.as_object() else {
                report.skip(OntologyError::invalid(&advert_context, "advert", "a table"));
                continue;
            };

            let mut advert = Advert::new(advert_name);
            for (attribute, value) in attributes {
                match attribute.as_str() {
                    "action" => match self.resolve_action(advert_name, value, report) {
                        Ok(action) => advert.actions.push(action),
                        Err(e) => report.skip(e),
                    },
                    "actions" => {
                        let Some(actions) = value.as_object() else {
                            report.skip(OntologyError::invalid(
                                &advert_context,
                                "actions",
                                "a table of actions",
                            ));
                            continue;
                        };
                        for (action_name, action_data) in actions {
                            match self.resolve_action(action_name, action_data, report) {
                                Ok(action) => advert.actions.push(action),
                                Err(e) => report.skip(e),
                            }
                        }
                    }
                    _ => report.skip(OntologyError::unknown_attribute(&advert_context, attribute)),
                }
            }
            adverts.push(advert);
        }

        Ok(adverts)
    }

    // ------------------------------------------------------------------
    // Object templates
    // ------------------------------------------------------------------

    /// Load a single object template
    ///
    /// `name` must be a declared concept. Unknown attributes and predicate
    /// verbs are reported and skipped.
    pub fn load_object_template(
        &mut self,
        name: &str,
        data: &Value,
        concepts: &ConceptGraph,
        report: &mut LoadReport,
    ) -> Result<()> {
        if !concepts.is_concept(name) {
            return Err(OntologyError::UnknownConcept(name.to_string()));
        }
        let context = format!("object template '{}'", name);
        let table = data
            .as_object()
            .ok_or_else(|| OntologyError::invalid(&context, "template", "a table"))?;

        let mut template = ObjectTemplate {
            name: name.to_string(),
            relations: Relations {
                instance_of: vec![name.to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        for (attribute, value) in table {
            match attribute.as_str() {
                "adverts" => match self.parse_adverts(name, value, report) {
                    Ok(adverts) => template.adverts = adverts,
                    Err(e) => report.skip(e),
                },
                "predicates" => {
                    self.parse_template_predicates(&context, value, concepts, report, |verb| {
                        match verb {
                            TemplatePredicate::Has(slots) => template.has = Some(slots),
                            TemplatePredicate::Qualities(q) => template.relations.qualities = q,
                        }
                    })
                }
                "mass" => match value.as_f64() {
                    Some(m) => template.mass = m as f32,
                    None => report.skip(OntologyError::invalid(&context, "mass", "a number")),
                },
                "desc" => match value.as_str() {
                    Some(d) => template.description = d.to_string(),
                    None => report.skip(OntologyError::invalid(&context, "desc", "a string")),
                },
                _ => report.skip(OntologyError::unknown_attribute(&context, attribute)),
            }
        }

        if self.objects.insert(name.to_string(), template).is_none() {
            self.object_order.push(name.to_string());
        }
        Ok(())
    }

    /// Load the `templates.objects` table, then drop references that
    /// cannot be instantiated
    pub fn load_object_templates(
        &mut self,
        objects: &Map<String, Value>,
        concepts: &ConceptGraph,
        report: &mut LoadReport,
    ) {
        for (name, data) in objects {
            if let Err(e) = self.load_object_template(name, data, concepts, report) {
                report.skip(e);
            }
        }
        self.check_object_references(report);
        tracing::debug!(count = self.objects.len(), "object templates loaded");
    }

    /// Clear possession slots that name a missing template or close a cycle
    pub fn check_object_references(&mut self, report: &mut LoadReport) {
        let mut broken: Vec<(String, String, OntologyError)> = Vec::new();
        let mut done: Vec<String> = Vec::new();

        for name in &self.object_order {
            let mut stack = Vec::new();
            self.find_broken_references(name, &mut stack, &mut done, &mut broken);
        }

        for (template, slot, error) in broken {
            if let Some(slots) = self.objects.get_mut(&template).and_then(|t| t.has.as_mut()) {
                slots.insert(slot, None);
            }
            report.skip(error);
        }
    }

    fn find_broken_references(
        &self,
        name: &str,
        stack: &mut Vec<String>,
        done: &mut Vec<String>,
        broken: &mut Vec<(String, String, OntologyError)>,
    ) {
        if done.iter().any(|d| d == name) {
            return;
        }
        let Some(template) = self.objects.get(name) else {
            return;
        };
        stack.push(name.to_string());

        for (slot, target) in template.has.iter().flatten() {
            let Some(target) = target else { continue };
            if !self.objects.contains_key(target) {
                broken.push((
                    name.to_string(),
                    slot.clone(),
                    OntologyError::MissingTemplate(target.clone()),
                ));
            } else if stack.iter().any(|s| s == target) {
                broken.push((
                    name.to_string(),
                    slot.clone(),
                    OntologyError::CyclicTemplate(target.clone()),
                ));
            } else {
                self.find_broken_references(target, stack, done, broken);
            }
        }

        stack.pop();
        done.push(name.to_string());
    }

    // ------------------------------------------------------------------
    // Agent templates
    // ------------------------------------------------------------------

    /// Load a single agent template
    ///
    /// Object references under `predicates.has` are instantiated right away,
    /// so object templates must already be loaded.
    pub fn load_agent_template(
        &mut self,
        name: &str,
        data: &Value,
        concepts: &ConceptGraph,
        report: &mut LoadReport,
    ) -> Result<()> {
        if !concepts.is_concept(name) {
            return Err(OntologyError::UnknownConcept(name.to_string()));
        }
        let context = format!("agent template '{}'", name);
        let table = data
            .as_object()
            .ok_or_else(|| OntologyError::invalid(&context, "template", "a table"))?;

        let mut template = AgentTemplate {
            name: name.to_string(),
            description: String::new(),
            relations: Relations {
                instance_of: vec![name.to_string()],
                ..Default::default()
            },
            mass: 0.0,
            adverts: Vec::new(),
            has: None,
            needs: Needs::satisfied(),
        };

        let mut slots = None;
        for (attribute, value) in table {
            match attribute.as_str() {
                "predicates" => {
                    self.parse_template_predicates(&context, value, concepts, report, |verb| {
                        match verb {
                            TemplatePredicate::Has(s) => slots = Some(s),
                            TemplatePredicate::Qualities(q) => template.relations.qualities = q,
                        }
                    })
                }
                "needs" => match parse_needs(value, &context, report) {
                    Ok(needs) => template.needs = needs,
                    Err(e) => report.skip(e),
                },
                "adverts" => match self.parse_adverts(name, value, report) {
                    Ok(adverts) => template.adverts = adverts,
                    Err(e) => report.skip(e),
                },
                "mass" => match value.as_f64() {
                    Some(m) => template.mass = m as f32,
                    None => report.skip(OntologyError::invalid(&context, "mass", "a number")),
                },
                "desc" => match value.as_str() {
                    Some(d) => template.description = d.to_string(),
                    None => report.skip(OntologyError::invalid(&context, "desc", "a string")),
                },
                _ => report.skip(OntologyError::unknown_attribute(&context, attribute)),
            }
        }

        if let Some(slots) = slots {
            let mut possessions = Possessions::new();
            for (slot, target) in slots {
                let held = match target {
                    Some(target) => match self.instantiate_object(&target) {
                        Ok(object) => Some(object),
                        Err(e) => {
                            report.skip(e);
                            None
                        }
                    },
                    None => None,
                };
                possessions.insert(slot, held);
            }
            template.has = Some(possessions);
        }

        self.agents.insert(name.to_string(), template);
        Ok(())
    }

    /// Load the `templates.agents` table
    pub fn load_agent_templates(
        &mut self,
        agents: &Map<String, Value>,
        concepts: &ConceptGraph,
        report: &mut LoadReport,
    ) {
        for (name, data) in agents {
            if let Err(e) = self.load_agent_template(name, data, concepts, report) {
                report.skip(e);
            }
        }
        tracing::debug!(count = self.agents.len(), "agent templates loaded");
    }

    /// Walk a template's `predicates` table, handing each parsed verb to `apply`
    fn parse_template_predicates(
        &self,
        context: &str,
        value: &Value,
        concepts: &ConceptGraph,
        report: &mut LoadReport,
        mut apply: impl FnMut(TemplatePredicate),
    ) {
        let Some(predicates) = value.as_object() else {
            report.skip(OntologyError::invalid(context, "predicates", "a table"));
            return;
        };

        for (verb, data) in predicates {
            match PredicateKind::parse(verb) {
                Some(PredicateKind::Has) => match parse_has_slots(data, context) {
                    Ok(mut slots) => {
                        for target in slots.values_mut() {
                            let unknown = target.as_ref().is_some_and(|t| !concepts.is_concept(t));
                            if unknown {
                                if let Some(t) = target.take() {
                                    report.skip(OntologyError::UnknownConcept(t));
                                }
                            }
                        }
                        apply(TemplatePredicate::Has(slots));
                    }
                    Err(e) => report.skip(e),
                },
                Some(PredicateKind::HasQuality) => match string_or_list(data) {
                    Some(qualities) => apply(TemplatePredicate::Qualities(qualities)),
                    None => report.skip(OntologyError::invalid(
                        context,
                        verb,
                        "a string or an array of strings",
                    )),
                },
                _ => report.skip(OntologyError::unknown_attribute(
                    format!("{} predicates", context),
                    verb,
                )),
            }
        }
    }
}

/// Predicate verbs a template may declare
enum TemplatePredicate {
    Has(BTreeMap<String, Option<String>>),
    Qualities(Vec<String>),
}
