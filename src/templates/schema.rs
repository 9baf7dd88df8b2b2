//! Parsing of template attribute values
//!
//! Each helper turns one raw source value into a typed value. Bad entries
//! inside a value (an unknown time unit, an unknown need name) are reported
//! and skipped; a value of the wrong overall shape is returned as an error.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::actions::Requirements;
use crate::core::error::{LoadReport, OntologyError, Result};
use crate::core::time::TimeUnit;
use crate::core::types::Seconds;
use crate::entity::needs::{NeedType, NeedVector, Needs};
use crate::entity::predicates::PredicateValue;
use crate::ontology::schema::string_or_list;
use crate::ontology::PredicateKind;

/// Extract X from "object(X)" or "template(X)"
pub fn parse_object_reference(marker: &str) -> Option<&str> {
    let inner = marker
        .strip_prefix("object(")
        .or_else(|| marker.strip_prefix("template("))?
        .strip_suffix(')')?
        .trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

fn as_table<'a>(
    value: &'a Value,
    context: &str,
    attribute: &str,
) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| OntologyError::invalid(context, attribute, "a table"))
}

/// Sum a `time` table such as `{ "hours": 1, "minutes": 30 }` into seconds
pub fn parse_duration(value: &Value, context: &str, report: &mut LoadReport) -> Result<Seconds> {
    let table = as_table(value, context, "time")?;
    let mut total = 0.0;

    for (unit, amount) in table {
        let Some(unit_kind) = TimeUnit::parse(unit) else {
            report.skip(OntologyError::unknown_attribute(
                format!("{} time", context),
                unit,
            ));
            continue;
        };
        match amount.as_f64() {
            Some(n) => total += n * unit_kind.seconds(),
            None => report.skip(OntologyError::invalid(context, unit, "a number")),
        }
    }

    Ok(total)
}

/// Parse a `{ need: delta }` table into a cost vector
pub fn parse_costs(value: &Value, context: &str, report: &mut LoadReport) -> Result<NeedVector> {
    let table = as_table(value, context, "costs")?;
    let mut costs = NeedVector::zero();

    for (name, delta) in table {
        let Some(need) = NeedType::parse(name) else {
            report.skip(OntologyError::unknown_attribute(
                format!("{} costs", context),
                name,
            ));
            continue;
        };
        match delta.as_f64() {
            Some(d) => costs[need] = d as f32,
            None => report.skip(OntologyError::invalid(context, name, "a number")),
        }
    }

    Ok(costs)
}

/// Parse starting need levels; unnamed needs start fully satisfied
pub fn parse_needs(value: &Value, context: &str, report: &mut LoadReport) -> Result<Needs> {
    let table = as_table(value, context, "needs")?;
    let mut needs = Needs::satisfied();

    for (name, level) in table {
        let Some(need) = NeedType::parse(name) else {
            report.skip(OntologyError::unknown_attribute(
                format!("{} needs", context),
                name,
            ));
            continue;
        };
        match level.as_f64() {
            Some(l) => needs.set(need, l as f32),
            None => report.skip(OntologyError::invalid(context, name, "a number")),
        }
    }

    Ok(needs)
}

/// Parse a `has` value into slot -> referenced template name
///
/// `null` declares the predicate with no slots. A slot whose value is not a
/// reference marker stays declared but empty.
pub fn parse_has_slots(
    value: &Value,
    context: &str,
) -> Result<BTreeMap<String, Option<String>>> {
    match value {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(slots) => Ok(slots
            .iter()
            .map(|(slot, v)| {
                let target = v
                    .as_str()
                    .and_then(parse_object_reference)
                    .map(str::to_string);
                (slot.clone(), target)
            })
            .collect()),
        _ => Err(OntologyError::invalid(context, "has", "a table of slots or null")),
    }
}

/// Parse a `{ predicate-key: value }` requirement table
pub fn parse_requirements(
    value: &Value,
    context: &str,
    report: &mut LoadReport,
) -> Result<Requirements> {
    let table = as_table(value, context, "reqs")?;
    let mut requirements = Requirements::new();

    for (key, raw) in table {
        let Some(kind) = PredicateKind::parse(key) else {
            report.skip(OntologyError::unknown_attribute(
                format!("{} reqs", context),
                key,
            ));
            continue;
        };

        let parsed = match kind {
            PredicateKind::Has => parse_has_slots(raw, context).map(PredicateValue::Has),
            PredicateKind::HasQuality => string_or_list(raw)
                .map(PredicateValue::Qualities)
                .ok_or_else(|| {
                    OntologyError::invalid(context, key, "a string or an array of strings")
                }),
            _ => string_or_list(raw)
                .map(PredicateValue::Concepts)
                .ok_or_else(|| {
                    OntologyError::invalid(context, key, "a string or an array of strings")
                }),
        };

        match parsed {
            Ok(v) => {
                requirements.0.insert(kind, v);
            }
            Err(e) => report.skip(e),
        }
    }

    Ok(requirements)
}
