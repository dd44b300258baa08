//! Document-wide checks
//!
//! Each check walks a built [`Document`] and returns every problem it finds.
//! Checks never stop early and never depend on each other's results.

use super::names::{check_name, normalize_name, NameCategory};
use super::ValidationOptions;
use crate::aimd::ast::{Document, ErrorKind, ParseError, Position};
use crate::aimd::parsing::types::{base_type_name, is_primitive, is_quoted};
use std::collections::{HashMap, HashSet};

/// Every declared var, step and check name in source order
fn declared_names(doc: &Document) -> Vec<(&str, NameCategory, Position)> {
    let mut names: Vec<_> = doc
        .vars
        .iter()
        .map(|v| (v.name(), NameCategory::Variable, v.position()))
        .chain(
            doc.steps
                .iter()
                .map(|s| (s.name.as_str(), NameCategory::Step, s.position)),
        )
        .chain(
            doc.checks
                .iter()
                .map(|c| (c.name.as_str(), NameCategory::Check, c.position)),
        )
        .collect();
    names.sort_by_key(|(_, _, position)| position.sort_key());
    names
}

/// Names breaking the naming rules, subvars included
pub fn name_errors(doc: &Document) -> Vec<ParseError> {
    let mut errors: Vec<ParseError> = declared_names(doc)
        .into_iter()
        .filter_map(|(name, category, position)| check_name(name, category, position).err())
        .collect();

    for table in doc.vars.iter().filter_map(|v| v.as_table()) {
        errors.extend(
            table
                .subvars
                .iter()
                .filter_map(|s| check_name(&s.name, NameCategory::Variable, s.position).err()),
        );
    }
    errors
}

/// Second and later declarations whose normalized names collide, across vars, steps and checks.
/// Names that break the naming rules are left to [`name_errors`].
pub fn duplicate_errors(doc: &Document) -> Vec<ParseError> {
    let mut first_seen: HashMap<String, (&str, NameCategory, Position)> = HashMap::new();
    let mut errors = Vec::new();

    for (name, category, position) in declared_names(doc) {
        if check_name(name, category, position).is_err() {
            continue;
        }
        let key = normalize_name(name).into_owned();
        match first_seen.get(&key) {
            Some((first_name, first_category, first_position)) => {
                errors.push(ParseError::new(
                    ErrorKind::DuplicateName,
                    format!(
                        "Duplicate var name: {} (already declared as {} '{}' at {})",
                        name, first_category, first_name, first_position
                    ),
                    position,
                ));
            }
            None => {
                first_seen.insert(key, (name, category, position));
            }
        }
    }
    errors
}

/// Subvars of one table whose normalized names collide; illegal names are skipped
pub fn subvar_duplicate_errors(doc: &Document) -> Vec<ParseError> {
    let mut errors = Vec::new();

    for table in doc.vars.iter().filter_map(|v| v.as_table()) {
        let mut seen = HashSet::new();
        for subvar in &table.subvars {
            if check_name(&subvar.name, NameCategory::Variable, subvar.position).is_err() {
                continue;
            }
            if !seen.insert(normalize_name(&subvar.name).into_owned()) {
                errors.push(ParseError::new(
                    ErrorKind::DuplicateName,
                    format!(
                        "Duplicate subvar name: {} in table '{}'",
                        subvar.name, table.var.name
                    ),
                    subvar.position,
                ));
            }
        }
    }
    errors
}

/// Tables typed `list[Custom]` that give the custom type no subvars
pub fn custom_type_errors(doc: &Document, options: &ValidationOptions) -> Vec<ParseError> {
    doc.vars
        .iter()
        .filter_map(|v| v.as_table())
        .filter(|table| table.item_type_explicit && table.subvars.is_empty())
        .filter_map(|table| {
            let item = table.item_type_name()?;
            let scalar = is_primitive(item)
                || is_quoted(item)
                || options.is_extra_scalar(base_type_name(item));
            (!scalar).then(|| {
                ParseError::new(
                    ErrorKind::IncompleteCustomType,
                    format!(
                        "Custom type '{}' requires explicit subvars definition (variable '{}')",
                        item, table.var.name
                    ),
                    table.var.position,
                )
            })
        })
        .collect()
}

/// `ref_var` and `ref_step` targets that name no declaration; figures always resolve
pub fn reference_errors(doc: &Document) -> Vec<ParseError> {
    let vars: HashSet<&str> = doc.vars.iter().map(|v| v.name()).collect();
    let steps: HashSet<&str> = doc.steps.iter().map(|s| s.name.as_str()).collect();

    let undefined_vars = doc
        .ref_vars
        .iter()
        .filter(|r| !vars.contains(r.ref_id.as_str()))
        .map(|r| (format!("Reference to undefined variable: {}", r.ref_id), r.position));
    let undefined_steps = doc
        .ref_steps
        .iter()
        .filter(|r| !steps.contains(r.ref_id.as_str()))
        .map(|r| (format!("Reference to undefined step: {}", r.ref_id), r.position));

    undefined_vars
        .chain(undefined_steps)
        .map(|(message, position)| {
            ParseError::new(ErrorKind::UndefinedReference, message, position)
        })
        .collect()
}
