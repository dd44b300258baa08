//! Flat extraction for older callers
//!
//! Older integrations consume a plain JSON mapping instead of the typed AST:
//!
//! ```text
//! { "vars": [...], "steps": [...], "checks": [...],
//!   "ref_vars": [...], "ref_steps": [...], "ref_figs": [...], "cites": [...] }
//! ```
//!
//! Every entry carries `start_line`, `end_line`, `start_col` and `end_col`.
//! Var entries add `name`, `type_annotation`, `default_value` and `kwargs`;
//! table entries also carry `subvars` (entries of the same shape) and
//! `list_item_type`. Constructor-call values are plain strings.
//!
//! Extraction parses strictly and fails with the same errors as
//! [parse_document](crate::aimd::parsing::parse_document).

use crate::aimd::ast::{Declaration, Document, ParseError, Position, RefNode, VarNode};
use crate::aimd::parsing::parse_document;
use serde_json::{json, Map, Value as Json};

/// Parse `source` and return its flat JSON view.
pub fn extract_vars(source: &str) -> Result<Json, ParseError> {
    parse_document(source).map(|doc| to_legacy_json(&doc))
}

pub fn to_legacy_json(doc: &Document) -> Json {
    json!({
        "vars": doc.vars.iter().map(declaration_entry).collect::<Vec<_>>(),
        "steps": doc.steps.iter().map(|step| {
            let mut entry = positioned(step.position);
            entry.insert("name".into(), json!(step.name));
            entry.insert("level".into(), json!(step.level));
            entry.insert("check".into(), json!(step.check));
            entry.insert("checked_message".into(), json!(step.checked_message));
            Json::Object(entry)
        }).collect::<Vec<_>>(),
        "checks": doc.checks.iter().map(|check| {
            let mut entry = positioned(check.position);
            entry.insert("name".into(), json!(check.name));
            entry.insert("checked_message".into(), json!(check.checked_message));
            Json::Object(entry)
        }).collect::<Vec<_>>(),
        "ref_vars": reference_entries(&doc.ref_vars),
        "ref_steps": reference_entries(&doc.ref_steps),
        "ref_figs": reference_entries(&doc.ref_figs),
        "cites": doc.cites.iter().map(|cite| {
            let mut entry = positioned(cite.position);
            entry.insert("ref_ids".into(), json!(cite.ref_ids));
            Json::Object(entry)
        }).collect::<Vec<_>>(),
    })
}

fn positioned(position: Position) -> Map<String, Json> {
    let mut entry = Map::new();
    entry.insert("start_line".into(), json!(position.start_line));
    entry.insert("end_line".into(), json!(position.end_line));
    entry.insert("start_col".into(), json!(position.start_col));
    entry.insert("end_col".into(), json!(position.end_col));
    entry
}

fn var_entry(var: &VarNode) -> Map<String, Json> {
    let mut entry = positioned(var.position);
    entry.insert("name".into(), json!(var.name));
    entry.insert("type_annotation".into(), json!(var.type_annotation));
    entry.insert(
        "default_value".into(),
        var.default.as_ref().map_or(Json::Null, Json::from),
    );
    entry.insert("kwargs".into(), Json::from(&var.kwargs));
    entry
}

fn declaration_entry(decl: &Declaration) -> Json {
    let mut entry = var_entry(decl.base());
    if let Some(table) = decl.as_table() {
        let subvars = table
            .subvars
            .iter()
            .map(|s| Json::Object(var_entry(s)))
            .collect();
        entry.insert("subvars".into(), Json::Array(subvars));
        entry.insert("list_item_type".into(), json!(table.item_type));
    }
    Json::Object(entry)
}

fn reference_entries(refs: &[RefNode]) -> Vec<Json> {
    refs.iter()
        .map(|r| {
            let mut entry = positioned(r.position);
            entry.insert("ref_id".into(), json!(r.ref_id));
            Json::Object(entry)
        })
        .collect()
}
