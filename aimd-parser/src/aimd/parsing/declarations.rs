//! Variable declaration grammar
//!
//! Grammar for `var` and `var_table` payloads:
//!
//! ```text
//! <declaration> = <head> ("," <keyword> "=" <value>)*
//! <head>        = <name> (":" <type>)? ("=" <value>)?
//! <subvars>     = "subvars" "=" "[" (<subvar> ("," <subvar>)* ","?)? "]"
//! <subvar>      = <head> | "var" "(" <head> ("," <keyword> "=" <value>)* ")"
//! ```
//!
//! `subvars` is the one keyword with its own grammar. Its items are plain
//! declarations: a subvar can't declare subvars of its own.

use super::scanner::{check_balanced, find_assignment, find_top_level, split_top_level, ScanError};
use super::types::check_type_annotation;
use super::values::parse_value;
use crate::aimd::ast::{ParseError, Position, VarNode};
use once_cell::sync::Lazy;
use regex::Regex;

pub const SUBVARS_KEYWORD: &str = "subvars";

static KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Fields of a declaration payload, before table classification
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationPayload {
    pub var: VarNode,
    /// Present when the payload had a `subvars=[...]` clause
    pub subvars: Option<Vec<VarNode>>,
}

/// Parse a `var` or `var_table` payload.
pub fn parse_declaration(
    payload: &str,
    position: Position,
) -> Result<DeclarationPayload, ParseError> {
    parse_fields(payload, position, true)
}

fn parse_fields(
    payload: &str,
    position: Position,
    allow_subvars: bool,
) -> Result<DeclarationPayload, ParseError> {
    let segments =
        split_top_level(payload, ',').map_err(|err| scan_failure(payload, err, position))?;
    let (head, rest) = segments
        .split_first()
        .ok_or_else(|| ParseError::syntax("Missing variable name", position))?;

    let mut var = parse_head(head, position)?;
    let mut subvars = None;

    for segment in rest {
        let (key, value_text) = split_keyword(segment, position)?;
        if key == SUBVARS_KEYWORD {
            if !allow_subvars {
                return Err(ParseError::syntax(
                    format!("Subvar '{}' cannot declare nested subvars", var.name),
                    position,
                ));
            }
            subvars = Some(parse_subvars(value_text, position)?);
        } else {
            var.kwargs.insert(key, parse_value(value_text, position)?);
        }
    }

    Ok(DeclarationPayload { var, subvars })
}

/// Blame an unbalanced payload on its type annotation when the imbalance is there.
fn scan_failure(payload: &str, err: ScanError, position: Position) -> ParseError {
    unbalanced_annotation(payload)
        .and_then(|annotation| check_type_annotation(annotation, position).err())
        .unwrap_or_else(|| err.at(position))
}

/// The annotation of a payload's head, if its brackets or quotes don't balance.
///
/// The annotation runs from the `:` after the name to the first `,` or `=`
/// outside brackets, or to the end of the payload when a bracket never closes.
fn unbalanced_annotation(payload: &str) -> Option<&str> {
    let colon = payload.find(':')?;
    let name = &payload[..colon];
    if name.contains(['[', ']', '(', ')', '"', '\'', ',', '=']) {
        return None;
    }

    let rest = &payload[colon + 1..];
    let mut depth = 0usize;
    let mut end = rest.len();
    for (offset, ch) in rest.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' if depth == 0 => {
                end = offset + 1;
                break;
            }
            ']' | ')' => depth -= 1,
            ',' | '=' if depth == 0 => {
                end = offset;
                break;
            }
            _ => {}
        }
    }

    let annotation = &rest[..end];
    check_balanced(annotation.trim()).is_err().then_some(annotation)
}

/// `name[: type][= default]`
fn parse_head(head: &str, position: Position) -> Result<VarNode, ParseError> {
    let (declared, default) = match find_assignment(head).map_err(|err| err.at(position))? {
        Some(eq) => (&head[..eq], Some(parse_value(&head[eq + 1..], position)?)),
        None => (head, None),
    };

    let colon = find_top_level(declared, ':').map_err(|err| err.at(position))?;
    let (name, type_annotation) = match colon {
        Some(colon) => {
            let annotation = check_type_annotation(&declared[colon + 1..], position)?;
            (declared[..colon].trim(), Some(annotation.to_string()))
        }
        None => (declared.trim(), None),
    };

    if name.is_empty() {
        return Err(ParseError::syntax(
            format!("Missing variable name in '{}'", head),
            position,
        ));
    }

    let mut var = VarNode::new(name, position);
    var.type_annotation = type_annotation;
    var.default = default;
    Ok(var)
}

/// `key = value`, returning the key and the unparsed value text
fn split_keyword(segment: &str, position: Position) -> Result<(&str, &str), ParseError> {
    if segment.is_empty() {
        return Err(ParseError::syntax("Empty argument", position));
    }
    let eq = find_assignment(segment)
        .map_err(|err| err.at(position))?
        .ok_or_else(|| {
            ParseError::syntax(
                format!("Expected keyword argument 'key=value', found '{}'", segment),
                position,
            )
        })?;

    let key = segment[..eq].trim();
    if !KEYWORD.is_match(key) {
        return Err(ParseError::syntax(
            format!("Invalid keyword argument name '{}'", key),
            position,
        ));
    }
    Ok((key, &segment[eq + 1..]))
}

fn parse_subvars(text: &str, position: Position) -> Result<Vec<VarNode>, ParseError> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            ParseError::syntax(
                format!("subvars must be a list literal, found '{}'", text),
                position,
            )
        })?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(inner, ',')
        .map_err(|err| err.at(position))?
        .into_iter()
        .map(|item| {
            if item.is_empty() {
                return Err(ParseError::syntax("Empty subvar entry", position));
            }
            match var_wrapper_args(item) {
                Some(args) => parse_fields(args, position, false).map(|fields| fields.var),
                None => parse_head(item, position),
            }
        })
        .collect()
}

/// Arguments of a `var(...)` subvar, if `item` is one
fn var_wrapper_args(item: &str) -> Option<&str> {
    item.strip_prefix("var")?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}
