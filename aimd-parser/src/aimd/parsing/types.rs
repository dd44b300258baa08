//! Type annotations
//!
//!     Annotations are kept as raw strings. The front end only needs to know three things about
//!     one: that it is well formed, whether it is a list (`list` or `list[Item]`), and whether a
//!     list's item type is one of the primitive types that needs no row model.

use super::scanner::check_balanced;
use crate::aimd::ast::{ErrorKind, ParseError, Position};
use once_cell::sync::Lazy;
use regex::Regex;

/// Type names that need no model definition
pub const PRIMITIVE_TYPES: [&str; 6] = ["str", "int", "float", "bool", "list", "dict"];

static LIST_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^list\s*(?:\[\s*(?P<item>.*?)\s*\])?$").unwrap());

static TYPE_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^[A-Za-z_"']"#).unwrap());

/// How a `list` annotation constrains its items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListType {
    /// `list` with no item type
    Bare,
    /// `list[Item]`
    Of(String),
}

/// Check a raw annotation and return it trimmed.
pub fn check_type_annotation(annotation: &str, position: Position) -> Result<&str, ParseError> {
    let annotation = annotation.trim();
    if annotation.is_empty() {
        return Err(ParseError::new(
            ErrorKind::TypeAnnotation,
            "Empty type annotation",
            position,
        ));
    }
    if !TYPE_HEAD.is_match(annotation) {
        return Err(ParseError::new(
            ErrorKind::TypeAnnotation,
            format!("Invalid type annotation '{}'", annotation),
            position,
        ));
    }
    check_balanced(annotation).map_err(|err| {
        ParseError::new(
            ErrorKind::TypeAnnotation,
            format!("Invalid type annotation '{}': {}", annotation, err),
            position,
        )
    })?;
    Ok(annotation)
}

/// Recognize `list` and `list[Item]`.
pub fn list_type(annotation: &str) -> Option<ListType> {
    let caps = LIST_TYPE.captures(annotation.trim())?;
    match caps.name("item").map(|m| m.as_str()) {
        Some(item) if !item.is_empty() => Some(ListType::Of(item.to_string())),
        _ => Some(ListType::Bare),
    }
}

/// The identifier before any `[` in a type expression
pub fn base_type_name(type_expr: &str) -> &str {
    type_expr
        .split_once('[')
        .map_or(type_expr, |(head, _)| head)
        .trim()
}

pub fn is_primitive(type_expr: &str) -> bool {
    PRIMITIVE_TYPES.contains(&base_type_name(type_expr))
}

/// Forward references written as strings (`list["Student"]`)
pub fn is_quoted(type_expr: &str) -> bool {
    let t = type_expr.trim();
    t.starts_with('"') || t.starts_with('\'')
}

/// `test_case` → `TestCaseItem`
pub fn synthesize_item_type(table_name: &str) -> String {
    let mut pascal = String::with_capacity(table_name.len() + 4);
    for word in table_name.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            pascal.extend(first.to_uppercase());
            pascal.push_str(chars.as_str());
        }
    }
    pascal.push_str("Item");
    pascal
}
