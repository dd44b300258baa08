//! Property-based tests for declarations and values
//!
//! Generated names and literals are embedded in directives and pushed through
//! the full pipeline:
//! - legal names always parse and keep their position
//! - names starting with an underscore are always rejected
//! - integer and string literals survive as typed values
//! - validation never panics and is deterministic

use aimd_parser::aimd::ast::{ErrorKind, Value};
use aimd_parser::aimd::{extract_vars, parse_document, validate};
use proptest::prelude::*;

/// Legal names: a letter, then letters, digits and single underscores
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,6}(_[a-zA-Z0-9]{1,4}){0,2}"
}

/// Prose that never opens a directive
fn prose_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:;!?]{0,30}"
}

/// String contents without quotes or backslashes
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,=\\[\\]()]{0,20}"
}

proptest! {
    #[test]
    fn test_legal_names_parse(name in name_strategy(), prefix in prose_strategy()) {
        let source = format!("{}{{{{var|{}}}}}", prefix, name);
        let doc = parse_document(&source).unwrap();

        prop_assert_eq!(doc.vars.len(), 1);
        prop_assert_eq!(doc.vars[0].name(), name.as_str());
        prop_assert_eq!(doc.vars[0].position().start_line, 1);
        prop_assert_eq!(doc.vars[0].position().start_col, prefix.chars().count() + 1);
    }

    #[test]
    fn test_extraction_keeps_names(names in prop::collection::hash_set(name_strategy(), 1..6)) {
        let names: Vec<String> = names.into_iter().collect();
        let source: String = names
            .iter()
            .map(|n| format!("{{{{var|{}}}}}\n", n))
            .collect();
        let json = extract_vars(&source).unwrap();
        let vars = json["vars"].as_array().unwrap();

        prop_assert_eq!(vars.len(), names.len());
        for (index, (entry, name)) in vars.iter().zip(&names).enumerate() {
            prop_assert_eq!(entry["name"].as_str(), Some(name.as_str()));
            prop_assert_eq!(entry["start_line"].as_u64(), Some(index as u64 + 1));
            prop_assert_eq!(entry["start_col"].as_u64(), Some(1));
        }
    }

    #[test]
    fn test_leading_underscore_rejected(name in name_strategy()) {
        let source = format!("{{{{var|_{}}}}}", name);
        let (valid, diagnostics) = validate(&source);

        prop_assert!(!valid);
        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(diagnostics[0].code, ErrorKind::InvalidName);
        prop_assert!(diagnostics[0].message.contains("cannot start with underscore"));
    }

    #[test]
    fn test_integer_defaults(n in any::<i32>()) {
        let source = format!("{{{{var|count: int = {}}}}}", n);
        let doc = parse_document(&source).unwrap();
        prop_assert_eq!(doc.vars[0].base().default.clone(), Some(Value::Integer(n as i64)));
    }

    #[test]
    fn test_string_kwargs(text in text_strategy(), double in any::<bool>()) {
        let quote = if double { '"' } else { '\'' };
        let source = format!("{{{{var|label, title={q}{t}{q}}}}}", q = quote, t = text);
        let doc = parse_document(&source).unwrap();
        prop_assert_eq!(
            doc.vars[0].base().kwargs.get("title"),
            Some(&Value::String(text.clone()))
        );
    }

    #[test]
    fn test_validation_total_and_deterministic(body in "[a-z{}|=,:_\\[\\] \n]{0,60}") {
        let first = validate(&body);
        let second = validate(&body);
        prop_assert_eq!(first.0, first.1.is_empty());
        prop_assert_eq!(first, second);
    }
}
