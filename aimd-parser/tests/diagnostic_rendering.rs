//! Rendered diagnostics and error context, pinned with inline snapshots

use aimd_parser::aimd::ast::format_source_context;
use aimd_parser::aimd::{parse_document, validate, Diagnostic};

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_mixed_diagnostics() {
    let source = "{{var|_x}}\n{{var|ok}} {{var|ok}}\n{{ref_var|nope}}";
    let (_, diagnostics) = validate(source);

    insta::assert_snapshot!(render(&diagnostics), @r###"
    Line 1, Col 1-10: Variable name cannot start with underscore: _x
    Line 2, Col 12-21: Duplicate var name: ok (already declared as variable 'ok' at line 2, col 1-10)
    Line 3, Col 1-16: Reference to undefined variable: nope
    "###);
}

#[test]
fn test_render_multiline_diagnostic() {
    let source = "{{var|_a,\n  title=\"x\"}}";
    let (_, diagnostics) = validate(source);

    insta::assert_snapshot!(render(&diagnostics), @"Line 1-2, Col 1-13: Variable name cannot start with underscore: _a");
}

#[test]
fn test_parse_error_display() {
    let err = parse_document("Intro\n\nThen {{step|mix, 0}}").unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"Step level must be a positive integer, found 0 at line 3, col 6-20");
}

#[test]
fn test_source_context_marks_error_line() {
    let source = "one\ntwo\nthree {{var|_x}}\nfour\nfive\nsix";
    let err = parse_document(source).unwrap_err();

    let expected = concat!(
        "     1 | one\n",
        "     2 | two\n",
        ">>   3 | three {{var|_x}}\n",
        "     4 | four\n",
        "     5 | five\n",
    );
    assert_eq!(format_source_context(source, &err.position()), expected);
}
