//! Value literal grammar
//!
//! Grammar:
//!
//! ```text
//! <value>   = <string> | <raw>   | <number> | <list> | <call> | "True" | "False"
//! <string>  = '"' (<char> | <escape>)* '"'  |  "'" (<char> | <escape>)* "'"
//! <raw>     = "r" <quote> <char>* <quote>
//! <number>  = [+-]? <digit> (<digit> | "_")* ("." <digit>*)? ([eE] [+-]? <digit>+)?
//! <list>    = "[" (<value> ("," <value>)* ","?)? "]"
//! <call>    = <ident> "(" <balanced>* ")"
//! ```
//!
//! Calls are not evaluated: the value is the call's source text, verbatim. Any
//! other bare identifier is rejected.

use crate::aimd::ast::{ParseError, Position, Value};
use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

type ValueError = Simple<char>;

fn unescape(c: char) -> Vec<char> {
    match c {
        'n' => vec!['\n'],
        't' => vec!['\t'],
        'r' => vec!['\r'],
        '0' => vec!['\0'],
        '\\' | '"' | '\'' => vec![c],
        other => vec!['\\', other],
    }
}

fn quoted_string(quote: char) -> impl Parser<char, String, Error = ValueError> + Clone {
    let escape = just('\\').ignore_then(any()).map(unescape);
    let plain = filter::<char, _, ValueError>(move |c: &char| *c != '\\' && *c != quote)
        .map(|c| vec![c]);

    just(quote)
        .ignore_then(plain.or(escape).repeated().flatten())
        .then_ignore(just(quote))
        .collect::<String>()
}

fn raw_string(quote: char) -> impl Parser<char, String, Error = ValueError> + Clone {
    just('r')
        .ignore_then(just(quote))
        .ignore_then(filter::<char, _, ValueError>(move |c: &char| *c != quote).repeated())
        .then_ignore(just(quote))
        .collect::<String>()
}

fn number() -> impl Parser<char, Value, Error = ValueError> + Clone {
    let digit = filter::<char, _, ValueError>(char::is_ascii_digit);
    let digits = filter::<char, _, ValueError>(|c: &char| c.is_ascii_digit() || *c == '_');

    let integer_part = digit.clone().chain(digits.clone().repeated());
    let fraction = just('.').chain(digits.repeated());
    let exponent = one_of("eE")
        .chain(one_of("+-").or_not())
        .chain(digit.repeated().at_least(1));

    one_of("+-")
        .or_not()
        .chain::<char, Vec<char>, _>(integer_part)
        .chain::<char, Vec<char>, _>(fraction.or_not().flatten())
        .chain::<char, Vec<char>, _>(exponent.or_not().flatten())
        .collect::<String>()
        .try_map(|text, span| {
            let cleaned = text.replace('_', "");
            let is_float = cleaned.contains(['.', 'e', 'E']);
            let parsed = if is_float {
                cleaned.parse::<f64>().map(Value::Float).ok()
            } else {
                cleaned.parse::<i64>().map(Value::Integer).ok()
            };
            parsed.ok_or_else(|| Simple::custom(span, format!("invalid number '{}'", text)))
        })
}

/// Parenthesized or bracketed text with nested groups and string literals balanced
fn balanced_group() -> impl Parser<char, (), Error = ValueError> + Clone {
    recursive(|group| {
        let literal = quoted_string('"').or(quoted_string('\'')).ignored();
        let plain =
            filter::<char, _, ValueError>(|c: &char| !matches!(c, '(' | ')' | '[' | ']' | '"' | '\''))
                .ignored();
        let contents = choice((literal, group, plain)).repeated().ignored();

        contents
            .clone()
            .delimited_by(just('('), just(')'))
            .or(contents.delimited_by(just('['), just(']')))
    })
}

fn value_parser(source: Arc<[char]>) -> impl Parser<char, Value, Error = ValueError> + Clone {
    recursive(move |value| {
        let string = quoted_string('"')
            .or(quoted_string('\''))
            .map(Value::String);
        let raw = raw_string('"').or(raw_string('\'')).map(Value::String);

        let list = value
            .padded()
            .separated_by(just(','))
            .allow_trailing()
            .padded()
            .delimited_by(just('['), just(']'))
            .map(Value::List);

        let call = text::ident()
            .then_ignore(just('(').rewind())
            .then_ignore(balanced_group())
            .map_with_span(move |_, span: Range<usize>| {
                Value::Call(source[span].iter().collect())
            });

        let bare = text::ident().try_map(|name: String, span| match name.as_str() {
            "True" => Ok(Value::Boolean(true)),
            "False" => Ok(Value::Boolean(false)),
            _ => Err(Simple::custom(
                span,
                format!("unsupported value '{}'", name),
            )),
        });

        choice((raw, string, number(), list, call, bare))
    })
}

fn describe(err: &ValueError) -> String {
    match err.reason() {
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed '{}'", delimiter),
        SimpleReason::Unexpected => match err.found() {
            Some(c) => format!("unexpected '{}'", c),
            None => "unexpected end of input".to_string(),
        },
    }
}

/// Parse one complete value literal.
pub fn parse_value(text: &str, position: Position) -> Result<Value, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::syntax("Missing value", position));
    }

    let chars: Arc<[char]> = text.chars().collect();
    value_parser(chars)
        .then_ignore(end())
        .parse(text)
        .map_err(|errors| {
            let reason = errors
                .first()
                .map_or_else(|| "unrecognized value".to_string(), describe);
            ParseError::syntax(format!("Invalid value '{}': {}", text, reason), position)
        })
}
