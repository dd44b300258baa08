//! Step, check and reference payloads
//!
//! ```text
//! <step>  = <name> ("," <level>)? ("," <keyword> "=" <value>)*      keywords: level, check, checked_message
//! <check> = <name> ("," "checked_message" "=" <string>)?
//! <ref>   = <id>
//! <cite>  = <id> ("," <id>)*
//! ```

use super::scanner::{find_assignment, split_top_level};
use super::values::parse_value;
use crate::aimd::ast::{CheckNode, CiteNode, ParseError, Position, RefNode, StepNode, Value};

const DEFAULT_STEP_LEVEL: u32 = 1;

/// Split a payload into its leading name and the argument segments after it.
fn name_and_arguments<'a>(
    payload: &'a str,
    what: &str,
    position: Position,
) -> Result<(&'a str, Vec<&'a str>), ParseError> {
    let mut segments = split_top_level(payload, ',').map_err(|err| err.at(position))?;
    let name = segments.remove(0);
    if name.is_empty() {
        return Err(ParseError::syntax(format!("Missing {} name", what), position));
    }
    Ok((name, segments))
}

fn step_level(value: &Value, position: Position) -> Result<u32, ParseError> {
    value
        .as_i64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|level| *level > 0)
        .ok_or_else(|| {
            ParseError::syntax(
                format!("Step level must be a positive integer, found {}", value),
                position,
            )
        })
}

fn message_text(value: Value, position: Position) -> Result<String, ParseError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(ParseError::syntax(
            format!("checked_message must be a string, found {}", other.type_name()),
            position,
        )),
    }
}

pub fn parse_step(payload: &str, position: Position) -> Result<StepNode, ParseError> {
    let (name, arguments) = name_and_arguments(payload, "step", position)?;
    let mut step = StepNode {
        name: name.to_string(),
        level: DEFAULT_STEP_LEVEL,
        check: false,
        checked_message: None,
        position,
    };

    for (index, segment) in arguments.iter().enumerate() {
        let Some(eq) = find_assignment(segment).map_err(|err| err.at(position))? else {
            if index > 0 {
                return Err(ParseError::syntax(
                    format!("Unexpected positional argument '{}' in step '{}'", segment, name),
                    position,
                ));
            }
            step.level = step_level(&parse_value(segment, position)?, position)?;
            continue;
        };

        let key = segment[..eq].trim();
        let value = parse_value(&segment[eq + 1..], position)?;
        match key {
            "level" => step.level = step_level(&value, position)?,
            "check" => {
                step.check = value.as_bool().ok_or_else(|| {
                    ParseError::syntax(
                        format!("Step argument 'check' must be True or False, found {}", value),
                        position,
                    )
                })?;
            }
            "checked_message" => step.checked_message = Some(message_text(value, position)?),
            other => {
                return Err(ParseError::syntax(
                    format!("Unknown step argument '{}'", other),
                    position,
                ))
            }
        }
    }

    Ok(step)
}

pub fn parse_check(payload: &str, position: Position) -> Result<CheckNode, ParseError> {
    let (name, arguments) = name_and_arguments(payload, "check", position)?;
    let mut check = CheckNode {
        name: name.to_string(),
        checked_message: None,
        position,
    };

    for segment in arguments {
        let eq = find_assignment(segment)
            .map_err(|err| err.at(position))?
            .filter(|eq| segment[..*eq].trim() == "checked_message")
            .ok_or_else(|| {
                ParseError::syntax(
                    format!("Unexpected argument '{}' in check '{}'", segment, name),
                    position,
                )
            })?;
        check.checked_message = Some(message_text(
            parse_value(&segment[eq + 1..], position)?,
            position,
        )?);
    }

    Ok(check)
}

/// Reference ids are non-empty and contain no whitespace or commas.
pub fn is_reference_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(|c| c.is_whitespace() || c == ',')
}

pub fn parse_reference(payload: &str, position: Position) -> Result<RefNode, ParseError> {
    let ref_id = payload.trim();
    if ref_id.is_empty() {
        return Err(ParseError::syntax("Missing reference id", position));
    }
    if !is_reference_id(ref_id) {
        return Err(ParseError::syntax(
            format!("Invalid reference id '{}'", ref_id),
            position,
        ));
    }
    Ok(RefNode {
        ref_id: ref_id.to_string(),
        position,
    })
}

pub fn parse_citation(payload: &str, position: Position) -> Result<CiteNode, ParseError> {
    if payload.trim().is_empty() {
        return Err(ParseError::syntax("Citation needs at least one id", position));
    }

    let ref_ids = payload
        .split(',')
        .map(str::trim)
        .map(|id| {
            if is_reference_id(id) {
                Ok(id.to_string())
            } else if id.is_empty() {
                Err(ParseError::syntax(
                    format!("Empty id in citation '{}'", payload),
                    position,
                ))
            } else {
                Err(ParseError::syntax(
                    format!("Invalid citation id '{}'", id),
                    position,
                ))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CiteNode { ref_ids, position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aimd::ast::ErrorKind;

    fn pos() -> Position {
        Position::new(4, 4, 2, 20)
    }

    #[test]
    fn test_step_defaults() {
        let step = parse_step("prepare_sample", pos()).unwrap();
        assert_eq!(step.name, "prepare_sample");
        assert_eq!(step.level, 1);
        assert!(!step.check);
        assert_eq!(step.checked_message, None);
        assert_eq!(step.position, pos());
    }

    #[test]
    fn test_step_with_all_arguments() {
        let step = parse_step(r#"mix, 2, check=True, checked_message="Mixed well""#, pos()).unwrap();
        assert_eq!(step.level, 2);
        assert!(step.check);
        assert_eq!(step.checked_message.as_deref(), Some("Mixed well"));

        let keyword = parse_step("mix, level=3", pos()).unwrap();
        assert_eq!(keyword.level, 3);
    }

    #[test]
    fn test_step_errors() {
        for payload in [
            "mix, 0",
            "mix, -1",
            "mix, 1.5",
            "mix, 2, 3",
            "mix, check=1",
            "mix, color=\"red\"",
            "mix, checked_message=5",
            ", 2",
        ] {
            let err = parse_step(payload, pos()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSyntax, "payload: {}", payload);
        }
    }

    #[test]
    fn test_check() {
        let check = parse_check("ph_ok", pos()).unwrap();
        assert_eq!(check.name, "ph_ok");
        assert_eq!(check.checked_message, None);

        let check = parse_check(r#"ph_ok, checked_message="pH in range""#, pos()).unwrap();
        assert_eq!(check.checked_message.as_deref(), Some("pH in range"));

        assert!(parse_check("ph_ok, level=2", pos()).is_err());
        assert!(parse_check("ph_ok, note", pos()).is_err());
    }

    #[test]
    fn test_reference() {
        assert_eq!(parse_reference("sample_id", pos()).unwrap().ref_id, "sample_id");
        assert!(parse_reference("", pos()).is_err());
        assert!(parse_reference("a b", pos()).is_err());
        assert!(parse_reference("a,b", pos()).is_err());
    }

    #[test]
    fn test_citation() {
        let cite = parse_citation("ref1, ref2,ref3", pos()).unwrap();
        assert_eq!(cite.ref_ids, vec!["ref1", "ref2", "ref3"]);

        assert!(parse_citation("", pos()).is_err());
        assert!(parse_citation("ref1,,ref2", pos()).is_err());
        assert!(parse_citation("ref1,", pos()).is_err());
        assert!(parse_citation("ref 1", pos()).is_err());
    }
}
