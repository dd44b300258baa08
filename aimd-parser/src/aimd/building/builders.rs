//! Node builders for each directive kind

use crate::aimd::ast::{
    CheckNode, CiteNode, Declaration, Document, ParseError, RefNode, StepNode, TableNode,
};
use crate::aimd::parsing::declarations::{parse_declaration, DeclarationPayload};
use crate::aimd::parsing::directives::{parse_check, parse_citation, parse_reference, parse_step};
use crate::aimd::parsing::types::{list_type, synthesize_item_type, ListType};
use crate::aimd::token::{Token, TokenKind};
use tracing::{debug, trace};

/// One built directive
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Declaration(Declaration),
    Step(StepNode),
    Check(CheckNode),
    RefVar(RefNode),
    RefStep(RefNode),
    RefFig(RefNode),
    Cite(CiteNode),
}

/// Decide between a plain and a table declaration.
///
/// A declaration is a table when it comes from `var_table`, has a `subvars`
/// clause, or is annotated `list` / `list[Item]`. The item type is the explicit
/// `Item` when given. A bare `list` without subvars stays unconstrained; every
/// other table gets a name synthesized from its own.
pub fn classify_declaration(kind: TokenKind, payload: DeclarationPayload) -> Declaration {
    let DeclarationPayload { var, subvars } = payload;
    let list = var.type_annotation.as_deref().and_then(list_type);
    let forced = kind == TokenKind::VarTable || subvars.is_some();

    let (item_type, item_type_explicit) = match list {
        None if !forced => return Declaration::Var(var),
        Some(ListType::Of(item)) => (Some(item), true),
        Some(ListType::Bare) if !forced => (None, false),
        _ => (Some(synthesize_item_type(&var.name)), false),
    };

    Declaration::Table(TableNode {
        var,
        subvars: subvars.unwrap_or_default(),
        item_type,
        item_type_explicit,
    })
}

/// Build the node for one token, or `None` for the END marker.
pub fn build_node(token: &Token) -> Result<Option<Node>, ParseError> {
    let payload = token.payload.as_str();
    let position = token.position;

    let node = match token.kind {
        TokenKind::Var | TokenKind::VarTable => Node::Declaration(classify_declaration(
            token.kind,
            parse_declaration(payload, position)?,
        )),
        TokenKind::Step => Node::Step(parse_step(payload, position)?),
        TokenKind::Check => Node::Check(parse_check(payload, position)?),
        TokenKind::RefVar => Node::RefVar(parse_reference(payload, position)?),
        TokenKind::RefStep => Node::RefStep(parse_reference(payload, position)?),
        TokenKind::RefFig => Node::RefFig(parse_reference(payload, position)?),
        TokenKind::Cite => Node::Cite(parse_citation(payload, position)?),
        TokenKind::End => return Ok(None),
    };
    Ok(Some(node))
}

impl Document {
    /// Append a node to the collection for its category.
    pub fn push(&mut self, node: Node) {
        match node {
            Node::Declaration(decl) => self.vars.push(decl),
            Node::Step(step) => self.steps.push(step),
            Node::Check(check) => self.checks.push(check),
            Node::RefVar(r) => self.ref_vars.push(r),
            Node::RefStep(r) => self.ref_steps.push(r),
            Node::RefFig(r) => self.ref_figs.push(r),
            Node::Cite(cite) => self.cites.push(cite),
        }
    }
}

/// A document built from every token that parsed, plus the errors of those that didn't
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub document: Document,
    /// Errors in source order, with the kind of token that raised each
    pub errors: Vec<(TokenKind, ParseError)>,
}

impl BuildOutcome {
    /// True when every declaring directive was built, so the set of declared
    /// names is complete.
    pub fn declarations_complete(&self) -> bool {
        !self.errors.iter().any(|(kind, _)| kind.is_declaration())
    }

    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first().map(|(_, err)| err)
    }
}

/// Build a document from a token stream.
pub fn build_document(tokens: &[Token]) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();

    for token in tokens {
        match build_node(token) {
            Ok(Some(node)) => outcome.document.push(node),
            Ok(None) => {}
            Err(err) => {
                trace!(kind = %token.kind, error = %err, "directive failed to build");
                outcome.errors.push((token.kind, err));
            }
        }
    }

    debug!(
        nodes = outcome.document.node_count(),
        errors = outcome.errors.len(),
        "built document"
    );
    outcome
}
