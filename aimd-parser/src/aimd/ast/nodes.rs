//! Node types produced from directives

use super::range::Position;
use super::value::{Kwargs, Value};
use serde::Serialize;

/// Type assumed for a declaration without an annotation
pub const DEFAULT_TYPE: &str = "str";

/// Base record shared by every variable declaration, and the shape of a subvar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarNode {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default: Option<Value>,
    pub kwargs: Kwargs,
    pub position: Position,
}

impl VarNode {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            type_annotation: None,
            default: None,
            kwargs: Kwargs::new(),
            position,
        }
    }

    /// The annotation, or the unconstrained string type when there is none.
    pub fn effective_type(&self) -> &str {
        self.type_annotation.as_deref().unwrap_or(DEFAULT_TYPE)
    }
}

/// A variable holding a list of homogeneous rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableNode {
    #[serde(flatten)]
    pub var: VarNode,
    pub subvars: Vec<VarNode>,
    /// Row type: the `X` of `list[X]`, or a name synthesized from the table's
    /// own name. `None` for a bare `list`.
    pub item_type: Option<String>,
    /// Whether `item_type` came from an explicit `list[X]` annotation.
    pub item_type_explicit: bool,
}

impl TableNode {
    pub fn item_type_name(&self) -> Option<&str> {
        self.item_type.as_deref()
    }

    pub fn subvar(&self, name: &str) -> Option<&VarNode> {
        self.subvars.iter().find(|s| s.name == name)
    }
}

/// A `var` or `var_table` directive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Declaration {
    Var(VarNode),
    Table(TableNode),
}

impl Declaration {
    pub fn base(&self) -> &VarNode {
        match self {
            Declaration::Var(var) => var,
            Declaration::Table(table) => &table.var,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn position(&self) -> Position {
        self.base().position
    }

    pub fn as_table(&self) -> Option<&TableNode> {
        match self {
            Declaration::Table(table) => Some(table),
            Declaration::Var(_) => None,
        }
    }

    pub fn is_table(&self) -> bool {
        self.as_table().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepNode {
    pub name: String,
    /// Nesting depth, 1 for top-level steps
    pub level: u32,
    pub check: bool,
    pub checked_message: Option<String>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckNode {
    pub name: String,
    pub checked_message: Option<String>,
    pub position: Position,
}

/// Target of a `ref_var`, `ref_step` or `ref_fig` directive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefNode {
    pub ref_id: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CiteNode {
    pub ref_ids: Vec<String>,
    pub position: Position,
}
