//! The parse result

use super::nodes::{CheckNode, CiteNode, Declaration, RefNode, StepNode};
use serde::Serialize;

/// Every node of one document, grouped by directive category in source order.
///
/// Built once per parse. Plain and table declarations share `vars`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub vars: Vec<Declaration>,
    pub steps: Vec<StepNode>,
    pub checks: Vec<CheckNode>,
    pub ref_vars: Vec<RefNode>,
    pub ref_steps: Vec<RefNode>,
    pub ref_figs: Vec<RefNode>,
    pub cites: Vec<CiteNode>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
            && self.steps.is_empty()
            && self.checks.is_empty()
            && self.ref_vars.is_empty()
            && self.ref_steps.is_empty()
            && self.ref_figs.is_empty()
            && self.cites.is_empty()
    }

    pub fn var(&self, name: &str) -> Option<&Declaration> {
        self.vars.iter().find(|v| v.name() == name)
    }

    pub fn step(&self, name: &str) -> Option<&StepNode> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Total node count across all categories
    pub fn node_count(&self) -> usize {
        self.vars.len()
            + self.steps.len()
            + self.checks.len()
            + self.ref_vars.len()
            + self.ref_steps.len()
            + self.ref_figs.len()
            + self.cites.len()
    }
}
