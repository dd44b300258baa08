//! Fluent assertions over a built document

use crate::aimd::ast::{CheckNode, Declaration, Document, StepNode, Value};

pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn var_count(self, expected: usize) -> Self {
        let actual = self.doc.vars.len();
        assert_eq!(
            actual,
            expected,
            "document: Expected {} vars, found {}: [{}]",
            expected,
            actual,
            self.doc
                .vars
                .iter()
                .map(|v| v.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self
    }

    pub fn step_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.steps.len(),
            expected,
            "document: Expected {} steps",
            expected
        );
        self
    }

    pub fn check_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.checks.len(),
            expected,
            "document: Expected {} checks",
            expected
        );
        self
    }

    pub fn var<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(DeclarationAssertion<'a>) -> DeclarationAssertion<'a>,
    {
        let decl = self.doc.vars.get(index).unwrap_or_else(|| {
            panic!(
                "document: Expected a var at index {}, but there are only {}",
                index,
                self.doc.vars.len()
            )
        });
        assertion(DeclarationAssertion {
            decl,
            context: format!("vars[{}]", index),
        });
        self
    }

    pub fn step<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StepAssertion<'a>) -> StepAssertion<'a>,
    {
        let step = self.doc.steps.get(index).unwrap_or_else(|| {
            panic!(
                "document: Expected a step at index {}, but there are only {}",
                index,
                self.doc.steps.len()
            )
        });
        assertion(StepAssertion {
            step,
            context: format!("steps[{}]", index),
        });
        self
    }

    pub fn check<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CheckAssertion<'a>) -> CheckAssertion<'a>,
    {
        let check = self.doc.checks.get(index).unwrap_or_else(|| {
            panic!(
                "document: Expected a check at index {}, but there are only {}",
                index,
                self.doc.checks.len()
            )
        });
        assertion(CheckAssertion {
            check,
            context: format!("checks[{}]", index),
        });
        self
    }

    pub fn ref_var_ids(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.doc.ref_vars.iter().map(|r| r.ref_id.as_str()).collect();
        assert_eq!(actual, expected, "document: ref_var ids differ");
        self
    }

    pub fn ref_step_ids(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.doc.ref_steps.iter().map(|r| r.ref_id.as_str()).collect();
        assert_eq!(actual, expected, "document: ref_step ids differ");
        self
    }

    pub fn ref_fig_ids(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.doc.ref_figs.iter().map(|r| r.ref_id.as_str()).collect();
        assert_eq!(actual, expected, "document: ref_fig ids differ");
        self
    }

    /// Ids of every citation, one inner slice per `cite` directive
    pub fn cite_ids(self, expected: &[&[&str]]) -> Self {
        let actual: Vec<Vec<&str>> = self
            .doc
            .cites
            .iter()
            .map(|c| c.ref_ids.iter().map(String::as_str).collect())
            .collect();
        assert_eq!(actual, expected, "document: citation ids differ");
        self
    }
}

pub struct DeclarationAssertion<'a> {
    decl: &'a Declaration,
    context: String,
}

impl<'a> DeclarationAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        let actual = self.decl.name();
        assert_eq!(
            actual, expected,
            "{}: Expected name '{}', found '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn type_annotation(self, expected: &str) -> Self {
        let actual = self.decl.base().type_annotation.as_deref();
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected type '{}', found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn no_type(self) -> Self {
        let actual = &self.decl.base().type_annotation;
        assert!(
            actual.is_none(),
            "{}: Expected no type annotation, found {:?}",
            self.context,
            actual
        );
        self
    }

    pub fn default(self, expected: Value) -> Self {
        let actual = &self.decl.base().default;
        assert_eq!(
            actual.as_ref(),
            Some(&expected),
            "{}: Unexpected default value",
            self.context
        );
        self
    }

    pub fn no_default(self) -> Self {
        assert!(
            self.decl.base().default.is_none(),
            "{}: Expected no default, found {:?}",
            self.context,
            self.decl.base().default
        );
        self
    }

    pub fn kwarg(self, key: &str, expected: Value) -> Self {
        let kwargs = &self.decl.base().kwargs;
        match kwargs.get(key) {
            Some(actual) => assert_eq!(
                actual, &expected,
                "{}: Expected kwarg '{}' to be {}, found {}",
                self.context, key, expected, actual
            ),
            None => panic!(
                "{}: Expected kwarg '{}', found keys [{}]",
                self.context,
                key,
                kwargs.keys().collect::<Vec<_>>().join(", ")
            ),
        }
        self
    }

    pub fn kwarg_keys(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.decl.base().kwargs.keys().collect();
        assert_eq!(actual, expected, "{}: kwarg keys differ", self.context);
        self
    }

    pub fn plain(self) -> Self {
        assert!(
            !self.decl.is_table(),
            "{}: Expected a plain declaration, found a table",
            self.context
        );
        self
    }

    pub fn table(self) -> Self {
        assert!(
            self.decl.is_table(),
            "{}: Expected a table declaration, found a plain one",
            self.context
        );
        self
    }

    pub fn subvar_names(self, expected: &[&str]) -> Self {
        let table = self.expect_table();
        let actual: Vec<_> = table.subvars.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(actual, expected, "{}: subvar names differ", self.context);
        self
    }

    /// Assert a subvar's effective type (`str` when unannotated)
    pub fn subvar_type(self, name: &str, expected: &str) -> Self {
        let table = self.expect_table();
        let subvar = table
            .subvar(name)
            .unwrap_or_else(|| panic!("{}: No subvar named '{}'", self.context, name));
        assert_eq!(
            subvar.effective_type(),
            expected,
            "{}: Unexpected type for subvar '{}'",
            self.context,
            name
        );
        self
    }

    pub fn item_type(self, expected: Option<&str>) -> Self {
        let actual = self.expect_table().item_type_name();
        assert_eq!(actual, expected, "{}: item types differ", self.context);
        self
    }

    pub fn item_type_explicit(self, expected: bool) -> Self {
        let actual = self.expect_table().item_type_explicit;
        assert_eq!(
            actual, expected,
            "{}: Expected item_type_explicit {}",
            self.context, expected
        );
        self
    }

    pub fn at(self, start_line: usize, start_col: usize) -> Self {
        let position = self.decl.position();
        assert_eq!(
            (position.start_line, position.start_col),
            (start_line, start_col),
            "{}: Expected to start at line {}, col {}, found {}",
            self.context,
            start_line,
            start_col,
            position
        );
        self
    }

    fn expect_table(&self) -> &'a crate::aimd::ast::TableNode {
        self.decl
            .as_table()
            .unwrap_or_else(|| panic!("{}: Expected a table declaration", self.context))
    }
}

pub struct StepAssertion<'a> {
    step: &'a StepNode,
    context: String,
}

impl StepAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.step.name, expected,
            "{}: Expected name '{}', found '{}'",
            self.context, expected, self.step.name
        );
        self
    }

    pub fn level(self, expected: u32) -> Self {
        assert_eq!(
            self.step.level, expected,
            "{}: Expected level {}, found {}",
            self.context, expected, self.step.level
        );
        self
    }

    pub fn check(self, expected: bool) -> Self {
        assert_eq!(
            self.step.check, expected,
            "{}: Expected check flag {}",
            self.context, expected
        );
        self
    }

    pub fn checked_message(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.step.checked_message.as_deref(),
            expected,
            "{}: checked messages differ",
            self.context
        );
        self
    }
}

pub struct CheckAssertion<'a> {
    check: &'a CheckNode,
    context: String,
}

impl CheckAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.check.name, expected,
            "{}: Expected name '{}', found '{}'",
            self.context, expected, self.check.name
        );
        self
    }

    pub fn checked_message(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.check.checked_message.as_deref(),
            expected,
            "{}: checked messages differ",
            self.context
        );
        self
    }
}
