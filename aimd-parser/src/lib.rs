//! # aimd-parser
//!
//! Front end for the AIMD format: prose with embedded `{{kind|payload}}`
//! directives that declare variables, tables, steps and checkpoints, and that
//! reference them.
//!
//! The pipeline is linear:
//!
//! ```text
//! source ──▶ lexing ──▶ tokens ──▶ parsing (per payload) ──▶ building ──▶ Document
//!                                                                          │
//!                                                   validation ◀───────────┘
//! ```
//!
//! Entry points live in [aimd](crate::aimd):
//!     - [`parse_document`](aimd::parse_document): strict, returns the first error.
//!     - [`validate`](aimd::validate): collect-all, returns every diagnostic.
//!     - [`extract_vars`](aimd::extract_vars): flat JSON view for older callers.
//!
//! For testing guidelines and sample documents see the [testing module](aimd::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod aimd;
