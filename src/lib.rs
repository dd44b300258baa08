//! # aimd
//!
//! Front end for AIMD, a Markdown dialect that embeds typed declarations in
//! prose through `{{kind|payload}}` directives.
//!
//! The parser lives in the `aimd-parser` crate and is re-exported here as
//! [aimd]. Configuration loading lives in `aimd-config` and is re-exported as
//! [config].
//!
//! ## Testing
//!
//! For testing guidelines, see the [testing module](aimd::testing). Document
//! tests load verified samples and check structure with `assert_doc`.

pub use aimd_parser::aimd;

pub mod config {
    pub use aimd_config::{load_defaults, AimdConfig, Loader, OutputConfig, OutputFormat};
}
