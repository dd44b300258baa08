//! Verified sample documents
//!
//! Samples live in `aimd-parser/docs/samples/<name>.aimd`. They are loaded by
//! name, and each loaded sample can be tokenized, parsed or validated directly.

use crate::aimd::ast::{Diagnostic, Document, ParseError};
use crate::aimd::lexing::tokenize;
use crate::aimd::parsing::parse_document;
use crate::aimd::token::Token;
use crate::aimd::validation::validate;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const SAMPLE_EXTENSION: &str = "aimd";

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Sample not found: {0}")]
    NotFound(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A loaded sample
#[derive(Debug, Clone)]
pub struct SampleSource {
    pub name: String,
    pub source: String,
}

impl SampleSource {
    pub fn tokenize(&self) -> Vec<Token> {
        tokenize(&self.source)
    }

    pub fn parse(&self) -> Result<Document, ParseError> {
        parse_document(&self.source)
    }

    pub fn validate(&self) -> (bool, Vec<Diagnostic>) {
        validate(&self.source)
    }
}

/// Entry point for the sample corpus
pub struct Samples;

impl Samples {
    pub fn dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("docs/samples")
    }

    pub fn load(name: &str) -> Result<SampleSource, SampleError> {
        let path = Self::dir().join(format!("{}.{}", name, SAMPLE_EXTENSION));
        if !path.is_file() {
            return Err(SampleError::NotFound(name.to_string()));
        }
        let source = fs::read_to_string(&path).map_err(|source| SampleError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(SampleSource {
            name: name.to_string(),
            source,
        })
    }

    /// Load a sample's text, panicking if it is missing.
    pub fn source(name: &str) -> String {
        Self::load(name)
            .unwrap_or_else(|err| panic!("{}", err))
            .source
    }

    /// Names of every sample, sorted
    pub fn names() -> Result<Vec<String>, SampleError> {
        let dir = Self::dir();
        let entries = fs::read_dir(&dir).map_err(|source| SampleError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == SAMPLE_EXTENSION))
            .filter_map(|path| Some(path.file_stem()?.to_str()?.to_string()))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_known_sample() {
        let sample = Samples::load("experiment_basic").unwrap();
        assert_eq!(sample.name, "experiment_basic");
        assert!(sample.source.contains("{{var|"));
    }

    #[test]
    fn test_missing_sample() {
        let err = Samples::load("does_not_exist").unwrap_err();
        assert!(matches!(err, SampleError::NotFound(_)));
    }

    #[test]
    fn test_names_lists_corpus() {
        let names = Samples::names().unwrap();
        assert!(names.contains(&"experiment_basic".to_string()));
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
