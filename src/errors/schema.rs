// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// A single place where a document departs from the source schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location of the offending value, outermost key first
    pub path: Vec<String>,
    /// What is wrong with the value
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: &[String], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// The path joined the way reports show it, e.g. `fonts -> google.roboto -> variants`.
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(" -> ")
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.message)
    }
}

impl std::error::Error for SchemaViolation {}

/// Failures that prevent a validation run from producing reports at all.
#[derive(Error, Debug)]
pub enum ValidationFailure {
    /// A command-line path is neither a file nor a directory.
    #[error("{0} is not a valid file or directory")]
    NotFound(String),

    /// A directory could not be listed.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
