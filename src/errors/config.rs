// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

use crate::config::SourceKind;

/// Problems found while validating a loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// The same translator is listed more than once
    DuplicateTranslator {
        /// The repeated translator id
        id: SourceKind,
    },
    /// A translator endpoint is not an http(s) URL
    InvalidEndpoint {
        /// The translator the endpoint belongs to
        id: SourceKind,
        /// The rejected endpoint
        endpoint: String,
    },
    /// A translator limit of zero would produce an empty source
    ZeroLimit {
        /// The translator with the zero limit
        id: SourceKind,
    },
    /// The HTTP timeout is outside the allowed bounds
    TimeoutOutOfRange {
        /// The configured timeout
        timeout_seconds: u64,
        /// Smallest allowed timeout
        min: u64,
        /// Largest allowed timeout
        max: u64,
    },
    /// The output directory is empty
    EmptyOutputDir,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValidationError::DuplicateTranslator { id } => {
                write!(f, "Translator '{}' is configured more than once", id)
            }
            ConfigValidationError::InvalidEndpoint { id, endpoint } => {
                write!(
                    f,
                    "Translator '{}' has endpoint '{}' which is not an http(s) URL",
                    id, endpoint
                )
            }
            ConfigValidationError::ZeroLimit { id } => {
                write!(f, "Translator '{}' has limit 0; omit the limit to translate every font", id)
            }
            ConfigValidationError::TimeoutOutOfRange {
                timeout_seconds,
                min,
                max,
            } => {
                write!(
                    f,
                    "HTTP timeout of {}s is outside the allowed range {}..={}s",
                    timeout_seconds, min, max
                )
            }
            ConfigValidationError::EmptyOutputDir => write!(f, "Output directory must not be empty"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The configuration parsed but failed validation.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Invalid(Vec<ConfigValidationError>),
}

fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
