// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration and source file validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A source file has been validated.
///
/// # Log Level
/// `info!` when valid, `warn!` when not
///
/// # Example
/// ```
/// use fontget_sources::observability::messages::validation::SourceValidated;
///
/// let msg = SourceValidated {
///     file: "sources/google-fonts.json",
///     valid: true,
///     error_count: 0,
///     warning_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SourceValidated<'a> {
    pub file: &'a str,
    pub valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Display for SourceValidated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let status = if self.valid { "valid" } else { "invalid" };
        write!(
            f,
            "Source '{}' is {}: {} errors, {} warnings",
            self.file, status, self.error_count, self.warning_count
        )
    }
}

impl StructuredLog for SourceValidated<'_> {
    fn log(&self) {
        if self.valid {
            tracing::info!(
                file = self.file,
                error_count = self.error_count,
                warning_count = self.warning_count,
                "{}", self
            );
        } else {
            tracing::warn!(
                file = self.file,
                error_count = self.error_count,
                warning_count = self.warning_count,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "source_validation",
            span_name = name,
            file = self.file,
            valid = self.valid,
        )
    }
}

/// A single schema violation inside a source file.
///
/// # Log Level
/// `debug!` - Detail already summarised by [`SourceValidated`]
pub struct SchemaViolationFound<'a> {
    pub file: &'a str,
    pub location: &'a str,
    pub message: &'a str,
}

impl Display for SchemaViolationFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.file, self.location, self.message)
    }
}

impl StructuredLog for SchemaViolationFound<'_> {
    fn log(&self) {
        tracing::debug!(
            file = self.file,
            location = self.location,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "schema_violation",
            span_name = name,
            file = self.file,
            location = self.location,
        )
    }
}

/// A configuration file was loaded and validated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub translator_count: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded configuration '{}' with {} translators",
            self.path, self.translator_count
        )
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            translator_count = self.translator_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("config", span_name = name, path = self.path)
    }
}
