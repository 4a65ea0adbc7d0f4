// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for translation runs.
//!
//! This module contains message types for logging events related to:
//! * Translation lifecycle (start, completion, failure)
//! * Catalog fetching
//! * Fonts dropped during translation
//! * Source files written to disk

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Translation of one provider started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use fontget_sources::observability::messages::translator::TranslationStarted;
///
/// let msg = TranslationStarted {
///     source: "nerd_fonts",
///     endpoint: "https://api.github.com/repos/ryanoasis/nerd-fonts/releases",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TranslationStarted<'a> {
    pub source: &'a str,
    pub endpoint: &'a str,
}

impl Display for TranslationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Fetching fonts for '{}' from {}", self.source, self.endpoint)
    }
}

impl StructuredLog for TranslationStarted<'_> {
    fn log(&self) {
        tracing::info!(source = self.source, endpoint = self.endpoint, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "translation",
            span_name = name,
            source = self.source,
            endpoint = self.endpoint,
        )
    }
}

/// The provider catalog was downloaded and parsed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct CatalogFetched<'a> {
    pub source: &'a str,
    pub entry_count: usize,
}

impl Display for CatalogFetched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Found {} catalog entries for '{}'", self.entry_count, self.source)
    }
}

impl StructuredLog for CatalogFetched<'_> {
    fn log(&self) {
        tracing::info!(source = self.source, entry_count = self.entry_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "catalog",
            span_name = name,
            source = self.source,
            entry_count = self.entry_count,
        )
    }
}

/// A catalog entry was dropped instead of becoming a font record.
///
/// # Log Level
/// `warn!` - Degraded output
///
/// # Example
/// ```
/// use fontget_sources::observability::messages::translator::FontSkipped;
///
/// let msg = FontSkipped {
///     source: "open_foundry",
///     font_name: "Mystery Sans",
///     reason: "no usable download links",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct FontSkipped<'a> {
    pub source: &'a str,
    pub font_name: &'a str,
    pub reason: &'a str,
}

impl Display for FontSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping font '{}' from '{}': {}",
            self.font_name, self.source, self.reason
        )
    }
}

impl StructuredLog for FontSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            source = self.source,
            font_name = self.font_name,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "font_skipped",
            span_name = name,
            source = self.source,
            font_name = self.font_name,
        )
    }
}

/// Optional per-family details could not be fetched; translation falls back.
///
/// # Log Level
/// `warn!` - Degraded output
pub struct DetailsFetchFailed<'a> {
    pub source: &'a str,
    pub family: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for DetailsFetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to fetch details for font '{}' from '{}': {}",
            self.family, self.source, self.error
        )
    }
}

impl StructuredLog for DetailsFetchFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            source = self.source,
            family = self.family,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "details_fetch",
            span_name = name,
            source = self.source,
            family = self.family,
        )
    }
}

/// Translation finished and produced an in-memory source.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TranslationCompleted<'a> {
    pub source: &'a str,
    pub font_count: usize,
    pub duration: Duration,
}

impl Display for TranslationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transformed {} fonts for '{}' in {:?}",
            self.font_count, self.source, self.duration
        )
    }
}

impl StructuredLog for TranslationCompleted<'_> {
    fn log(&self) {
        let duration_ms = self.duration.as_millis() as u64;
        tracing::info!(
            source = self.source,
            font_count = self.font_count,
            duration_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "translation_completed",
            span_name = name,
            source = self.source,
            font_count = self.font_count,
        )
    }
}

/// A source file was written to disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SourceWritten<'a> {
    pub path: &'a str,
    pub font_count: usize,
}

impl Display for SourceWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Successfully generated {} with {} fonts",
            self.path, self.font_count
        )
    }
}

impl StructuredLog for SourceWritten<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, font_count = self.font_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "source_written",
            span_name = name,
            path = self.path,
            font_count = self.font_count,
        )
    }
}

/// Translation of one provider failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct TranslationFailed<'a> {
    pub source: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TranslationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Translation of '{}' failed: {}", self.source, self.error)
    }
}

impl StructuredLog for TranslationFailed<'_> {
    fn log(&self) {
        tracing::error!(source = self.source, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "translation_failed",
            span_name = name,
            source = self.source,
        )
    }
}
