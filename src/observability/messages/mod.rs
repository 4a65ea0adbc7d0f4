// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `translator` - catalog fetching and source file generation events
//! * `validation` - configuration and schema validation events

use tracing::Span;

pub mod translator;
pub mod validation;

/// A log message that knows its level and its structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its natural level.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
