// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! All diagnostic and operational log lines go through message types defined
//! here. Each message is a small struct borrowing its fields, with a `Display`
//! implementation for the human-readable text and a [`messages::StructuredLog`]
//! implementation that emits the same event with typed `tracing` fields.
//!
//! Messages are organized by subsystem:
//! * `messages::translator` - catalog fetching, per-font decisions, output files
//! * `messages::validation` - configuration and source file validation
//!
//! # Usage
//!
//! ```rust
//! use fontget_sources::observability::messages::StructuredLog;
//! use fontget_sources::observability::messages::translator::CatalogFetched;
//!
//! CatalogFetched {
//!     source: "google_fonts",
//!     entry_count: 1500,
//! }
//! .log();
//! ```

pub mod messages;
