// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod schema;
mod translator;

pub use config::{ConfigError, ConfigValidationError};
pub use schema::{SchemaViolation, ValidationFailure};
pub use translator::TranslatorError;
