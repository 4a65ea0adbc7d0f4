// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The FontGet source format: typed model, structural rules, file validation
//! and the published JSON Schema.

pub mod document;
pub mod model;
pub mod rules;
pub mod validator;

pub use document::{source_schema, source_schema_pretty};
pub use model::{FileFormat, FontRecord, FontStyle, SourceFile, SourceInfo, Variant};
pub use rules::{check_source, is_valid_font_id};
pub use validator::{
    render_reports, SourceValidator, ValidationOutput, ValidationReport, ValidationSummary,
};
