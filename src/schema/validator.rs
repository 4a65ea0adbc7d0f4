// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation of source files on disk.
//!
//! [`SourceValidator`] turns files and directories into [`ValidationReport`]s.
//! Schema violations make a file invalid; quality warnings never do.

use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ValidationFailure;
use crate::observability::messages::validation::{SchemaViolationFound, SourceValidated};
use crate::observability::messages::StructuredLog;
use crate::schema::rules::check_source;

/// Outcome of validating one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub file: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn failed(file: &str, error: String) -> Self {
        Self {
            valid: false,
            file: file.to_string(),
            errors: vec![error],
            warnings: vec![],
        }
    }
}

/// Totals over a set of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationSummary {
    pub fn from_reports(reports: &[ValidationReport]) -> Self {
        let valid = reports.iter().filter(|r| r.valid).count();
        Self {
            total: reports.len(),
            valid,
            invalid: reports.len() - valid,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

/// Machine-readable result of a validation run: the totals followed by every report.
#[derive(Debug, Serialize)]
pub struct ValidationOutput<'a> {
    pub summary: ValidationSummary,
    pub reports: &'a [ValidationReport],
}

impl<'a> ValidationOutput<'a> {
    pub fn new(reports: &'a [ValidationReport]) -> Self {
        Self {
            summary: ValidationSummary::from_reports(reports),
            reports,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Validates source documents against the source format.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceValidator;

impl SourceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an already parsed document. `file` only labels the report.
    pub fn validate_value(&self, file: &str, value: &Value) -> ValidationReport {
        let violations = check_source(value);
        for violation in &violations {
            SchemaViolationFound {
                file,
                location: &violation.location(),
                message: &violation.message,
            }
            .log();
        }

        let report = ValidationReport {
            valid: violations.is_empty(),
            file: file.to_string(),
            errors: violations.iter().map(ToString::to_string).collect(),
            warnings: quality_warnings(value),
        };

        SourceValidated {
            file,
            valid: report.valid,
            error_count: report.errors.len(),
            warning_count: report.warnings.len(),
        }
        .log();

        report
    }

    /// Validate JSON text.
    pub fn validate_str(&self, file: &str, content: &str) -> ValidationReport {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => self.validate_value(file, &value),
            Err(e) => {
                let report = ValidationReport::failed(file, format!("JSON syntax error: {}", e));
                SourceValidated {
                    file,
                    valid: false,
                    error_count: 1,
                    warning_count: 0,
                }
                .log();
                report
            }
        }
    }

    /// Validate a single file. Read failures are reported, not returned.
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        let file = path.as_ref().display().to_string();
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => self.validate_str(&file, &content),
            Err(e) => ValidationReport::failed(&file, format!("Validation error: {}", e)),
        }
    }

    /// Validate every `*.json` file directly inside `dir`, in file name order.
    pub fn validate_directory<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> Result<Vec<ValidationReport>, ValidationFailure> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| ValidationFailure::ReadDir {
            path: dir.display().to_string(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        Ok(files.iter().map(|path| self.validate_file(path)).collect())
    }

    /// Validate each path as a file or a directory.
    ///
    /// Stops at the first path that is neither.
    pub fn validate_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<Vec<ValidationReport>, ValidationFailure> {
        let mut reports = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_file() {
                reports.push(self.validate_file(path));
            } else if path.is_dir() {
                reports.extend(self.validate_directory(path)?);
            } else {
                return Err(ValidationFailure::NotFound(path.display().to_string()));
            }
        }
        Ok(reports)
    }
}

/// Issues worth a look that the format itself allows.
fn quality_warnings(value: &Value) -> Vec<String> {
    let mut warnings = Vec::new();
    let fonts = value.get("fonts").and_then(Value::as_object);

    if fonts.map_or(true, |fonts| fonts.is_empty()) {
        warnings.push("No fonts found in source".to_string());
    }

    let Some(fonts) = fonts else {
        return warnings;
    };

    let without_popularity = fonts
        .values()
        .filter(|font| font.get("popularity").is_none())
        .count();
    if without_popularity > 0 {
        warnings.push(format!("Fonts without popularity data: {}", without_popularity));
    }

    let single_variant = fonts
        .values()
        .filter(|font| {
            font.get("variants")
                .and_then(Value::as_array)
                .is_some_and(|variants| variants.len() == 1)
        })
        .count();
    if single_variant > 0 {
        warnings.push(format!("Fonts with only one variant: {}", single_variant));
    }

    warnings
}

/// Render reports for the terminal.
pub fn render_reports(reports: &[ValidationReport]) -> String {
    let summary = ValidationSummary::from_reports(reports);
    let mut out = String::new();

    let _ = writeln!(out, "\n=== FontGet Source Validation Results ===");
    let _ = writeln!(out, "Total files: {}", summary.total);
    let _ = writeln!(out, "Valid files: {}", summary.valid);
    let _ = writeln!(out, "Invalid files: {}", summary.invalid);
    let _ = writeln!(out);

    for report in reports {
        let status = if report.valid { "✅ VALID" } else { "❌ INVALID" };
        let _ = writeln!(out, "{} {}", status, report.file);

        if !report.errors.is_empty() {
            let _ = writeln!(out, "  Errors:");
            for error in &report.errors {
                let _ = writeln!(out, "    • {}", error);
            }
        }

        if !report.warnings.is_empty() {
            let _ = writeln!(out, "  Warnings:");
            for warning in &report.warnings {
                let _ = writeln!(out, "    ⚠️  {}", warning);
            }
        }

        let _ = writeln!(out);
    }

    out
}
