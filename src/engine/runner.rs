// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential translation runner.
//!
//! Translators run one after another. Each result is written to the output
//! directory and optionally validated; a failing translator is recorded and
//! the remaining ones still run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::Instrument;

use crate::config::SourceKind;
use crate::errors::TranslatorError;
use crate::observability::messages::translator::{
    SourceWritten, TranslationCompleted, TranslationFailed, TranslationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::schema::{SourceValidator, ValidationReport};
use crate::traits::Translator;

/// What a successful translation produced.
#[derive(Debug, Clone)]
pub struct TranslationSummary {
    pub output_path: PathBuf,
    pub font_count: usize,
    pub duration: Duration,
    /// Present when output validation is enabled
    pub validation: Option<ValidationReport>,
}

impl TranslationSummary {
    /// True unless validation ran and found schema errors.
    pub fn is_valid(&self) -> bool {
        self.validation.as_ref().map_or(true, |report| report.valid)
    }
}

/// Result of running one translator.
#[derive(Debug)]
pub struct TranslationOutcome {
    pub source: SourceKind,
    pub result: Result<TranslationSummary, TranslatorError>,
}

impl TranslationOutcome {
    /// The translator succeeded and its output passed validation (if it ran).
    pub fn succeeded(&self) -> bool {
        self.result
            .as_ref()
            .map_or(false, TranslationSummary::is_valid)
    }
}

pub struct TranslationRunner {
    output_dir: PathBuf,
    validate: bool,
    validator: SourceValidator,
}

impl TranslationRunner {
    pub fn new(output_dir: impl Into<PathBuf>, validate: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            validate,
            validator: SourceValidator::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run every translator in order and collect one outcome per translator.
    pub async fn run(&self, translators: &[Box<dyn Translator>]) -> Vec<TranslationOutcome> {
        let mut outcomes = Vec::with_capacity(translators.len());
        for translator in translators {
            let result = self.run_one(translator.as_ref()).await;
            outcomes.push(TranslationOutcome {
                source: translator.source_kind(),
                result,
            });
        }
        outcomes
    }

    /// Translate, write and (optionally) validate a single source.
    pub async fn run_one(
        &self,
        translator: &dyn Translator,
    ) -> Result<TranslationSummary, TranslatorError> {
        let source = translator.source_kind();
        let endpoint = translator.endpoint();
        let start_msg = TranslationStarted {
            source: source.as_str(),
            endpoint: &endpoint,
        };
        let span = start_msg.span("translate");
        start_msg.log();

        let result = self.translate_and_write(translator).instrument(span).await;
        if let Err(error) = &result {
            TranslationFailed {
                source: source.as_str(),
                error,
            }
            .log();
        }
        result
    }

    async fn translate_and_write(
        &self,
        translator: &dyn Translator,
    ) -> Result<TranslationSummary, TranslatorError> {
        let start_time = Instant::now();
        let source_file = translator.translate().await?;
        let duration = start_time.elapsed();
        let font_count = source_file.font_count();

        TranslationCompleted {
            source: translator.source_kind().as_str(),
            font_count,
            duration,
        }
        .log();

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let output_path = self.output_dir.join(translator.output_file());
        let mut json = source_file.to_json_pretty()?;
        json.push('\n');
        tokio::fs::write(&output_path, json).await?;

        SourceWritten {
            path: &output_path.display().to_string(),
            font_count,
        }
        .log();

        let validation = self
            .validate
            .then(|| self.validator.validate_file(&output_path));

        Ok(TranslationSummary {
            output_path,
            font_count,
            duration,
            validation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translators::stub::{FailingTranslator, StubTranslator};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_writes_and_validates() {
        let dir = TempDir::new().unwrap();
        let runner = TranslationRunner::new(dir.path(), true);
        let translators: Vec<Box<dyn Translator>> =
            vec![Box::new(StubTranslator::new(SourceKind::NerdFonts, 3))];

        let outcomes = runner.run(&translators).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].succeeded());

        let summary = outcomes[0].result.as_ref().unwrap();
        assert_eq!(summary.font_count, 3);
        assert_eq!(summary.output_path, dir.path().join("nerd-fonts.json"));
        let report = summary.validation.as_ref().unwrap();
        assert!(report.valid, "errors: {:?}", report.errors);

        let written = std::fs::read_to_string(&summary.output_path).unwrap();
        assert!(written.contains("\"nerd.stub-sans-1\""));
        assert!(written.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_translators() {
        let dir = TempDir::new().unwrap();
        let runner = TranslationRunner::new(dir.path(), false);
        let translators: Vec<Box<dyn Translator>> = vec![
            Box::new(FailingTranslator::new(SourceKind::GoogleFonts)),
            Box::new(StubTranslator::new(SourceKind::OpenFoundry, 1)),
        ];

        let outcomes = runner.run(&translators).await;
        assert_eq!(outcomes.len(), 2);

        assert_eq!(outcomes[0].source, SourceKind::GoogleFonts);
        assert!(!outcomes[0].succeeded());
        assert!(matches!(
            outcomes[0].result,
            Err(TranslatorError::Status { status: 503, .. })
        ));
        assert!(!dir.path().join("google-fonts.json").exists());

        assert!(outcomes[1].succeeded());
        let summary = outcomes[1].result.as_ref().unwrap();
        assert!(summary.validation.is_none());
        assert!(dir.path().join("open-foundry.json").exists());
    }

    #[tokio::test]
    async fn test_output_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("sources");
        let runner = TranslationRunner::new(&nested, true);

        let summary = runner
            .run_one(&StubTranslator::new(SourceKind::FontSquirrel, 0))
            .await
            .unwrap();
        assert!(nested.join("font-squirrel.json").exists());
        // an empty catalog is valid, only warned about
        let report = summary.validation.unwrap();
        assert!(report.valid);
        assert!(!report.warnings.is_empty());
    }
}
