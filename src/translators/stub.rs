// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::config::SourceKind;
use crate::errors::TranslatorError;
use crate::schema::{FileFormat, FontRecord, FontStyle, SourceFile, Variant};
use crate::traits::Translator;

/// A translator that returns a fixed, valid catalog without touching the network
pub struct StubTranslator {
    pub kind: SourceKind,
    pub output: String,
    pub font_count: usize,
}

impl StubTranslator {
    pub fn new(kind: SourceKind, font_count: usize) -> Self {
        Self {
            kind,
            output: kind.output_file().to_string(),
            font_count,
        }
    }

    fn record(index: usize) -> FontRecord {
        let family = format!("Stub Sans {}", index);
        FontRecord {
            name: family.clone(),
            family: family.clone(),
            license: "OFL".to_string(),
            categories: vec!["Sans Serif".to_string()],
            popularity: Some(50),
            last_modified: "2025-01-01T00:00:00Z".to_string(),
            variants: vec![Variant {
                name: format!("{} Regular", family),
                weight: 400,
                style: FontStyle::Normal,
                subsets: vec!["latin".to_string()],
                files: BTreeMap::from([(
                    FileFormat::Ttf,
                    format!("https://example.com/stub-sans-{}.ttf", index),
                )]),
            }],
            sample_text: "The quick brown fox jumps over the lazy dog".to_string(),
            ..FontRecord::default()
        }
    }
}

#[async_trait::async_trait]
impl Translator for StubTranslator {
    async fn translate(&self) -> Result<SourceFile, TranslatorError> {
        let fonts = (1..=self.font_count)
            .map(|i| {
                (
                    format!("{}.stub-sans-{}", self.kind.id_prefix(), i),
                    Self::record(i),
                )
            })
            .collect();
        Ok(SourceFile::new(
            self.kind.display_name(),
            "Stub catalog",
            "https://example.com",
            None,
            "2025-01-01T00:00:00Z".to_string(),
            fonts,
        ))
    }

    fn source_kind(&self) -> SourceKind {
        self.kind
    }

    fn endpoint(&self) -> String {
        "https://example.com/catalog".to_string()
    }

    fn output_file(&self) -> &str {
        &self.output
    }
}

/// A translator that always fails for testing failure scenarios
pub struct FailingTranslator {
    pub kind: SourceKind,
    pub output: String,
}

impl FailingTranslator {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            output: kind.output_file().to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self) -> Result<SourceFile, TranslatorError> {
        Err(TranslatorError::Status {
            url: "https://example.com/catalog".to_string(),
            status: 503,
        })
    }

    fn source_kind(&self) -> SourceKind {
        self.kind
    }

    fn endpoint(&self) -> String {
        "https://example.com/catalog".to_string()
    }

    fn output_file(&self) -> &str {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{check_source, is_valid_font_id};

    #[tokio::test]
    async fn test_stub_catalog_follows_source_rules() {
        for kind in SourceKind::all() {
            let source = StubTranslator::new(*kind, 2).translate().await.unwrap();
            assert!(source.fonts.keys().all(|id| is_valid_font_id(id)));

            let value = serde_json::to_value(&source).unwrap();
            assert!(check_source(&value).is_empty(), "{} stub violates rules", kind);
        }
    }
}
