// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{SourceKind, TranslatorConfig};
use crate::errors::TranslatorError;
use crate::fetch::HttpFetcher;
use crate::traits::Translator;

use super::font_squirrel::FontSquirrelTranslator;
use super::google_fonts::GoogleFontsTranslator;
use super::nerd_fonts::NerdFontsTranslator;
use super::open_foundry::OpenFoundryTranslator;

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator from its configuration
    ///
    /// The `id` field in the config determines which translator to create:
    /// - "google_fonts" -> GoogleFontsTranslator
    /// - "nerd_fonts" -> NerdFontsTranslator
    /// - "font_squirrel" -> FontSquirrelTranslator
    /// - "open_foundry" -> OpenFoundryTranslator
    ///
    /// All translators share the same HTTP client.
    pub fn create_translator(config: &TranslatorConfig, fetcher: &HttpFetcher) -> Box<dyn Translator> {
        let config = config.clone();
        let fetcher = fetcher.clone();
        match config.id {
            SourceKind::GoogleFonts => Box::new(GoogleFontsTranslator::new(config, fetcher)),
            SourceKind::NerdFonts => Box::new(NerdFontsTranslator::new(config, fetcher)),
            SourceKind::FontSquirrel => Box::new(FontSquirrelTranslator::new(config, fetcher)),
            SourceKind::OpenFoundry => Box::new(OpenFoundryTranslator::new(config, fetcher)),
        }
    }

    /// List all available translator ids
    pub fn list_available() -> Vec<&'static str> {
        SourceKind::all().iter().map(SourceKind::as_str).collect()
    }

    /// Check if a translator id is available
    pub fn is_available(name: &str) -> bool {
        Self::kind_for(name).is_ok()
    }

    /// Resolve a translator id or alias
    pub fn kind_for(name: &str) -> Result<SourceKind, TranslatorError> {
        name.parse::<SourceKind>()
            .map_err(|_| TranslatorError::UnknownTranslator(name.to_string()))
    }
}
