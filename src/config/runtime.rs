// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::engine::TranslationRunner;
use crate::errors::TranslatorError;
use crate::fetch::HttpFetcher;
use crate::traits::Translator;
use crate::translators::TranslatorFactory;

/// Translation runtime builder - creates the translators and the runner from configuration.
///
/// All translators share one [`HttpFetcher`] built from `cfg.http`; the runner
/// writes into `cfg.output_dir` and validates when `cfg.validate_output` is set.
///
/// # Examples
///
/// ```
/// use fontget_sources::config::{Config, RuntimeBuilder};
///
/// let config = Config::default();
/// let (translators, runner) = RuntimeBuilder::from_config(&config).unwrap();
///
/// assert_eq!(translators.len(), 4);
/// assert_eq!(runner.output_dir(), config.output_dir.as_path());
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the translators, in configuration order, and the runner that executes them.
    ///
    /// Fails only when the HTTP client cannot be constructed.
    pub fn from_config(
        cfg: &Config,
    ) -> Result<(Vec<Box<dyn Translator>>, TranslationRunner), TranslatorError> {
        let fetcher = HttpFetcher::new(&cfg.http)?;
        let translators = cfg
            .translators
            .iter()
            .map(|translator| TranslatorFactory::create_translator(translator, &fetcher))
            .collect();
        let runner = TranslationRunner::new(&cfg.output_dir, cfg.validate_output);
        Ok((translators, runner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SourceKind, TranslatorConfig};

    #[test]
    fn test_builds_translators_in_config_order() {
        let config = Config {
            translators: vec![
                TranslatorConfig::new(SourceKind::OpenFoundry),
                TranslatorConfig::new(SourceKind::GoogleFonts),
            ],
            ..Config::default()
        };

        let (translators, _runner) = RuntimeBuilder::from_config(&config).unwrap();
        let kinds: Vec<SourceKind> = translators.iter().map(|t| t.source_kind()).collect();
        assert_eq!(kinds, vec![SourceKind::OpenFoundry, SourceKind::GoogleFonts]);
    }

    #[test]
    fn test_empty_translator_list() {
        let config = Config {
            translators: vec![],
            ..Config::default()
        };
        let (translators, _runner) = RuntimeBuilder::from_config(&config).unwrap();
        assert!(translators.is_empty());
    }
}
