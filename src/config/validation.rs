//! Configuration validation.
//!
//! Checks run in order and accumulate, so a user sees every problem in the
//! file at once instead of fixing them one by one:
//!
//! 1. **Uniqueness**: each translator appears once
//! 2. **Endpoints**: overrides are http(s) URLs
//! 3. **Limits**: a configured limit is at least 1
//! 4. **HTTP options**: timeout within [`MIN_TIMEOUT_SECONDS`]..=[`MAX_TIMEOUT_SECONDS`]
//! 5. **Output**: output directory is not empty
//!
//! ```rust
//! use fontget_sources::config::{validate_config, Config};
//!
//! let config = Config::default();
//! match validate_config(&config) {
//!     Ok(()) => println!("Configuration is valid"),
//!     Err(errors) => {
//!         for error in errors {
//!             eprintln!("Validation error: {}", error);
//!         }
//!     }
//! }
//! ```

use std::collections::HashSet;

use crate::config::consts::{MAX_TIMEOUT_SECONDS, MIN_TIMEOUT_SECONDS};
use crate::config::Config;
use crate::errors::ConfigValidationError;

/// Validates a configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_translators(config) {
        errors.extend(duplicate_errors);
    }

    if let Err(endpoint_errors) = validate_endpoints(config) {
        errors.extend(endpoint_errors);
    }

    if let Err(limit_errors) = validate_limits(config) {
        errors.extend(limit_errors);
    }

    if let Err(timeout_error) = validate_timeout(config) {
        errors.push(timeout_error);
    }

    if config.output_dir.as_os_str().is_empty() {
        errors.push(ConfigValidationError::EmptyOutputDir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_translators(config: &Config) -> Result<(), Vec<ConfigValidationError>> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for translator in &config.translators {
        if !seen.insert(translator.id) {
            errors.push(ConfigValidationError::DuplicateTranslator { id: translator.id });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_endpoints(config: &Config) -> Result<(), Vec<ConfigValidationError>> {
    let errors: Vec<ConfigValidationError> = config
        .translators
        .iter()
        .filter_map(|t| {
            let endpoint = t.endpoint.as_ref()?;
            if is_http_url(endpoint) {
                None
            } else {
                Some(ConfigValidationError::InvalidEndpoint {
                    id: t.id,
                    endpoint: endpoint.clone(),
                })
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_limits(config: &Config) -> Result<(), Vec<ConfigValidationError>> {
    let errors: Vec<ConfigValidationError> = config
        .translators
        .iter()
        .filter(|t| t.limit == Some(0))
        .map(|t| ConfigValidationError::ZeroLimit { id: t.id })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_timeout(config: &Config) -> Result<(), ConfigValidationError> {
    let timeout_seconds = config.http.timeout_seconds;
    if (MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&timeout_seconds) {
        Ok(())
    } else {
        Err(ConfigValidationError::TimeoutOutOfRange {
            timeout_seconds,
            min: MIN_TIMEOUT_SECONDS,
            max: MAX_TIMEOUT_SECONDS,
        })
    }
}

/// True for absolute `http://` or `https://` URLs with a host part and no
/// whitespace or control characters.
pub(crate) fn is_http_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .strip_prefix(scheme)
            .map(|rest| {
                !rest.is_empty()
                    && !rest.starts_with('/')
                    && !rest.chars().any(|c| c.is_whitespace() || c.is_control())
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SourceKind, TranslatorConfig};
    use std::path::PathBuf;

    fn config_with(translators: Vec<TranslatorConfig>) -> Config {
        Config {
            translators,
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_translator_list_is_valid() {
        assert!(validate_config(&config_with(vec![])).is_ok());
    }

    #[test]
    fn test_duplicate_translators() {
        let config = config_with(vec![
            TranslatorConfig::new(SourceKind::GoogleFonts),
            TranslatorConfig::new(SourceKind::GoogleFonts),
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ConfigValidationError::DuplicateTranslator { id: SourceKind::GoogleFonts }
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut translator = TranslatorConfig::new(SourceKind::OpenFoundry);
        translator.endpoint = Some("ftp://example.com/sheet.json".to_string());

        let errors = validate_config(&config_with(vec![translator])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigValidationError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_zero_limit() {
        let mut translator = TranslatorConfig::new(SourceKind::FontSquirrel);
        translator.limit = Some(0);

        let errors = validate_config(&config_with(vec![translator])).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::ZeroLimit { id: SourceKind::FontSquirrel }]);
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.http.timeout_seconds = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::TimeoutOutOfRange { timeout_seconds: 0, .. }));

        config.http.timeout_seconds = MAX_TIMEOUT_SECONDS;
        assert!(validate_config(&config).is_ok());

        config.http.timeout_seconds = MAX_TIMEOUT_SECONDS + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_output_dir() {
        let config = Config {
            output_dir: PathBuf::new(),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::EmptyOutputDir]);
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let mut bad_endpoint = TranslatorConfig::new(SourceKind::NerdFonts);
        bad_endpoint.endpoint = Some("not a url".to_string());
        let mut zero = TranslatorConfig::new(SourceKind::FontSquirrel);
        zero.limit = Some(0);

        let mut config = config_with(vec![
            bad_endpoint,
            zero,
            TranslatorConfig::new(SourceKind::FontSquirrel),
        ]);
        config.http.timeout_seconds = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://fonts.google.com"));
        assert!(is_http_url("http://127.0.0.1:8080/api"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("https:///path"));
        assert!(!is_http_url("fonts.google.com"));
        assert!(!is_http_url(""));
    }

    #[test]
    fn test_is_http_url_rejects_whitespace() {
        assert!(!is_http_url("https://exa mple.com/font.ttf"));
        assert!(!is_http_url("https://example.com/a b.ttf"));
        assert!(!is_http_url("https://example.com/font.ttf\n"));
        assert!(!is_http_url("https://example.com/\tfont.ttf"));
        assert!(!is_http_url("https://example.com/\u{7f}"));
        assert!(is_http_url("https://example.com/a%20b.ttf"));
    }
}
