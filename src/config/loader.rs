// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, FONT_SQUIRREL_ENDPOINT,
    GOOGLE_FONTS_API_KEY_ENV, GOOGLE_FONTS_ENDPOINT, NERD_FONTS_ENDPOINT, OPEN_FOUNDRY_ENDPOINT,
};
use crate::errors::ConfigError;
use crate::observability::messages::validation::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration for a translation run.
///
/// Loaded from a YAML file; every field has a default so an empty file (or no
/// file at all, see [`Config::default`]) runs every translator against the
/// providers' public endpoints.
///
/// # Example
/// ```yaml
/// output_dir: sources
/// validate_output: true
/// http:
///   timeout_seconds: 30
/// translators:
///   - id: google_fonts
///     api_key_env: GOOGLE_FONTS_API_KEY
///   - id: font_squirrel
///     limit: 50
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub validate_output: bool,
    #[serde(default)]
    pub http: HttpOptions,
    #[serde(default = "default_translators")]
    pub translators: Vec<TranslatorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            validate_output: true,
            http: HttpOptions::default(),
            translators: default_translators(),
        }
    }
}

impl Config {
    /// Restrict the run to `kinds`, in the order given.
    ///
    /// Configured settings are kept for translators that appear in the file;
    /// the rest get defaults. Repeated kinds are selected once, at their first
    /// position. An empty slice leaves the configuration untouched.
    pub fn select(&mut self, kinds: &[SourceKind]) {
        if kinds.is_empty() {
            return;
        }

        let mut selected: Vec<TranslatorConfig> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if selected.iter().any(|t| t.id == *kind) {
                continue;
            }
            let translator = self
                .translators
                .iter()
                .find(|t| t.id == *kind)
                .cloned()
                .unwrap_or_else(|| TranslatorConfig::new(*kind));
            selected.push(translator);
        }

        self.translators = selected;
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_true() -> bool {
    true
}

fn default_translators() -> Vec<TranslatorConfig> {
    SourceKind::all().iter().map(|kind| TranslatorConfig::new(*kind)).collect()
}

/// HTTP client options shared by every translator.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpOptions {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Settings for one translator.
///
/// # Fields
/// * `id` - Which provider to translate
/// * `endpoint` - Override for the provider's API endpoint (tests, mirrors)
/// * `output` - Override for the output file name
/// * `limit` - Translate only the first N catalog entries
/// * `api_key` - Inline API key (Google Fonts)
/// * `api_key_env` - Environment variable to read the API key from
/// * `fetch_details` - Fetch per-family details (Font Squirrel)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TranslatorConfig {
    pub id: SourceKind,
    pub endpoint: Option<String>,
    pub output: Option<String>,
    pub limit: Option<usize>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub fetch_details: bool,
}

impl TranslatorConfig {
    pub fn new(id: SourceKind) -> Self {
        Self {
            id,
            endpoint: None,
            output: None,
            limit: None,
            api_key: None,
            api_key_env: None,
            fetch_details: false,
        }
    }

    /// The configured endpoint, or the provider's public one.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.id.default_endpoint().to_string())
    }

    /// File name the translated source is written to.
    pub fn output_file(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| self.id.output_file().to_string())
    }

    /// Name of the environment variable consulted for the API key.
    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| GOOGLE_FONTS_API_KEY_ENV.to_string())
    }

    /// Inline key first, then the environment. Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(self.api_key_env()).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// The font providers a translator exists for.
#[derive(Debug, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    GoogleFonts,
    NerdFonts,
    FontSquirrel,
    OpenFoundry,
}

impl SourceKind {
    pub fn all() -> &'static [SourceKind] {
        &[
            SourceKind::GoogleFonts,
            SourceKind::NerdFonts,
            SourceKind::FontSquirrel,
            SourceKind::OpenFoundry,
        ]
    }

    /// Identifier used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::GoogleFonts => "google_fonts",
            SourceKind::NerdFonts => "nerd_fonts",
            SourceKind::FontSquirrel => "font_squirrel",
            SourceKind::OpenFoundry => "open_foundry",
        }
    }

    /// Human-readable provider name, written to `source_info.name`.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::GoogleFonts => "Google Fonts",
            SourceKind::NerdFonts => "Nerd Fonts",
            SourceKind::FontSquirrel => "Font Squirrel",
            SourceKind::OpenFoundry => "Open Foundry",
        }
    }

    /// Namespace placed in front of every font id from this provider.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SourceKind::GoogleFonts => "google",
            SourceKind::NerdFonts => "nerd",
            SourceKind::FontSquirrel => "squirrel",
            SourceKind::OpenFoundry => "openfoundry",
        }
    }

    pub fn output_file(&self) -> &'static str {
        match self {
            SourceKind::GoogleFonts => "google-fonts.json",
            SourceKind::NerdFonts => "nerd-fonts.json",
            SourceKind::FontSquirrel => "font-squirrel.json",
            SourceKind::OpenFoundry => "open-foundry.json",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            SourceKind::GoogleFonts => GOOGLE_FONTS_ENDPOINT,
            SourceKind::NerdFonts => NERD_FONTS_ENDPOINT,
            SourceKind::FontSquirrel => FONT_SQUIRREL_ENDPOINT,
            SourceKind::OpenFoundry => OPEN_FOUNDRY_ENDPOINT,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    /// Accepts the config id (`google_fonts`), its kebab form (`google-fonts`)
    /// or the font id prefix (`google`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SourceKind::all()
            .iter()
            .find(|kind| kind.as_str() == normalized || kind.id_prefix() == normalized)
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = SourceKind::all().iter().map(|k| k.as_str()).collect();
                format!("unknown source '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let cfg: Config = serde_yaml::from_str(&content)?;

    ConfigLoaded {
        path: &path.display().to_string(),
        translator_count: cfg.translators.len(),
    }
    .log();

    Ok(cfg)
}

/// Load and validate a config from a YAML file
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;

    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;

    Ok(cfg)
}
