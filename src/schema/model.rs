// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed form of a FontGet source file.
//!
//! Translators build these values and serialize them; the JSON Schema document
//! is derived from them. Validation of files on disk works on raw JSON instead
//! (see [`crate::schema::rules`]) so that it can report every problem with its
//! location rather than stopping at the first deserialization error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Version written to `source_info.version` by every translator.
pub const SOURCE_FORMAT_VERSION: &str = "1.0";

/// A complete source file: provider information plus its fonts keyed by font id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SourceFile {
    pub source_info: SourceInfo,
    /// Fonts keyed by `{source_prefix}.{font_name}`
    pub fonts: BTreeMap<String, FontRecord>,
}

impl SourceFile {
    /// Assemble a source file, deriving `total_fonts` from `fonts`.
    pub fn new(
        name: &str,
        description: &str,
        url: &str,
        api_endpoint: Option<String>,
        last_updated: String,
        fonts: BTreeMap<String, FontRecord>,
    ) -> Self {
        Self {
            source_info: SourceInfo {
                name: name.to_string(),
                description: description.to_string(),
                url: url.to_string(),
                api_endpoint,
                version: SOURCE_FORMAT_VERSION.to_string(),
                last_updated,
                total_fonts: fonts.len(),
            },
            fonts,
        }
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Pretty JSON with non-ASCII characters written as-is.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Describes the provider a source file was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SourceInfo {
    #[schemars(length(min = 1))]
    pub name: String,
    pub description: String,
    #[schemars(url)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(url)]
    pub api_endpoint: Option<String>,
    pub version: String,
    /// RFC 3339 timestamp of the translation run
    pub last_updated: String,
    /// Must equal the number of entries in `fonts`
    pub total_fonts: usize,
}

/// One font family offered by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FontRecord {
    #[schemars(length(min = 1))]
    pub name: String,
    #[schemars(length(min = 1))]
    pub family: String,
    #[schemars(length(min = 1))]
    pub license: String,
    #[serde(default)]
    pub license_url: String,
    #[serde(default)]
    pub designer: String,
    #[serde(default)]
    pub foundry: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Relative popularity score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub popularity: Option<u8>,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub metadata_url: String,
    #[serde(default)]
    pub source_url: String,
    #[schemars(length(min = 1))]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub unicode_ranges: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub sample_text: String,
}

/// A single installable style of a font family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Variant {
    #[schemars(length(min = 1))]
    pub name: String,
    #[schemars(range(min = 100, max = 900))]
    pub weight: u16,
    pub style: FontStyle,
    #[serde(default)]
    pub subsets: Vec<String>,
    /// Download URLs keyed by file format
    pub files: BTreeMap<FileFormat, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }

    pub fn all() -> &'static [FontStyle] {
        &[FontStyle::Normal, FontStyle::Italic, FontStyle::Oblique]
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File formats the FontGet CLI can install. Archives are published under `ttf`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Ttf,
    Otf,
    Fon,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Ttf => "ttf",
            FileFormat::Otf => "otf",
            FileFormat::Fon => "fon",
        }
    }

    pub fn all() -> &'static [FileFormat] {
        &[FileFormat::Ttf, FileFormat::Otf, FileFormat::Fon]
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
