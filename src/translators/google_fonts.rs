// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Google Fonts Developer API translator.
//!
//! The catalog is fetched sorted by popularity. Google does not publish a
//! popularity score, so one is estimated from how complete each family is.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::{SourceKind, TranslatorConfig};
use crate::errors::TranslatorError;
use crate::fetch::HttpFetcher;
use crate::observability::messages::translator::CatalogFetched;
use crate::observability::messages::StructuredLog;
use crate::schema::{FileFormat, FontRecord, FontStyle, SourceFile, Variant};
use crate::traits::Translator;
use crate::translators::common::{
    file_format_for_url, normalize_category, slug, timestamp_now, title_case, variant_name,
    FontCollector, DEFAULT_SAMPLE_TEXT,
};

const SOURCE_DESCRIPTION: &str = "Open source fonts from Google";
const SOURCE_URL: &str = "https://fonts.google.com";
const GITHUB_OFL_BASE: &str = "https://raw.githubusercontent.com/google/fonts/main/ofl";
const LICENSE: &str = "OFL";
const LICENSE_URL: &str = "https://scripts.sil.org/OFL";
const FOUNDRY: &str = "Google";

const SUBSET_RANGES: &[(&str, &str)] = &[
    ("latin", "U+0000-00FF"),
    ("latin-ext", "U+0100-017F"),
    ("cyrillic", "U+0400-04FF"),
    ("greek", "U+0370-03FF"),
];

const SUBSET_LANGUAGES: &[(&str, &str)] = &[
    ("latin", "Latin"),
    ("latin-ext", "Latin Extended"),
    ("cyrillic", "Cyrillic"),
    ("cyrillic-ext", "Cyrillic Extended"),
    ("greek", "Greek"),
    ("greek-ext", "Greek Extended"),
    ("vietnamese", "Vietnamese"),
    ("arabic", "Arabic"),
    ("devanagari", "Devanagari"),
    ("hebrew", "Hebrew"),
    ("thai", "Thai"),
    ("chinese-simplified", "Chinese Simplified"),
    ("chinese-traditional", "Chinese Traditional"),
    ("japanese", "Japanese"),
    ("korean", "Korean"),
];

#[derive(Debug, Deserialize)]
struct WebfontList {
    #[serde(default)]
    items: Vec<Webfont>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Webfont {
    family: String,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    subsets: Vec<String>,
    category: Option<String>,
    version: Option<String>,
    last_modified: Option<String>,
    /// Download URL per variant string
    #[serde(default)]
    files: BTreeMap<String, String>,
    designer: Option<String>,
    description: Option<String>,
}

pub struct GoogleFontsTranslator {
    config: TranslatorConfig,
    fetcher: HttpFetcher,
    output: String,
}

impl GoogleFontsTranslator {
    pub fn new(config: TranslatorConfig, fetcher: HttpFetcher) -> Self {
        let output = config.output_file();
        Self {
            config,
            fetcher,
            output,
        }
    }
}

#[async_trait]
impl Translator for GoogleFontsTranslator {
    async fn translate(&self) -> Result<SourceFile, TranslatorError> {
        let api_key = self
            .config
            .resolve_api_key()
            .ok_or_else(|| TranslatorError::MissingApiKey {
                env_var: self.config.api_key_env(),
            })?;
        let endpoint = self.config.endpoint();

        let list: WebfontList = self
            .fetcher
            .get_json(&endpoint, &[("key", api_key.as_str()), ("sort", "popularity")])
            .await?;

        CatalogFetched {
            source: self.source_kind().as_str(),
            entry_count: list.items.len(),
        }
        .log();

        let limit = self.config.limit.unwrap_or(usize::MAX);
        let mut collector = FontCollector::new(self.source_kind());
        for font in list.items.iter().take(limit) {
            collector.add(&font.family, transform_font(font));
        }

        Ok(SourceFile::new(
            self.source_kind().display_name(),
            SOURCE_DESCRIPTION,
            SOURCE_URL,
            Some(endpoint),
            timestamp_now(),
            collector.into_fonts(),
        ))
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::GoogleFonts
    }

    fn endpoint(&self) -> String {
        self.config.endpoint()
    }

    fn output_file(&self) -> &str {
        &self.output
    }
}

fn transform_font(font: &Webfont) -> FontRecord {
    let family = font.family.as_str();
    let subsets = if font.subsets.is_empty() {
        vec!["latin".to_string()]
    } else {
        font.subsets.clone()
    };

    let variants = font
        .variants
        .iter()
        .filter_map(|v| parse_variant(v, family, &font.files, &subsets))
        .collect();

    FontRecord {
        name: family.to_string(),
        family: family.to_string(),
        license: LICENSE.to_string(),
        license_url: LICENSE_URL.to_string(),
        designer: font.designer.clone().unwrap_or_default(),
        foundry: FOUNDRY.to_string(),
        version: font.version.clone().unwrap_or_else(|| "1.0".to_string()),
        description: font.description.clone().unwrap_or_default(),
        categories: font.category.iter().map(|c| normalize_category(c)).collect(),
        tags: tags(font),
        popularity: Some(popularity(font)),
        last_modified: font.last_modified.clone().unwrap_or_default(),
        metadata_url: format!("{}/{}/METADATA.pb", GITHUB_OFL_BASE, family_path(family)),
        source_url: format!("https://fonts.google.com/specimen/{}", family.replace(' ', "+")),
        variants,
        unicode_ranges: lookup_all(&font.subsets, SUBSET_RANGES),
        languages: lookup_all(&font.subsets, SUBSET_LANGUAGES),
        sample_text: DEFAULT_SAMPLE_TEXT.to_string(),
    }
}

/// `regular`, `italic`, `700` or `700italic`. Anything else is not a static style.
fn parse_weight(variant: &str) -> Option<(u16, FontStyle)> {
    match variant {
        "regular" => Some((400, FontStyle::Normal)),
        "italic" => Some((400, FontStyle::Italic)),
        _ => {
            let (digits, style) = match variant.strip_suffix("italic") {
                Some(digits) => (digits, FontStyle::Italic),
                None => (variant, FontStyle::Normal),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let weight: u16 = digits.parse().ok()?;
            (100..=900).contains(&weight).then_some((weight, style))
        }
    }
}

fn parse_variant(
    variant: &str,
    family: &str,
    api_files: &BTreeMap<String, String>,
    subsets: &[String],
) -> Option<Variant> {
    let (weight, style) = parse_weight(variant)?;

    let files = api_files
        .get(variant)
        .and_then(|url| {
            let url = url.replacen("http://", "https://", 1);
            file_format_for_url(&url).map(|format| BTreeMap::from([(format, url)]))
        })
        .unwrap_or_else(|| github_files(family, variant));

    Some(Variant {
        name: variant_name(family, weight, style),
        weight,
        style,
        subsets: subsets.to_vec(),
        files,
    })
}

fn github_files(family: &str, variant: &str) -> BTreeMap<FileFormat, String> {
    let base = format!("{}/{}", GITHUB_OFL_BASE, family_path(family));
    let file = format!("{}-{}", family.replace(' ', ""), title_case(variant));
    BTreeMap::from([
        (FileFormat::Ttf, format!("{}/{}.ttf", base, file)),
        (FileFormat::Otf, format!("{}/{}.otf", base, file)),
    ])
}

fn family_path(family: &str) -> String {
    family.to_lowercase().replace(' ', "")
}

/// 0-100 estimate from variant and subset coverage plus metadata completeness.
fn popularity(font: &Webfont) -> u8 {
    let mut score = (font.variants.len() * 10).min(50) + (font.subsets.len() * 5).min(30);
    if font.description.as_deref().is_some_and(|d| !d.is_empty()) {
        score += 10;
    }
    if font.designer.as_deref().is_some_and(|d| !d.is_empty()) {
        score += 10;
    }
    score.min(100) as u8
}

fn tags(font: &Webfont) -> Vec<String> {
    let mut tags: Vec<String> = font.category.iter().map(|c| slug(c)).collect();
    if font.variants.iter().any(|v| v.contains("italic")) {
        tags.push("italic".to_string());
    }
    let has_bold = font
        .variants
        .iter()
        .filter_map(|v| v.parse::<u16>().ok())
        .any(|weight| weight >= 700);
    if has_bold {
        tags.push("bold".to_string());
    }
    tags
}

fn lookup_all(subsets: &[String], table: &[(&str, &str)]) -> Vec<String> {
    subsets
        .iter()
        .filter_map(|subset| {
            table
                .iter()
                .find(|(key, _)| key == subset)
                .map(|(_, value)| value.to_string())
        })
        .collect()
}
