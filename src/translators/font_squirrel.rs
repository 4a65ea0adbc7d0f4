// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Font Squirrel translator.
//!
//! The family list carries no per-file data. When `fetch_details` is enabled
//! each family's file list is requested as well; otherwise (or when that
//! request fails) a family gets a single variant pointing at its font-face kit.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::{SourceKind, TranslatorConfig};
use crate::errors::TranslatorError;
use crate::fetch::HttpFetcher;
use crate::observability::messages::translator::{CatalogFetched, DetailsFetchFailed};
use crate::observability::messages::StructuredLog;
use crate::schema::{FileFormat, FontRecord, FontStyle, SourceFile, Variant};
use crate::traits::Translator;
use crate::translators::common::{
    http_url_or_empty, normalize_category, parse_file_weight_style, parse_weight_style, slug,
    timestamp_now, variant_name, FontCollector, DEFAULT_SAMPLE_TEXT,
};

const SOURCE_DESCRIPTION: &str = "Free fonts from Font Squirrel";
const SOURCE_URL: &str = "https://www.fontsquirrel.com";
const SITE: &str = "https://www.fontsquirrel.com";
const LICENSE: &str = "See license page";
const DEFAULT_FOUNDRY: &str = "Font Squirrel";

#[derive(Debug, Default, Deserialize)]
struct Family {
    family_name: Option<String>,
    family_urlname: Option<String>,
    classification: Option<String>,
    designer: Option<String>,
    foundry: Option<String>,
    foundry_name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    date_added: Option<String>,
}

/// `familyinfo` answers either with a bare file list or an object wrapping one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FamilyDetails {
    Files(Vec<FontFile>),
    Detailed {
        #[serde(default)]
        font_files: Vec<FontFile>,
        #[serde(default)]
        tags: Vec<String>,
    },
}

impl FamilyDetails {
    fn files(&self) -> &[FontFile] {
        match self {
            FamilyDetails::Files(files) => files,
            FamilyDetails::Detailed { font_files, .. } => font_files,
        }
    }

    fn tags(&self) -> &[String] {
        match self {
            FamilyDetails::Files(_) => &[],
            FamilyDetails::Detailed { tags, .. } => tags,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FontFile {
    filename: Option<String>,
    download_url: Option<String>,
    style_name: Option<String>,
}

pub struct FontSquirrelTranslator {
    config: TranslatorConfig,
    fetcher: HttpFetcher,
    output: String,
}

impl FontSquirrelTranslator {
    pub fn new(config: TranslatorConfig, fetcher: HttpFetcher) -> Self {
        let output = config.output_file();
        Self {
            config,
            fetcher,
            output,
        }
    }

    fn base_url(&self) -> String {
        self.config.endpoint().trim_end_matches('/').to_string()
    }

    /// Per-family file list. Failures are logged and treated as "no details".
    async fn fetch_details(&self, urlname: &str, family: &str) -> Option<FamilyDetails> {
        let url = format!("{}/familyinfo/{}", self.base_url(), urlname);
        match self.fetcher.get_json_optional::<FamilyDetails>(&url, &[]).await {
            Ok(details) => details,
            Err(error) => {
                DetailsFetchFailed {
                    source: self.source_kind().as_str(),
                    family,
                    error: &error,
                }
                .log();
                None
            }
        }
    }
}

#[async_trait]
impl Translator for FontSquirrelTranslator {
    async fn translate(&self) -> Result<SourceFile, TranslatorError> {
        let list_url = format!("{}/fontlist/all", self.base_url());
        let families: Vec<Family> = self.fetcher.get_json(&list_url, &[]).await?;

        CatalogFetched {
            source: self.source_kind().as_str(),
            entry_count: families.len(),
        }
        .log();

        let limit = self.config.limit.unwrap_or(usize::MAX);
        let now = Utc::now();
        let mut collector = FontCollector::new(self.source_kind());

        for family in families.iter().take(limit) {
            let (Some(name), Some(urlname)) = (
                family.family_name.as_deref().filter(|n| !n.trim().is_empty()),
                family.family_urlname.as_deref().filter(|u| !u.trim().is_empty()),
            ) else {
                collector.skip(
                    family.family_name.as_deref().unwrap_or("unknown"),
                    "missing family_name or family_urlname",
                );
                continue;
            };

            let details = if self.config.fetch_details {
                self.fetch_details(urlname, name).await
            } else {
                None
            };

            collector.add(name, transform_family(family, name, urlname, details.as_ref(), now));
        }

        Ok(SourceFile::new(
            self.source_kind().display_name(),
            SOURCE_DESCRIPTION,
            SOURCE_URL,
            Some(list_url),
            timestamp_now(),
            collector.into_fonts(),
        ))
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::FontSquirrel
    }

    fn endpoint(&self) -> String {
        self.base_url()
    }

    fn output_file(&self) -> &str {
        &self.output
    }
}

fn transform_family(
    family: &Family,
    name: &str,
    urlname: &str,
    details: Option<&FamilyDetails>,
    now: DateTime<Utc>,
) -> FontRecord {
    let files = details.map(FamilyDetails::files).unwrap_or_default();
    let mut variants = file_variants(name, urlname, files);
    if variants.is_empty() {
        variants.push(fallback_variant(name, urlname));
    }

    let designer = non_empty(&family.designer).unwrap_or_default();
    let foundry = non_empty(&family.foundry)
        .or_else(|| non_empty(&family.foundry_name))
        .unwrap_or(DEFAULT_FOUNDRY);

    FontRecord {
        name: name.to_string(),
        family: name.to_string(),
        license: LICENSE.to_string(),
        license_url: format!("{}/license/{}", SITE, urlname),
        designer: designer.to_string(),
        foundry: foundry.to_string(),
        version: non_empty(&family.version).unwrap_or("1.0").to_string(),
        description: non_empty(&family.description).unwrap_or_default().to_string(),
        categories: non_empty(&family.classification)
            .map(|c| vec![normalize_category(c)])
            .unwrap_or_default(),
        tags: tags(family, details),
        popularity: Some(popularity(family, files.len(), now)),
        last_modified: non_empty(&family.date_added).unwrap_or_default().to_string(),
        metadata_url: format!("{}/fonts/{}", SITE, urlname),
        source_url: format!("{}/fonts/{}", SITE, urlname),
        variants,
        unicode_ranges: vec!["U+0000-00FF".to_string(), "U+0100-017F".to_string()],
        languages: vec!["Latin".to_string(), "Latin Extended".to_string()],
        sample_text: DEFAULT_SAMPLE_TEXT.to_string(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn font_face_kit(urlname: &str) -> String {
    format!("{}/fontfacekit/{}", SITE, urlname)
}

/// One variant per (weight, style); formats of the same style share it.
fn file_variants(family: &str, urlname: &str, files: &[FontFile]) -> Vec<Variant> {
    let mut variants: Vec<Variant> = Vec::new();

    for file in files {
        let Some(filename) = file.filename.as_deref().filter(|f| !f.is_empty()) else {
            continue;
        };
        let Some(format) = file_format_for_name(filename) else {
            continue;
        };

        let (weight, style) = match file.style_name.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(style_name) => parse_weight_style(style_name),
            None => parse_file_weight_style(filename),
        };

        let url = file
            .download_url
            .as_deref()
            .map(http_url_or_empty)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| font_face_kit(urlname));

        match variants
            .iter_mut()
            .find(|v| v.weight == weight && v.style == style)
        {
            Some(existing) => {
                existing.files.entry(format).or_insert(url);
            }
            None => variants.push(Variant {
                name: variant_name(family, weight, style),
                weight,
                style,
                subsets: vec!["latin".to_string(), "latin-ext".to_string()],
                files: BTreeMap::from([(format, url)]),
            }),
        }
    }

    variants
}

fn file_format_for_name(filename: &str) -> Option<FileFormat> {
    let lower = filename.to_lowercase();
    FileFormat::all()
        .iter()
        .find(|format| lower.ends_with(&format!(".{}", format.as_str())))
        .copied()
}

fn fallback_variant(family: &str, urlname: &str) -> Variant {
    Variant {
        name: variant_name(family, 400, FontStyle::Normal),
        weight: 400,
        style: FontStyle::Normal,
        subsets: vec!["latin".to_string()],
        files: BTreeMap::from([(FileFormat::Ttf, font_face_kit(urlname))]),
    }
}

/// Base 50, plus metadata completeness, file count and how recently it was added.
fn popularity(family: &Family, file_count: usize, now: DateTime<Utc>) -> u8 {
    let mut score = 50;
    if non_empty(&family.description).is_some() {
        score += 10;
    }
    if non_empty(&family.designer).is_some() {
        score += 10;
    }
    score += (file_count * 5).min(20);

    if let Some(added) = non_empty(&family.date_added).and_then(parse_date) {
        let days_old = (now - added).num_days();
        if days_old < 30 {
            score += 10;
        } else if days_old < 90 {
            score += 5;
        }
    }

    score.min(100) as u8
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(date.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

fn tags(family: &Family, details: Option<&FamilyDetails>) -> Vec<String> {
    let mut tags = BTreeSet::new();
    if let Some(classification) = non_empty(&family.classification) {
        tags.insert(slug(classification));
    }
    if non_empty(&family.designer).is_some() {
        tags.insert("designer-font".to_string());
    }
    if non_empty(&family.foundry).is_some() {
        tags.insert("foundry-font".to_string());
    }
    for tag in details.map(FamilyDetails::tags).unwrap_or_default() {
        let tag = tag.trim();
        if !tag.is_empty() {
            tags.insert(tag.to_string());
        }
    }
    tags.into_iter().collect()
}
