// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Open Foundry translator.
//!
//! The dataset is a flat sheet: one row per style, with family-level columns
//! repeated on every row. Rows are grouped by family in the order they appear.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::config::{SourceKind, TranslatorConfig};
use crate::errors::TranslatorError;
use crate::fetch::HttpFetcher;
use crate::observability::messages::translator::CatalogFetched;
use crate::observability::messages::StructuredLog;
use crate::schema::{FontRecord, FontStyle, SourceFile, Variant};
use crate::traits::Translator;
use crate::translators::common::{
    file_format_for_url, http_url_or_empty, normalize_category, timestamp_now, variant_name,
    FontCollector, DEFAULT_SAMPLE_TEXT, DEFAULT_WEIGHT,
};

const SOURCE_DESCRIPTION: &str = "Curated open-source fonts from Open Foundry";
const SOURCE_URL: &str = "https://open-foundry.com";
const DEFAULT_LICENSE: &str = "Other";

/// One sheet row. Cells may hold strings or numbers, so they stay untyped.
#[derive(Debug, Default, Clone, Deserialize)]
struct Row {
    #[serde(rename = "font-name")]
    font_name: Option<Value>,
    #[serde(rename = "font-creator")]
    creator: Option<Value>,
    #[serde(rename = "font-foundry")]
    foundry: Option<Value>,
    #[serde(rename = "font-download-link")]
    download_link: Option<Value>,
    #[serde(rename = "font-open-source-link")]
    open_source_link: Option<Value>,
    #[serde(rename = "font-found-link")]
    found_link: Option<Value>,
    #[serde(rename = "info-weight")]
    weight: Option<Value>,
    #[serde(rename = "info-style")]
    style: Option<Value>,
    #[serde(rename = "info-license")]
    license: Option<Value>,
    #[serde(rename = "info-license-link")]
    license_link: Option<Value>,
    #[serde(rename = "info-classification")]
    classification: Option<Value>,
    #[serde(rename = "info-version")]
    version: Option<Value>,
    #[serde(rename = "info-about")]
    about: Option<Value>,
    #[serde(rename = "settings-text")]
    sample_text: Option<Value>,
}

pub struct OpenFoundryTranslator {
    config: TranslatorConfig,
    fetcher: HttpFetcher,
    output: String,
}

impl OpenFoundryTranslator {
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
impl Translator for OpenFoundryTranslator {
    async fn translate(&self) -> Result<SourceFile, TranslatorError> {
        let endpoint = self.config.endpoint();
        let data: Value = self.fetcher.get_json(&endpoint, &[]).await?;
        let Value::Array(items) = data else {
            return Err(TranslatorError::UnexpectedResponse {
                source_name: self.source_kind().display_name().to_string(),
                reason: "expected a JSON array of font rows".to_string(),
            });
        };

        CatalogFetched {
            source: self.source_kind().as_str(),
            entry_count: items.len(),
        }
        .log();

        let rows: Vec<Row> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        let limit = self.config.limit.unwrap_or(usize::MAX);
        let mut collector = FontCollector::new(self.source_kind());
        for (family, rows) in group_by_family(&rows).into_iter().take(limit) {
            match transform_family(&family, &rows) {
                Some(record) => {
                    collector.add(&family, record);
                }
                None => collector.skip(&family, "no usable download links"),
            }
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
        SourceKind::OpenFoundry
    }

    fn endpoint(&self) -> String {
        self.config.endpoint()
    }

    fn output_file(&self) -> &str {
        &self.output
    }
}

/// Cell contents as text. Numbers are rendered, blanks and other types are `None`.
fn cell(value: &Option<Value>) -> Option<String> {
    match value.as_ref()? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn group_by_family(rows: &[Row]) -> Vec<(String, Vec<&Row>)> {
    let mut groups: Vec<(String, Vec<&Row>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let Some(family) = cell(&row.font_name) else {
            continue;
        };
        match index.get(&family) {
            Some(&position) => groups[position].1.push(row),
            None => {
                index.insert(family.clone(), groups.len());
                groups.push((family, vec![row]));
            }
        }
    }

    groups
}

fn weight_from_cell(value: &Option<Value>) -> u16 {
    cell(value)
        .and_then(|w| w.parse::<f64>().ok())
        .filter(|w| w.fract() == 0.0 && (100.0..=900.0).contains(w))
        .map(|w| w as u16)
        .unwrap_or(DEFAULT_WEIGHT)
}

fn style_from_cell(value: &Option<Value>) -> FontStyle {
    match cell(value).map(|s| s.to_lowercase()) {
        Some(s) if s.contains("italic") || s.contains("oblique") => FontStyle::Italic,
        _ => FontStyle::Normal,
    }
}

/// A variant for rows whose download link is a font file or an archive.
fn row_variant(family: &str, row: &Row) -> Option<Variant> {
    let link = http_url_or_empty(&cell(&row.download_link)?);
    if link.is_empty() {
        return None;
    }
    let format = file_format_for_url(&link)?;

    let weight = weight_from_cell(&row.weight);
    let style = style_from_cell(&row.style);
    Some(Variant {
        name: variant_name(family, weight, style),
        weight,
        style,
        subsets: vec!["latin".to_string()],
        files: BTreeMap::from([(format, link)]),
    })
}

fn transform_family(family: &str, rows: &[&Row]) -> Option<FontRecord> {
    let mut variants: Vec<Variant> = Vec::new();
    for row in rows {
        let Some(variant) = row_variant(family, row) else {
            continue;
        };
        let duplicate = variants.iter().any(|v| {
            v.weight == variant.weight && v.style == variant.style && v.files == variant.files
        });
        if !duplicate {
            variants.push(variant);
        }
    }
    if variants.is_empty() {
        return None;
    }

    let first = rows.first()?;
    let open_source_link = cell(&first.open_source_link)
        .map(|l| http_url_or_empty(&l))
        .unwrap_or_default();
    let found_link = cell(&first.found_link)
        .map(|l| http_url_or_empty(&l))
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| open_source_link.clone());

    Some(FontRecord {
        name: family.to_string(),
        family: family.to_string(),
        license: cell(&first.license).unwrap_or_else(|| DEFAULT_LICENSE.to_string()),
        license_url: cell(&first.license_link)
            .map(|l| http_url_or_empty(&l))
            .unwrap_or_default(),
        designer: cell(&first.creator).unwrap_or_default(),
        foundry: cell(&first.foundry).unwrap_or_default(),
        version: cell(&first.version).unwrap_or_default(),
        description: cell(&first.about).unwrap_or_default(),
        categories: cell(&first.classification)
            .map(|c| vec![normalize_category(&c)])
            .unwrap_or_default(),
        tags: Vec::new(),
        popularity: None,
        last_modified: timestamp_now(),
        metadata_url: open_source_link,
        source_url: found_link,
        variants,
        unicode_ranges: Vec::new(),
        languages: Vec::new(),
        sample_text: cell(&first.sample_text).unwrap_or_else(|| DEFAULT_SAMPLE_TEXT.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FileFormat;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let rows = rows(json!([
            { "font-name": "Zeta" },
            { "font-name": "Alpha" },
            { "font-name": "Zeta" },
            { "font-name": "" },
            { "info-weight": 400 }
        ]));
        let groups = group_by_family(&rows);
        let names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_weight_and_style_cells() {
        assert_eq!(weight_from_cell(&Some(json!(700))), 700);
        assert_eq!(weight_from_cell(&Some(json!("300"))), 300);
        assert_eq!(weight_from_cell(&Some(json!(1000))), 400);
        assert_eq!(weight_from_cell(&Some(json!("Bold"))), 400);
        assert_eq!(weight_from_cell(&None), 400);
        assert_eq!(style_from_cell(&Some(json!("Oblique"))), FontStyle::Italic);
        assert_eq!(style_from_cell(&Some(json!("Roman"))), FontStyle::Normal);
    }

    #[test]
    fn test_transform_family() {
        let rows = rows(json!([
            {
                "font-name": "Space Grotesk",
                "font-creator": "Florian Karsten",
                "font-download-link": "https://example.com/SpaceGrotesk.zip",
                "font-open-source-link": "https://github.com/floriankarsten/space-grotesk",
                "info-weight": 400,
                "info-style": "Normal",
                "info-license": "OFL",
                "info-license-link": "https://openfontlicense.org",
                "info-classification": "sans-serif",
                "info-version": 2.0,
                "settings-text": "Space travel"
            },
            {
                "font-name": "Space Grotesk",
                "font-download-link": "https://example.com/SpaceGrotesk.zip",
                "info-weight": "400"
            },
            {
                "font-name": "Space Grotesk",
                "font-download-link": "https://example.com/SpaceGrotesk-Bold.otf",
                "info-weight": 700
            },
            {
                "font-name": "Space Grotesk",
                "font-download-link": "mailto:someone@example.com",
                "info-weight": 300
            }
        ]));
        let refs: Vec<&Row> = rows.iter().collect();

        let record = transform_family("Space Grotesk", &refs).unwrap();
        assert_eq!(record.variants.len(), 2);
        assert_eq!(
            record.variants[0].files[&FileFormat::Ttf],
            "https://example.com/SpaceGrotesk.zip"
        );
        assert_eq!(record.variants[1].name, "Space Grotesk Bold");
        assert!(record.variants[1].files.contains_key(&FileFormat::Otf));
        assert_eq!(record.license, "OFL");
        assert_eq!(record.version, "2.0");
        assert_eq!(record.categories, vec!["Sans Serif"]);
        assert_eq!(record.popularity, None);
        assert_eq!(record.source_url, "https://github.com/floriankarsten/space-grotesk");
        assert_eq!(record.sample_text, "Space travel");
    }

    #[test]
    fn test_family_without_links_is_skipped() {
        let rows = rows(json!([
            { "font-name": "Ghost", "font-download-link": "" },
            { "font-name": "Ghost", "font-download-link": "https://example.com/specimen" }
        ]));
        let refs: Vec<&Row> = rows.iter().collect();
        assert!(transform_family("Ghost", &refs).is_none());
    }
}
