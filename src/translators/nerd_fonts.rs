// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Nerd Fonts translator, built from the assets of the latest GitHub release.
//!
//! Every patched family ships as one archive per format. Families are named
//! from the archive file name using the known patched-font table.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::config::{SourceKind, TranslatorConfig};
use crate::errors::TranslatorError;
use crate::fetch::HttpFetcher;
use crate::observability::messages::translator::CatalogFetched;
use crate::observability::messages::StructuredLog;
use crate::schema::{FileFormat, FontRecord, FontStyle, SourceFile, Variant};
use crate::traits::Translator;
use crate::translators::common::{
    normalize_category, timestamp_now, title_case, variant_name, FontCollector,
};

const SOURCE_DESCRIPTION: &str = "Patched fonts with additional icon glyphs for programming";
const SOURCE_URL: &str = "https://www.nerdfonts.com";
const REPOSITORY_URL: &str = "https://github.com/ryanoasis/nerd-fonts";
const LICENSE_URL: &str =
    "https://raw.githubusercontent.com/ryanoasis/nerd-fonts/refs/heads/master/LICENSE";
const DESIGNER: &str = "Ryan L McIntyre (Nerd Fonts Patcher)";
const SAMPLE_TEXT: &str = "Hello World! ⚡ 🔥 💻";
const DEFAULT_POPULARITY: u8 = 25;

/// Archive name fragment -> family name.
const FONT_PATTERNS: &[(&str, &str)] = &[
    ("FiraCode", "Fira Code"),
    ("JetBrainsMono", "JetBrains Mono"),
    ("CascadiaCode", "Cascadia Code"),
    ("SourceCodePro", "Source Code Pro"),
    ("Hack", "Hack"),
    ("RobotoMono", "Roboto Mono"),
    ("UbuntuMono", "Ubuntu Mono"),
    ("DejaVuSansMono", "DejaVu Sans Mono"),
    ("DroidSansMono", "Droid Sans Mono"),
    ("Mononoki", "Mononoki"),
    ("Noto", "Noto Sans Mono"),
    ("SpaceMono", "Space Mono"),
    ("Terminus", "Terminus"),
    ("VictorMono", "Victor Mono"),
    ("Meslo", "Meslo"),
    ("Lilex", "Lilex"),
    ("Iosevka", "Iosevka"),
    ("Agave", "Agave"),
    ("Arimo", "Arimo"),
    ("AurulentSansMono", "Aurulent Sans Mono"),
    ("BigBlueTerminal", "Big Blue Terminal"),
    ("BitstreamVeraSansMono", "Bitstream Vera Sans Mono"),
    ("BlexMono", "Blex Mono"),
    ("CodeNewRoman", "Code New Roman"),
    ("ComicShannsMono", "Comic Shanns Mono"),
    ("Cousine", "Cousine"),
    ("DaddyTimeMono", "DaddyTime Mono"),
    ("FantasqueSansMono", "Fantasque Sans Mono"),
    ("GoMono", "Go Mono"),
    ("Gohu", "Gohu"),
    ("HeavyData", "Heavy Data"),
    ("Hermit", "Hermit"),
    ("iA-Writer", "iA Writer Mono"),
    ("IBMPlexMono", "IBM Plex Mono"),
    ("Inconsolata", "Inconsolata"),
    ("InconsolataGo", "Inconsolata Go"),
    ("InconsolataLGC", "Inconsolata LGC"),
    ("IntelOneMono", "Intel One Mono"),
    ("Lekton", "Lekton"),
    ("LiberationMono", "Liberation Mono"),
    ("LuxiMono", "Luxi Mono"),
    ("MPlus", "M+"),
    ("Overpass", "Overpass Mono"),
    ("ProFont", "ProFont"),
    ("ProggyClean", "ProggyClean"),
    ("PTMono", "PT Mono"),
    ("Raleway", "Raleway"),
    ("SauceCodePro", "Sauce Code Pro"),
    ("ShureTechMono", "Shure Tech Mono"),
    ("Tinos", "Tinos"),
    ("Tight", "Tight"),
    ("TlwgMono", "Tlwg Mono"),
    ("TwilioSansMono", "Twilio Sans Mono"),
    ("VazirCode", "Vazir Code"),
    ("YaHeiConsolasHybrid", "YaHei Consolas Hybrid"),
];

/// Well-known programming fonts rank above the rest.
const POPULARITY: &[(&str, u8)] = &[
    ("Fira Code", 95),
    ("JetBrains Mono", 90),
    ("Cascadia Code", 85),
    ("Source Code Pro", 80),
    ("Hack", 75),
    ("Roboto Mono", 70),
    ("Ubuntu Mono", 65),
    ("DejaVu Sans Mono", 60),
    ("Mononoki", 55),
    ("Noto Sans Mono", 50),
    ("Space Mono", 45),
    ("Terminus", 40),
    ("Victor Mono", 35),
    ("Meslo", 30),
];

const TAGS: &[&str] = &["nerd-fonts", "icons", "patched", "monospace", "programming"];
const UNICODE_RANGES: &[&str] = &["U+0000-00FF", "U+2190-21FF", "U+2600-26FF", "U+1F300-1F5FF"];
const LANGUAGES: &[&str] = &["Latin", "Symbols"];
const SUBSETS: &[&str] = &["latin", "latin-ext"];

/// Archive extensions in order of preference.
const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".tar.xz"];

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    published_at: Option<String>,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize)]
struct Asset {
    name: String,
    browser_download_url: String,
}

pub struct NerdFontsTranslator {
    config: TranslatorConfig,
    fetcher: HttpFetcher,
    output: String,
}

impl NerdFontsTranslator {
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
impl Translator for NerdFontsTranslator {
    async fn translate(&self) -> Result<SourceFile, TranslatorError> {
        let endpoint = self.config.endpoint();
        let releases: Vec<Release> = self.fetcher.get_json(&endpoint, &[]).await?;
        let latest = releases
            .into_iter()
            .next()
            .ok_or_else(|| TranslatorError::NoReleases {
                url: endpoint.clone(),
            })?;

        let archives = archives_by_preference(&latest.assets);
        CatalogFetched {
            source: self.source_kind().as_str(),
            entry_count: archives.len(),
        }
        .log();

        let limit = self.config.limit.unwrap_or(usize::MAX);
        let fonts = collect_fonts(&latest, archives.into_iter().take(limit));

        Ok(SourceFile::new(
            self.source_kind().display_name(),
            SOURCE_DESCRIPTION,
            SOURCE_URL,
            Some(endpoint),
            timestamp_now(),
            fonts,
        ))
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::NerdFonts
    }

    fn endpoint(&self) -> String {
        self.config.endpoint()
    }

    fn output_file(&self) -> &str {
        &self.output
    }
}

/// Font archives only, `.zip` before `.tar.xz` so zips win variant dedup.
fn archives_by_preference(assets: &[Asset]) -> Vec<&Asset> {
    ARCHIVE_EXTENSIONS
        .iter()
        .flat_map(move |ext| assets.iter().filter(move |a| a.name.ends_with(ext)))
        .collect()
}

fn collect_fonts<'a>(
    release: &Release,
    archives: impl Iterator<Item = &'a Asset>,
) -> BTreeMap<String, FontRecord> {
    let mut collector = FontCollector::new(SourceKind::NerdFonts);
    let version = release.tag_name.trim_start_matches('v').to_string();
    let last_modified = release.published_at.clone().unwrap_or_else(timestamp_now);

    for asset in archives {
        let Some(font_name) = extract_font_name(&asset.name) else {
            collector.skip(&asset.name, "archive name does not contain a font name");
            continue;
        };

        let Some(record) =
            collector.upsert(&font_name, || new_record(&font_name, &version, &last_modified))
        else {
            continue;
        };

        let variant = archive_variant(&font_name, asset);
        let seen = record
            .variants
            .iter()
            .any(|v| v.weight == variant.weight && v.style == variant.style);
        if !seen {
            record.variants.push(variant);
        }
    }

    collector.into_fonts()
}

fn new_record(font_name: &str, version: &str, last_modified: &str) -> FontRecord {
    FontRecord {
        name: font_name.to_string(),
        family: font_name.to_string(),
        license: "Mixed".to_string(),
        license_url: LICENSE_URL.to_string(),
        designer: DESIGNER.to_string(),
        foundry: "Nerd Fonts".to_string(),
        version: version.to_string(),
        description: format!("Patched version of {} with additional icon glyphs", font_name),
        categories: vec![normalize_category("Nerd Font")],
        tags: TAGS.iter().map(|t| t.to_string()).collect(),
        popularity: Some(popularity(font_name)),
        last_modified: last_modified.to_string(),
        metadata_url: REPOSITORY_URL.to_string(),
        source_url: format!("{}/releases/latest", REPOSITORY_URL),
        variants: Vec::new(),
        unicode_ranges: UNICODE_RANGES.iter().map(|r| r.to_string()).collect(),
        languages: LANGUAGES.iter().map(|l| l.to_string()).collect(),
        sample_text: SAMPLE_TEXT.to_string(),
    }
}

fn archive_variant(font_name: &str, asset: &Asset) -> Variant {
    let weight = if asset.name.to_lowercase().contains("bold") {
        700
    } else {
        400
    };
    Variant {
        name: variant_name(font_name, weight, FontStyle::Normal),
        weight,
        style: FontStyle::Normal,
        subsets: SUBSETS.iter().map(|s| s.to_string()).collect(),
        files: BTreeMap::from([(FileFormat::Ttf, asset.browser_download_url.clone())]),
    }
}

fn popularity(font_name: &str) -> u8 {
    POPULARITY
        .iter()
        .find(|(name, _)| *name == font_name)
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_POPULARITY)
}

static NERD_FONT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)nerd\s*fonts?").expect("nerd font pattern is a valid regex")
});

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?\d+\.\d+(\.\d+)?").expect("version pattern is a valid regex"));

/// Family name for an archive such as `JetBrainsMono.zip`.
///
/// The longest matching table entry wins, so `InconsolataGo` is not read as
/// `Inconsolata`. Unknown archives fall back to a cleaned-up file stem.
fn extract_font_name(file_name: &str) -> Option<String> {
    let stem = ARCHIVE_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name);
    let lower = stem.to_lowercase();

    let known = FONT_PATTERNS
        .iter()
        .filter(|(pattern, _)| lower.contains(&pattern.to_lowercase()))
        .max_by_key(|(pattern, _)| pattern.len())
        .map(|(_, name)| name.to_string());
    if known.is_some() {
        return known;
    }

    let without_brand = NERD_FONT.replace_all(stem, "");
    let without_version = VERSION.replace_all(&without_brand, "");
    let spaced = without_version.replace(['_', '-'], " ");
    let words: Vec<&str> = spaced.split_whitespace().collect();
    if words.is_empty() {
        None
    } else {
        Some(title_case(&words.join(" ")))
    }
}
