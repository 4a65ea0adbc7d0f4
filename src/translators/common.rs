// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conventions shared by every translator: font ids, categories, weights and
//! the collector that assembles the font map.

use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;

use crate::config::{is_http_url, SourceKind};
use crate::observability::messages::translator::FontSkipped;
use crate::observability::messages::StructuredLog;
use crate::schema::{FileFormat, FontRecord, FontStyle};

pub const DEFAULT_SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";
pub const DEFAULT_WEIGHT: u16 = 400;

/// Categories every source maps onto, plus common provider spellings.
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("Sans Serif", "Sans Serif"),
    ("Serif", "Serif"),
    ("Slab Serif", "Slab Serif"),
    ("Display", "Display"),
    ("Monospace", "Monospace"),
    ("Script", "Script"),
    ("Handwriting", "Handwriting"),
    ("Decorative", "Decorative"),
    ("Symbol", "Symbol"),
    ("Blackletter", "Blackletter"),
    ("Typewriter", "Display"),
    ("Novelty", "Decorative"),
    ("Comic", "Decorative"),
    ("Dingbat", "Symbol"),
    ("Handdrawn", "Handwriting"),
    ("Calligraphic", "Script"),
    ("Cursive", "Script"),
    ("Programming", "Monospace"),
    ("Retro", "Decorative"),
    ("Grunge", "Decorative"),
    ("Pixel", "Decorative"),
    ("Stencil", "Decorative"),
    ("Monospaced", "Monospace"),
];

/// Keyword search order. Compound names come before the words they contain.
const WEIGHT_KEYWORDS: &[(&[&str], u16)] = &[
    (&["thin", "hairline", "100"], 100),
    (&["extralight", "ultralight", "200"], 200),
    (&["extrabold", "ultrabold", "800"], 800),
    (&["semibold", "demibold", "demi", "600"], 600),
    (&["light", "300"], 300),
    (&["black", "heavy", "900"], 900),
    (&["bold", "700"], 700),
    (&["medium", "500"], 500),
    (&["regular", "normal", "book", "400"], 400),
];

/// Lowercase ASCII alphanumerics separated by single hyphens.
///
/// ```
/// use fontget_sources::translators::common::clean_id;
///
/// assert_eq!(clean_id("Fira Code (NF)"), "fira-code-nf");
/// ```
pub fn clean_id(value: &str) -> String {
    let mut id = String::with_capacity(value.len());
    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    while id.ends_with('-') {
        id.pop();
    }
    id
}

/// `{prefix}.{clean name}`, or `None` when nothing of the name survives cleaning.
pub fn font_id(prefix: &str, name: &str) -> Option<String> {
    let name = clean_id(name);
    if name.is_empty() {
        None
    } else {
        Some(format!("{}.{}", prefix, name))
    }
}

/// Map a provider category onto the shared category set.
///
/// Unknown categories keep their title-cased spelling.
pub fn normalize_category(raw: &str) -> String {
    let words: Vec<String> = raw
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        return "Other".to_string();
    }

    let normalized = words.join(" ");
    CATEGORY_MAP
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(&normalized))
        .map(|(_, category)| category.to_string())
        .unwrap_or(normalized)
}

/// `category` as a tag: lowercase, spaces replaced with hyphens.
pub fn slug(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of every alphabetic run, e.g. `700italic` -> `700Italic`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.chars() {
        if previous_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    out
}

pub fn weight_name(weight: u16) -> String {
    match weight {
        100 => "Thin".to_string(),
        200 => "Extra Light".to_string(),
        300 => "Light".to_string(),
        400 => "Regular".to_string(),
        500 => "Medium".to_string(),
        600 => "Semi Bold".to_string(),
        700 => "Bold".to_string(),
        800 => "Extra Bold".to_string(),
        900 => "Black".to_string(),
        other => other.to_string(),
    }
}

/// Weight and style from a style or file name such as `OpenSans-SemiBoldItalic.ttf`.
pub fn parse_weight_style(text: &str) -> (u16, FontStyle) {
    let compact: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect();

    let style = if compact.contains("italic") || compact.contains("oblique") {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    };

    let weight = WEIGHT_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| compact.contains(k)))
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_WEIGHT);

    (weight, style)
}

/// Weight and style from a font file name, looking only at the style part.
///
/// `BlackOpsOne-Regular.ttf` is read as `Regular`, so family names that
/// contain weight words do not leak into the result. File names without a
/// `-`/`_` separator are parsed whole.
pub fn parse_file_weight_style(filename: &str) -> (u16, FontStyle) {
    let stem = filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _)| stem);
    let style_part = stem
        .rsplit_once(['-', '_'])
        .map(|(_, style)| style)
        .filter(|style| !style.is_empty())
        .unwrap_or(stem);
    parse_weight_style(style_part)
}

/// `"{family} {Weight}"`, with ` Italic` appended for italic styles.
pub fn variant_name(family: &str, weight: u16, style: FontStyle) -> String {
    match style {
        FontStyle::Normal => format!("{} {}", family, weight_name(weight)),
        FontStyle::Italic | FontStyle::Oblique => {
            format!("{} {} Italic", family, weight_name(weight))
        }
    }
}

/// The `files` key a download URL belongs under.
///
/// Archives are listed under `ttf`; the FontGet CLI extracts them on install.
pub fn file_format_for_url(url: &str) -> Option<FileFormat> {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
    if path.ends_with(".ttf") {
        Some(FileFormat::Ttf)
    } else if path.ends_with(".otf") {
        Some(FileFormat::Otf)
    } else if path.ends_with(".fon") {
        Some(FileFormat::Fon)
    } else if is_archive(&path) {
        Some(FileFormat::Ttf)
    } else {
        None
    }
}

pub fn is_archive(name: &str) -> bool {
    let name = name.to_lowercase();
    [".zip", ".tar.gz", ".tgz", ".tar.xz"]
        .iter()
        .any(|ext| name.ends_with(ext))
}

/// Keep `value` when it is an http(s) URL; otherwise an empty string.
pub fn http_url_or_empty(value: &str) -> String {
    let value = value.trim();
    if is_http_url(value) {
        value.to_string()
    } else {
        String::new()
    }
}

/// Current time as RFC 3339 with a `Z` suffix, second precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Builds the font map of a source, enforcing unique, well-formed ids.
pub struct FontCollector {
    kind: SourceKind,
    fonts: BTreeMap<String, FontRecord>,
}

impl FontCollector {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            fonts: BTreeMap::new(),
        }
    }

    /// Insert a finished record. Returns false (and logs) when it was skipped.
    pub fn add(&mut self, name: &str, record: FontRecord) -> bool {
        let Some(id) = font_id(self.kind.id_prefix(), name) else {
            self.skip(name, "name contains no usable id characters");
            return false;
        };
        if record.variants.is_empty() {
            self.skip(name, "no usable variants");
            return false;
        }
        if self.fonts.contains_key(&id) {
            self.skip(name, "duplicate font id");
            return false;
        }
        self.fonts.insert(id, record);
        true
    }

    /// Fetch the record for `name`, creating it with `create` on first sight.
    pub fn upsert(
        &mut self,
        name: &str,
        create: impl FnOnce() -> FontRecord,
    ) -> Option<&mut FontRecord> {
        let Some(id) = font_id(self.kind.id_prefix(), name) else {
            self.skip(name, "name contains no usable id characters");
            return None;
        };
        Some(self.fonts.entry(id).or_insert_with(create))
    }

    pub fn skip(&self, name: &str, reason: &str) {
        FontSkipped {
            source: self.kind.as_str(),
            font_name: name,
            reason,
        }
        .log();
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The collected fonts. Records left without variants are dropped.
    pub fn into_fonts(self) -> BTreeMap<String, FontRecord> {
        let kind = self.kind;
        self.fonts
            .into_iter()
            .filter(|(id, record)| {
                if record.variants.is_empty() {
                    FontSkipped {
                        source: kind.as_str(),
                        font_name: id,
                        reason: "no usable variants",
                    }
                    .log();
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}
