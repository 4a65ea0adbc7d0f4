// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural rules of the source format, checked over raw JSON.
//!
//! Every violation is collected together with the path of the offending value,
//! so one pass over a file reports everything that is wrong with it.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::config::is_http_url;
use crate::errors::SchemaViolation;
use crate::schema::model::{FileFormat, FontStyle};

/// `{source_prefix}.{font_name}`, both halves lowercase alphanumerics joined by single hyphens.
pub const FONT_ID_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*\.[a-z0-9]+(-[a-z0-9]+)*$";

/// Absolute http(s) URL with a host and no whitespace or control characters.
pub const HTTP_URL_PATTERN: &str =
    r"^https?://[^/\s\u0000-\u001F\u007F-\u009F][^\s\u0000-\u001F\u007F-\u009F]*$";

pub const MIN_WEIGHT: i64 = 100;
pub const MAX_WEIGHT: i64 = 900;
pub const MAX_POPULARITY: i64 = 100;

const SOURCE_KEYS: &[&str] = &["source_info", "fonts"];
const SOURCE_INFO_KEYS: &[&str] = &[
    "name",
    "description",
    "url",
    "api_endpoint",
    "version",
    "last_updated",
    "total_fonts",
];
const SOURCE_INFO_REQUIRED: &[&str] = &[
    "name",
    "description",
    "url",
    "version",
    "last_updated",
    "total_fonts",
];
const FONT_KEYS: &[&str] = &[
    "name",
    "family",
    "license",
    "license_url",
    "designer",
    "foundry",
    "version",
    "description",
    "categories",
    "tags",
    "popularity",
    "last_modified",
    "metadata_url",
    "source_url",
    "variants",
    "unicode_ranges",
    "languages",
    "sample_text",
];
const FONT_REQUIRED: &[&str] = &["name", "family", "license", "variants"];
const FONT_TEXT_FIELDS: &[&str] = &[
    "designer",
    "foundry",
    "version",
    "description",
    "last_modified",
    "sample_text",
];
pub(crate) const FONT_URL_FIELDS: &[&str] = &["license_url", "metadata_url", "source_url"];
const FONT_LIST_FIELDS: &[&str] = &["categories", "tags", "unicode_ranges", "languages"];
const VARIANT_KEYS: &[&str] = &["name", "weight", "style", "subsets", "files"];
const VARIANT_REQUIRED: &[&str] = &["name", "weight", "style", "files"];

static FONT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FONT_ID_PATTERN).expect("font id pattern is a valid regex"));

/// True when `id` is a well-formed, namespaced font id.
pub fn is_valid_font_id(id: &str) -> bool {
    FONT_ID.is_match(id)
}

/// Check a parsed document against the source format.
///
/// Returns an empty vector when the document is valid.
pub fn check_source(value: &Value) -> Vec<SchemaViolation> {
    let mut checker = Checker::default();
    checker.source(value);
    checker.violations
}

#[derive(Default)]
struct Checker {
    path: Vec<String>,
    violations: Vec<SchemaViolation>,
}

impl Checker {
    fn report(&mut self, message: impl Into<String>) {
        self.violations.push(SchemaViolation::new(&self.path, message));
    }

    fn at(&mut self, key: &str, check: impl FnOnce(&mut Self)) {
        self.path.push(key.to_string());
        check(self);
        self.path.pop();
    }

    fn source(&mut self, value: &Value) {
        let Some(root) = self.object(value) else {
            return;
        };
        self.closed(root, SOURCE_KEYS);
        self.required(root, SOURCE_KEYS);

        if let Some(info) = root.get("source_info") {
            self.at("source_info", |c| c.source_info(info));
        }

        let Some(fonts) = root.get("fonts") else {
            return;
        };
        self.at("fonts", |c| {
            let Some(fonts) = c.object(fonts) else {
                return;
            };
            for (id, font) in fonts {
                if !is_valid_font_id(id) {
                    c.report(format!("'{}' does not match '{}'", id, FONT_ID_PATTERN));
                }
                c.at(id, |c| c.font(font));
            }
        });

        let declared = root
            .get("source_info")
            .and_then(|info| info.get("total_fonts"))
            .and_then(Value::as_u64);
        let actual = root.get("fonts").and_then(Value::as_object).map(Map::len);
        if let (Some(declared), Some(actual)) = (declared, actual) {
            if declared != actual as u64 {
                self.at("source_info", |c| {
                    c.at("total_fonts", |c| {
                        c.report(format!(
                            "{} does not match the number of fonts ({})",
                            declared, actual
                        ))
                    })
                });
            }
        }
    }

    fn source_info(&mut self, value: &Value) {
        let Some(info) = self.object(value) else {
            return;
        };
        self.closed(info, SOURCE_INFO_KEYS);
        self.required(info, SOURCE_INFO_REQUIRED);

        self.field(info, "name", Self::non_empty_string);
        self.field(info, "description", Self::text);
        self.field(info, "url", Self::url);
        self.field(info, "api_endpoint", Self::url);
        self.field(info, "version", Self::text);
        self.field(info, "last_updated", Self::timestamp);
        self.field(info, "total_fonts", |c, v| {
            c.integer(v, Some(0), None);
        });
    }

    fn font(&mut self, value: &Value) {
        let Some(font) = self.object(value) else {
            return;
        };
        self.closed(font, FONT_KEYS);
        self.required(font, FONT_REQUIRED);

        for key in ["name", "family", "license"] {
            self.field(font, key, Self::non_empty_string);
        }
        for key in FONT_TEXT_FIELDS {
            self.field(font, key, Self::text);
        }
        for key in FONT_URL_FIELDS {
            self.field(font, key, Self::optional_url);
        }
        for key in FONT_LIST_FIELDS {
            self.field(font, key, Self::string_list);
        }
        self.field(font, "popularity", |c, v| {
            c.integer(v, Some(0), Some(MAX_POPULARITY));
        });
        self.field(font, "variants", |c, v| {
            let Some(variants) = c.array(v) else {
                return;
            };
            if variants.is_empty() {
                c.report("[] should be non-empty");
            }
            for (index, variant) in variants.iter().enumerate() {
                c.at(&index.to_string(), |c| c.variant(variant));
            }
        });
    }

    fn variant(&mut self, value: &Value) {
        let Some(variant) = self.object(value) else {
            return;
        };
        self.closed(variant, VARIANT_KEYS);
        self.required(variant, VARIANT_REQUIRED);

        self.field(variant, "name", Self::non_empty_string);
        self.field(variant, "weight", |c, v| {
            c.integer(v, Some(MIN_WEIGHT), Some(MAX_WEIGHT));
        });
        self.field(variant, "style", |c, v| {
            let Some(style) = c.string(v) else {
                return;
            };
            if !FontStyle::all().iter().any(|s| s.as_str() == style) {
                c.report(format!(
                    "'{}' is not one of {}",
                    style,
                    quoted_list(FontStyle::all().iter().map(FontStyle::as_str))
                ));
            }
        });
        self.field(variant, "subsets", Self::string_list);
        self.field(variant, "files", Self::files);
    }

    fn files(&mut self, value: &Value) {
        let Some(files) = self.object(value) else {
            return;
        };
        if files.is_empty() {
            self.report("{} should be non-empty");
        }
        for (format, url) in files {
            if FileFormat::all().iter().any(|f| f.as_str() == format) {
                self.at(format, |c| c.url(url));
            } else {
                self.report(format!(
                    "Additional properties are not allowed ('{}' was unexpected); supported formats are {}",
                    format,
                    quoted_list(FileFormat::all().iter().map(FileFormat::as_str))
                ));
            }
        }
    }

    fn field(&mut self, object: &Map<String, Value>, key: &str, check: impl FnOnce(&mut Self, &Value)) {
        if let Some(value) = object.get(key) {
            self.at(key, |c| check(c, value));
        }
    }

    fn closed(&mut self, object: &Map<String, Value>, allowed: &[&str]) {
        let unexpected: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();
        if !unexpected.is_empty() {
            let verb = if unexpected.len() == 1 { "was" } else { "were" };
            self.report(format!(
                "Additional properties are not allowed ({} {} unexpected)",
                quoted(unexpected.into_iter()),
                verb
            ));
        }
    }

    fn required(&mut self, object: &Map<String, Value>, required: &[&str]) {
        for key in required {
            if !object.contains_key(*key) {
                self.report(format!("'{}' is a required property", key));
            }
        }
    }

    fn object<'v>(&mut self, value: &'v Value) -> Option<&'v Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.report(format!("{} is not of type 'object'", value));
        }
        object
    }

    fn array<'v>(&mut self, value: &'v Value) -> Option<&'v Vec<Value>> {
        let array = value.as_array();
        if array.is_none() {
            self.report(format!("{} is not of type 'array'", value));
        }
        array
    }

    fn string<'v>(&mut self, value: &'v Value) -> Option<&'v str> {
        let string = value.as_str();
        if string.is_none() {
            self.report(format!("{} is not of type 'string'", value));
        }
        string
    }

    fn text(&mut self, value: &Value) {
        self.string(value);
    }

    fn non_empty_string(&mut self, value: &Value) {
        if let Some(s) = self.string(value) {
            if s.is_empty() {
                self.report("'' should be non-empty");
            }
        }
    }

    fn url(&mut self, value: &Value) {
        if let Some(s) = self.string(value) {
            if !is_http_url(s) {
                self.report(format!("'{}' is not a valid http(s) 'uri'", s));
            }
        }
    }

    fn optional_url(&mut self, value: &Value) {
        if let Some(s) = self.string(value) {
            if !s.is_empty() && !is_http_url(s) {
                self.report(format!("'{}' is not a valid http(s) 'uri'", s));
            }
        }
    }

    fn timestamp(&mut self, value: &Value) {
        if let Some(s) = self.string(value) {
            if chrono::DateTime::parse_from_rfc3339(s).is_err() {
                self.report(format!("'{}' is not a 'date-time'", s));
            }
        }
    }

    fn string_list(&mut self, value: &Value) {
        let Some(items) = self.array(value) else {
            return;
        };
        for (index, item) in items.iter().enumerate() {
            self.at(&index.to_string(), |c| c.text(item));
        }
    }

    fn integer(&mut self, value: &Value, min: Option<i64>, max: Option<i64>) -> Option<i64> {
        let Some(n) = value.as_i64() else {
            self.report(format!("{} is not of type 'integer'", value));
            return None;
        };
        if let Some(min) = min.filter(|min| n < *min) {
            self.report(format!("{} is less than the minimum of {}", n, min));
        }
        if let Some(max) = max.filter(|max| n > *max) {
            self.report(format!("{} is greater than the maximum of {}", n, max));
        }
        Some(n)
    }
}

fn quoted<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quoted_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    format!("[{}]", quoted(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_source() -> Value {
        json!({
            "source_info": {
                "name": "Google Fonts",
                "description": "Open source fonts from Google",
                "url": "https://fonts.google.com",
                "api_endpoint": "https://www.googleapis.com/webfonts/v1/webfonts",
                "version": "1.0",
                "last_updated": "2025-01-15T10:30:00Z",
                "total_fonts": 1
            },
            "fonts": {
                "google.roboto": {
                    "name": "Roboto",
                    "family": "Roboto",
                    "license": "OFL",
                    "license_url": "https://scripts.sil.org/OFL",
                    "designer": "Christian Robertson",
                    "categories": ["Sans Serif"],
                    "tags": ["sans-serif"],
                    "popularity": 90,
                    "metadata_url": "",
                    "variants": [{
                        "name": "Roboto Regular",
                        "weight": 400,
                        "style": "normal",
                        "subsets": ["latin"],
                        "files": { "ttf": "https://example.com/Roboto-Regular.ttf" }
                    }]
                }
            }
        })
    }

    fn locations(violations: &[SchemaViolation]) -> Vec<String> {
        violations.iter().map(SchemaViolation::location).collect()
    }

    #[test]
    fn test_valid_source_has_no_violations() {
        assert_eq!(check_source(&valid_source()), vec![]);
    }

    #[test]
    fn test_empty_font_map_is_valid() {
        let mut source = valid_source();
        source["fonts"] = json!({});
        source["source_info"]["total_fonts"] = json!(0);
        assert!(check_source(&source).is_empty());
    }

    #[test]
    fn test_root_must_be_object() {
        let violations = check_source(&json!([1, 2]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location(), "<root>");
        assert_eq!(violations[0].message, "[1,2] is not of type 'object'");
    }

    #[test]
    fn test_missing_required_properties() {
        let violations = check_source(&json!({}));
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["'source_info' is a required property", "'fonts' is a required property"]
        );
    }

    #[test]
    fn test_weight_out_of_range_reports_path() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["variants"][0]["weight"] = json!(950);

        let violations = check_source(&source);
        assert_eq!(
            locations(&violations),
            vec!["fonts -> google.roboto -> variants -> 0 -> weight"]
        );
        assert_eq!(violations[0].message, "950 is greater than the maximum of 900");
    }

    #[test]
    fn test_unknown_file_format_rejected() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["variants"][0]["files"] =
            json!({ "woff2": "https://example.com/Roboto.woff2" });

        let violations = check_source(&source);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'woff2' was unexpected"));
        assert_eq!(
            violations[0].location(),
            "fonts -> google.roboto -> variants -> 0 -> files"
        );
    }

    #[test]
    fn test_empty_files_and_variants_rejected() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["variants"][0]["files"] = json!({});
        assert_eq!(check_source(&source)[0].message, "{} should be non-empty");

        source["fonts"]["google.roboto"]["variants"] = json!([]);
        assert_eq!(check_source(&source)[0].message, "[] should be non-empty");
    }

    #[test]
    fn test_bad_font_id_rejected() {
        let mut source = valid_source();
        let font = source["fonts"]["google.roboto"].take();
        source["fonts"] = json!({ "Roboto Sans": font });

        let violations = check_source(&source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location(), "fonts");
        assert!(violations[0].message.starts_with("'Roboto Sans' does not match"));
    }

    #[test]
    fn test_font_id_pattern() {
        assert!(is_valid_font_id("google.roboto"));
        assert!(is_valid_font_id("nerd.fira-code"));
        assert!(is_valid_font_id("squirrel.0xproto"));
        assert!(!is_valid_font_id("roboto"));
        assert!(!is_valid_font_id("google.Roboto"));
        assert!(!is_valid_font_id("google.roboto--mono"));
        assert!(!is_valid_font_id("google.-roboto"));
        assert!(!is_valid_font_id("google.roboto.mono"));
    }

    #[test]
    fn test_additional_properties_rejected() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["rating"] = json!(5);

        let violations = check_source(&source);
        assert_eq!(locations(&violations), vec!["fonts -> google.roboto"]);
        assert_eq!(
            violations[0].message,
            "Additional properties are not allowed ('rating' was unexpected)"
        );
    }

    #[test]
    fn test_style_enum_and_popularity_range() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["variants"][0]["style"] = json!("bold");
        source["fonts"]["google.roboto"]["popularity"] = json!(101);

        let violations = check_source(&source);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0].location(),
            "fonts -> google.roboto -> popularity"
        );
        assert_eq!(
            violations[1].message,
            "'bold' is not one of ['normal', 'italic', 'oblique']"
        );
    }

    #[test]
    fn test_urls_and_timestamp() {
        let mut source = valid_source();
        source["source_info"]["last_updated"] = json!("yesterday");
        source["source_info"]["url"] = json!("fonts.google.com");
        source["fonts"]["google.roboto"]["license_url"] = json!("see LICENSE");

        let violations = check_source(&source);
        assert_eq!(
            locations(&violations),
            vec![
                "source_info -> url",
                "source_info -> last_updated",
                "fonts -> google.roboto -> license_url",
            ]
        );
    }

    #[test]
    fn test_urls_with_whitespace_rejected() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["metadata_url"] = json!("https://example.com/fonts/Roboto Mono");
        source["fonts"]["google.roboto"]["variants"][0]["files"] =
            json!({ "ttf": "https://exa mple.com/a b.ttf" });

        let violations = check_source(&source);
        assert_eq!(
            locations(&violations),
            vec![
                "fonts -> google.roboto -> metadata_url",
                "fonts -> google.roboto -> variants -> 0 -> files -> ttf",
            ]
        );
    }

    #[test]
    fn test_total_fonts_must_match() {
        let mut source = valid_source();
        source["source_info"]["total_fonts"] = json!(3);

        let violations = check_source(&source);
        assert_eq!(locations(&violations), vec!["source_info -> total_fonts"]);
    }

    #[test]
    fn test_violations_accumulate() {
        let mut source = valid_source();
        source["fonts"]["google.roboto"]["name"] = json!("");
        source["fonts"]["google.roboto"]["tags"] = json!(["ok", 7]);
        source["fonts"]["google.roboto"]["variants"][0]["weight"] = json!("400");

        let violations = check_source(&source);
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[1].location(), "fonts -> google.roboto -> tags -> 1");
        assert_eq!(violations[2].message, "\"400\" is not of type 'integer'");
    }
}
