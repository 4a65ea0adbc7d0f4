// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The published JSON Schema document for source files.

use serde_json::{json, Map, Value};

use crate::schema::model::{FileFormat, SourceFile};
use crate::schema::rules::{FONT_ID_PATTERN, FONT_URL_FIELDS, HTTP_URL_PATTERN};

pub const SCHEMA_ID: &str = "font-source-schema.json";
pub const SCHEMA_TITLE: &str = "FontGet Source Schema";

/// JSON Schema describing a source file, generated from the model types.
///
/// Constraints the derive cannot express are patched in afterwards: the font
/// id pattern, the file format allowlist, the timestamp format and URL shapes.
/// Optional properties may be omitted but never `null`.
pub fn source_schema() -> Result<Value, serde_json::Error> {
    let mut schema = serde_json::to_value(schemars::schema_for!(SourceFile))?;

    if let Some(root) = schema.as_object_mut() {
        root.insert("$id".to_string(), json!(SCHEMA_ID));
        root.insert("title".to_string(), json!(SCHEMA_TITLE));
        root.insert(
            "description".to_string(),
            json!("Schema for FontGet font source files"),
        );
    }

    if let Some(fonts) = schema.pointer_mut("/properties/fonts") {
        *fonts = json!({
            "type": "object",
            "propertyNames": { "pattern": FONT_ID_PATTERN },
            "additionalProperties": { "$ref": "#/$defs/FontRecord" }
        });
    }

    if let Some(last_updated) = schema
        .pointer_mut("/$defs/SourceInfo/properties/last_updated")
        .and_then(Value::as_object_mut)
    {
        last_updated.insert("format".to_string(), json!("date-time"));
    }

    if let Some(files) = schema.pointer_mut("/$defs/Variant/properties/files") {
        let formats: Vec<&str> = FileFormat::all().iter().map(FileFormat::as_str).collect();
        *files = json!({
            "description": "Download URLs keyed by file format",
            "type": "object",
            "minProperties": 1,
            "propertyNames": { "enum": formats },
            "additionalProperties": { "type": "string", "format": "uri", "pattern": HTTP_URL_PATTERN }
        });
    }

    for pointer in [
        "/$defs/SourceInfo/properties/api_endpoint",
        "/$defs/FontRecord/properties/popularity",
    ] {
        if let Some(property) = schema.pointer_mut(pointer).and_then(Value::as_object_mut) {
            drop_null_type(property);
        }
    }

    for pointer in [
        "/$defs/SourceInfo/properties/url",
        "/$defs/SourceInfo/properties/api_endpoint",
    ] {
        if let Some(property) = schema.pointer_mut(pointer).and_then(Value::as_object_mut) {
            property.insert("format".to_string(), json!("uri"));
            property.insert("pattern".to_string(), json!(HTTP_URL_PATTERN));
        }
    }

    // empty string means "unknown" for these
    for field in FONT_URL_FIELDS {
        let pointer = format!("/$defs/FontRecord/properties/{}", field);
        if let Some(property) = schema.pointer_mut(&pointer).and_then(Value::as_object_mut) {
            property.insert(
                "anyOf".to_string(),
                json!([
                    { "maxLength": 0 },
                    { "format": "uri", "pattern": HTTP_URL_PATTERN }
                ]),
            );
        }
    }

    Ok(schema)
}

/// `"type": ["integer", "null"]` becomes `"type": "integer"`, and a
/// `{"type": "null"}` branch is removed from `anyOf`.
fn drop_null_type(property: &mut Map<String, Value>) {
    if let Some(Value::Array(types)) = property.get_mut("type") {
        types.retain(|t| t != "null");
        if let [single] = types.as_slice() {
            let single = single.clone();
            property.insert("type".to_string(), single);
        }
    }

    if let Some(Value::Array(branches)) = property.get_mut("anyOf") {
        branches.retain(|branch| branch.get("type") != Some(&json!("null")));
        if let [Value::Object(single)] = branches.as_slice() {
            let single = single.clone();
            property.remove("anyOf");
            property.extend(single);
        }
    }
}

/// Schema as pretty JSON, ready to write to disk.
pub fn source_schema_pretty() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&source_schema()?)
}
