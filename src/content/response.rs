//! Validates raw model output against the response schema.
//!
//! The model is asked for JSON matching [`response_schema`](super::response_schema),
//! but nothing guarantees it complies. Every platform must be present with
//! the right shape; extra keys are ignored.

use super::{ContentError, GeneratedContent, PlatformContent, TitledPost};
use crate::platform::{Platform, SchemaField, schema_field_for};
use serde_json::{Map, Value};

/// Parse the model's text into [`GeneratedContent`].
///
/// Empty text, invalid JSON, a non-object payload, a missing platform or a
/// field of the wrong shape all yield [`ContentError::Format`].
pub fn parse_generated_content(text: &str) -> Result<GeneratedContent, ContentError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ContentError::Format("empty response".into()));
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| ContentError::Format(format!("invalid JSON: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(ContentError::Format(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    };

    Platform::ALL
        .into_iter()
        .map(|platform| {
            let field = fields.get(platform.key()).ok_or_else(|| {
                ContentError::Format(format!("missing required field '{}'", platform.key()))
            })?;
            parse_platform(platform, field).map(|content| (platform, content))
        })
        .collect()
}

fn parse_platform(platform: Platform, field: &Value) -> Result<PlatformContent, ContentError> {
    match schema_field_for(platform) {
        SchemaField::Text => field
            .as_str()
            .map(|s| PlatformContent::Text(s.to_string()))
            .ok_or_else(|| {
                ContentError::Format(format!(
                    "'{}' should be a string, got {}",
                    platform.key(),
                    json_kind(field)
                ))
            }),
        SchemaField::TitleDescription => {
            let obj = field.as_object().ok_or_else(|| {
                ContentError::Format(format!(
                    "'{}' should be an object, got {}",
                    platform.key(),
                    json_kind(field)
                ))
            })?;
            Ok(PlatformContent::Titled(TitledPost {
                title: string_member(platform, obj, "title")?,
                description: string_member(platform, obj, "description")?,
            }))
        }
    }
}

fn string_member(
    platform: Platform,
    obj: &Map<String, Value>,
    name: &str,
) -> Result<String, ContentError> {
    obj.get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ContentError::Format(format!("'{}.{}' is missing or not a string", platform.key(), name))
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
