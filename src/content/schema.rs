//! Structured-output schema sent with every generation request.
//!
//! The schema uses the generation API's OpenAPI subset: upper-case type
//! names (`OBJECT`, `STRING`), `properties`, `required` and free-text
//! `description`s. The per-platform descriptions carry the writing
//! constraints, so the model sees them next to the field they apply to.

use crate::platform::{Platform, SchemaField, field_guidance, schema_field_for, titled_guidance};
use serde_json::{Map, Value, json};

/// Build the response schema: one required property per platform.
pub fn response_schema() -> Value {
    let mut properties = Map::new();
    let mut required = Vec::with_capacity(Platform::ALL.len());

    for platform in Platform::ALL {
        properties.insert(platform.key().to_string(), platform_property(platform));
        required.push(Value::from(platform.key()));
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn platform_property(platform: Platform) -> Value {
    match schema_field_for(platform) {
        SchemaField::Text => json!({
            "type": "STRING",
            "description": field_guidance(platform),
        }),
        SchemaField::TitleDescription => {
            let (title, description) = titled_guidance(platform).unwrap_or_default();
            json!({
                "type": "OBJECT",
                "description": field_guidance(platform),
                "properties": {
                    "title": { "type": "STRING", "description": title },
                    "description": { "type": "STRING", "description": description },
                },
                "required": ["title", "description"],
            })
        }
    }
}
