//! JSON Schema generation for tool inputs.
//!
//! Tool input shapes are plain structs deriving [`JsonSchema`]; field doc
//! comments become property descriptions. The generated schema is fully
//! inlined and closed: every object schema carries
//! `"additionalProperties": false` and no `$ref` is emitted.
use anyhow::Result;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::Value;

/// Keywords whose value is a map from names to schemas rather than a schema.
const SCHEMA_MAPS: [&str; 3] = ["properties", "patternProperties", "definitions"];

/// Keywords whose value is instance data, never a schema.
const VALUE_KEYWORDS: [&str; 4] = ["default", "examples", "const", "enum"];

/// Generate the input schema for `T`.
pub fn generate_schema<T: JsonSchema>() -> Result<Value> {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let root = generator.into_root_schema_for::<T>();

    let mut schema = serde_json::to_value(root)?;
    close_objects(&mut schema);
    Ok(schema)
}

fn close_objects(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            let is_object = map.get("type").and_then(Value::as_str) == Some("object")
                || map.contains_key("properties");
            if is_object && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for (key, value) in map.iter_mut() {
                if VALUE_KEYWORDS.contains(&key.as_str()) {
                    continue;
                }
                if SCHEMA_MAPS.contains(&key.as_str()) {
                    if let Value::Object(named) = value {
                        named.values_mut().for_each(close_objects);
                    }
                } else {
                    close_objects(value);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_objects),
        _ => {}
    }
}
