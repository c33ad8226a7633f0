/// JSON bundle decoder
/// One unit per string leaf, keyed by the dot-joined path from the root
use serde_json::Value;

use super::{DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

/// Top-level wrapper keys that are transparently unwrapped, in preference
/// order.
const WRAPPER_KEYS: &[&str] = &["translations", "messages", "strings"];

pub struct JsonDecoder;

impl JsonDecoder {
    fn collect(&self, value: &Value, path: &str, units: &mut Vec<UnitSeed>) {
        match value {
            Value::String(s) => {
                if !path.is_empty() {
                    units.push(UnitSeed {
                        key: path.to_string(),
                        source: s.clone(),
                        ..UnitSeed::default()
                    });
                }
            }
            Value::Object(map) => {
                for (key, val) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    self.collect(val, &child_path, units);
                }
            }
            // Arrays, numbers, booleans and nulls carry no translatable text.
            _ => {}
        }
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let value: Value = serde_json::from_str(content)?;
        let root = value
            .as_object()
            .ok_or_else(|| DecodeError::syntax("top-level value must be an object"))?;

        let traversal_root = WRAPPER_KEYS
            .iter()
            .find_map(|key| root.get(*key).filter(|v| v.is_object()))
            .unwrap_or(&value);

        let mut bundle = DecodedBundle::default();
        self.collect(traversal_root, "", &mut bundle.units);
        Ok(bundle)
    }
}
