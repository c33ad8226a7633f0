/// YAML bundle decoder
/// String scalars in nested mappings, keyed like the JSON decoder
use serde_yaml::Value;

use super::{DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

pub struct YamlDecoder;

impl YamlDecoder {
    fn collect(&self, value: &Value, path: &str, units: &mut Vec<UnitSeed>) {
        match value {
            Value::String(s) => {
                if !path.is_empty() {
                    units.push(UnitSeed {
                        key: path.to_string(),
                        source: s.trim().to_string(),
                        ..UnitSeed::default()
                    });
                }
            }
            Value::Mapping(map) => {
                for (key, val) in map {
                    let Some(key) = key.as_str() else {
                        log::warn!("skipping YAML mapping entry with a non-string key");
                        continue;
                    };
                    let child_path = if path.is_empty() {
                        key.to_string()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    self.collect(val, &child_path, units);
                }
            }
            _ => {}
        }
    }
}

impl Decoder for YamlDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let value: Value = serde_yaml::from_str(content)?;
        if !value.is_mapping() {
            return Err(DecodeError::syntax("top-level value must be a mapping"));
        }
        let mut bundle = DecodedBundle::default();
        self.collect(&value, "", &mut bundle.units);
        Ok(bundle)
    }
}
