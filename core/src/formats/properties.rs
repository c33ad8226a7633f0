/// Java `.properties` decoder
use super::{DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

pub struct PropertiesDecoder;

impl Decoder for PropertiesDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut bundle = DecodedBundle::default();
        for (number, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                log::warn!("skipping properties line {} without '='", number + 1);
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                log::warn!("skipping properties line {} with an empty key", number + 1);
                continue;
            }
            bundle.units.push(UnitSeed {
                key: key.to_string(),
                source: decode_escapes(value.trim()),
                line: Some(number + 1),
                ..UnitSeed::default()
            });
        }
        Ok(bundle)
    }
}

fn decode_escapes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
