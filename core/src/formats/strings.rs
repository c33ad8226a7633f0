/// iOS `.strings` decoder: single-line `"key" = "value";` pairs
use once_cell::sync::Lazy;
use regex::Regex;

use super::{DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

static PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;\s*$"#)
        .expect("valid strings pair regex")
});

pub struct StringsDecoder;

impl Decoder for StringsDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut bundle = DecodedBundle::default();
        for (number, line) in content.lines().enumerate() {
            let Some(caps) = PAIR_RE.captures(line) else {
                continue;
            };
            let key = decode_escapes(&caps[1]);
            if key.is_empty() {
                log::warn!("skipping .strings entry with an empty key on line {}", number + 1);
                continue;
            }
            bundle.units.push(UnitSeed {
                source: key.clone(),
                key,
                target: decode_escapes(&caps[2]),
                line: Some(number + 1),
                ..UnitSeed::default()
            });
        }
        Ok(bundle)
    }
}

fn decode_escapes(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pairs_and_skips_noise() {
        let content = concat!(
            "/* Login screen */\n",
            "\"login.title\" = \"Sign in\";\n",
            "\n",
            "// trailing comment line\n",
            "\"login.button\" = \"Continue\";\n",
            "not a pair\n",
        );
        let bundle = StringsDecoder.decode(content).unwrap();
        assert_eq!(bundle.units.len(), 2);
        assert_eq!(bundle.units[0].key, "login.title");
        assert_eq!(bundle.units[0].source, "login.title");
        assert_eq!(bundle.units[0].target, "Sign in");
        assert_eq!(bundle.units[1].line, Some(5));
    }

    #[test]
    fn decodes_escaped_quotes() {
        let content = "\"say\" = \"He said \\\"hi\\\"\";\n";
        let bundle = StringsDecoder.decode(content).unwrap();
        assert_eq!(bundle.units[0].target, "He said \"hi\"");
    }

    #[test]
    fn empty_file_yields_no_units() {
        let bundle = StringsDecoder.decode("").unwrap();
        assert!(bundle.units.is_empty());
    }
}
